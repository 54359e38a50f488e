//! `secura card` — add, list, show, update, delete, and search payment cards.

use crate::cli::output;
use crate::cli::{confirm, open_vault, read_secret, CardAction, Cli};
use crate::errors::{Result, SecuraError};
use crate::vault::{CardPatch, CardRecord, CardType, NewCard};

/// Execute a `card` subcommand.
pub fn execute(cli: &Cli, action: &CardAction) -> Result<()> {
    match action {
        CardAction::Add {
            name,
            card_type,
            holder,
            number,
            expiry,
            cvv,
        } => {
            let card_type: CardType = card_type.parse()?;
            let number = match number {
                Some(n) => n.clone(),
                None => read_secret("Card number")?.to_string(),
            };
            let cvv = match cvv {
                Some(c) => c.clone(),
                None => read_secret("CVV")?.to_string(),
            };
            add(
                cli,
                NewCard {
                    card_name: name.clone(),
                    card_type,
                    cardholder_name: holder.clone(),
                    card_number: number,
                    expiry_date: expiry.clone(),
                    cvv,
                },
            )
        }
        CardAction::List => list(cli),
        CardAction::Show { id, reveal } => show(cli, id, *reveal),
        CardAction::Update {
            id,
            name,
            card_type,
            holder,
            number,
            expiry,
            cvv,
        } => {
            let card_type: Option<CardType> = card_type.as_deref().map(str::parse).transpose()?;
            let patch = CardPatch {
                card_name: name.clone(),
                card_type,
                cardholder_name: holder.clone(),
                card_number: number.clone(),
                expiry_date: expiry.clone(),
                cvv: cvv.clone(),
            };
            update(cli, id, patch)
        }
        CardAction::Delete { id, force } => delete(cli, id, *force),
        CardAction::Search { query } => search(cli, query),
    }
}

fn add(cli: &Cli, draft: NewCard) -> Result<()> {
    let mut vault = open_vault(cli)?;
    let saved = vault.add::<CardRecord>(draft)?;
    output::sync_issues(&saved.issues);

    let record = saved.value;
    output::success(&format!(
        "Card '{}' ({}) saved ({} total)",
        record.card_name,
        record.masked_number(),
        vault.records::<CardRecord>().len()
    ));
    output::info(&format!("ID: {}", record.id));
    Ok(())
}

fn list(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;
    output::print_cards_table(vault.records::<CardRecord>());
    Ok(())
}

fn show(cli: &Cli, id: &str, reveal: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let record = vault.get::<CardRecord>(id)?.ok_or_else(|| not_found(id))?;
    output::print_card(record, reveal);
    Ok(())
}

fn update(cli: &Cli, id: &str, patch: CardPatch) -> Result<()> {
    let mut vault = open_vault(cli)?;
    let saved = vault.update::<CardRecord>(id, patch)?;
    output::sync_issues(&saved.issues);

    let record = saved.value.ok_or_else(|| not_found(id))?;
    output::success(&format!("Card '{}' updated", record.card_name));
    Ok(())
}

fn delete(cli: &Cli, id: &str, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete card '{id}'?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    let mut vault = open_vault(cli)?;
    let saved = vault.remove::<CardRecord>(id)?;
    output::sync_issues(&saved.issues);

    if saved.value {
        output::success(&format!("Deleted card '{id}'"));
    } else {
        output::info(&format!("No card with id '{id}'; nothing to delete."));
    }
    Ok(())
}

fn search(cli: &Cli, query: &str) -> Result<()> {
    let vault = open_vault(cli)?;
    let hits = vault.search::<CardRecord>(query)?;
    if hits.is_empty() {
        output::info(&format!("No cards match '{query}'."));
        return Ok(());
    }
    output::print_cards_table(&hits);
    Ok(())
}

fn not_found(id: &str) -> SecuraError {
    SecuraError::RecordNotFound {
        kind: "card",
        id: id.to_string(),
    }
}
