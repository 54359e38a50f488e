//! `secura password` — add, list, show, update, delete, and search logins.

use crate::cli::output;
use crate::cli::{confirm, open_vault, read_secret, Cli, PasswordAction};
use crate::errors::{Result, SecuraError};
use crate::generator::{self, GeneratorOptions};
use crate::vault::{NewPassword, PasswordPatch, PasswordRecord};

/// Execute a `password` subcommand.
pub fn execute(cli: &Cli, action: &PasswordAction) -> Result<()> {
    match action {
        PasswordAction::Add {
            site,
            username,
            password,
            generate,
            url,
            notes,
        } => add(cli, site, username, password.as_deref(), *generate, url, notes),
        PasswordAction::List => list(cli),
        PasswordAction::Show { id, reveal, copy } => show(cli, id, *reveal, *copy),
        PasswordAction::Update {
            id,
            site,
            username,
            password,
            url,
            notes,
        } => {
            let patch = PasswordPatch {
                site_name: site.clone(),
                username: username.clone(),
                secret: password.clone(),
                url: url.clone(),
                notes: notes.clone(),
            };
            update(cli, id, patch)
        }
        PasswordAction::Delete { id, force } => delete(cli, id, *force),
        PasswordAction::Search { query } => search(cli, query),
    }
}

fn add(
    cli: &Cli,
    site: &str,
    username: &str,
    password: Option<&str>,
    generate: bool,
    url: &str,
    notes: &str,
) -> Result<()> {
    let secret = if generate {
        generator::generate(&GeneratorOptions::default())?
    } else if let Some(pw) = password {
        output::warning("Password provided on command line — it may appear in shell history.");
        pw.to_string()
    } else {
        read_secret(&format!("Password for {site}"))?.to_string()
    };

    let mut vault = open_vault(cli)?;
    let saved = vault.add::<PasswordRecord>(NewPassword {
        site_name: site.to_string(),
        username: username.to_string(),
        secret,
        url: url.to_string(),
        notes: notes.to_string(),
    })?;
    output::sync_issues(&saved.issues);

    let record = saved.value;
    output::success(&format!(
        "Password for '{}' saved ({} total)",
        record.site_name,
        vault.records::<PasswordRecord>().len()
    ));
    output::info(&format!("ID: {}", record.id));
    if generate {
        output::tip("Run `secura password show <ID> --reveal` to see the generated password.");
    }
    Ok(())
}

fn list(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;
    output::print_passwords_table(vault.records::<PasswordRecord>());
    Ok(())
}

fn show(cli: &Cli, id: &str, reveal: bool, copy: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let record = vault
        .get::<PasswordRecord>(id)?
        .ok_or_else(|| not_found(id))?;

    output::print_password(record, reveal);

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| SecuraError::CommandFailed(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(record.secret.clone())
            .map_err(|e| SecuraError::CommandFailed(format!("clipboard write: {e}")))?;
        output::success("Password copied to clipboard");
    }
    Ok(())
}

fn update(cli: &Cli, id: &str, patch: PasswordPatch) -> Result<()> {
    let mut vault = open_vault(cli)?;
    let saved = vault.update::<PasswordRecord>(id, patch)?;
    output::sync_issues(&saved.issues);

    let record = saved.value.ok_or_else(|| not_found(id))?;
    output::success(&format!("Password for '{}' updated", record.site_name));
    Ok(())
}

fn delete(cli: &Cli, id: &str, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete password '{id}'?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    let mut vault = open_vault(cli)?;
    let saved = vault.remove::<PasswordRecord>(id)?;
    output::sync_issues(&saved.issues);

    if saved.value {
        output::success(&format!("Deleted password '{id}'"));
    } else {
        output::info(&format!("No password with id '{id}'; nothing to delete."));
    }
    Ok(())
}

fn search(cli: &Cli, query: &str) -> Result<()> {
    let vault = open_vault(cli)?;
    let hits = vault.search::<PasswordRecord>(query)?;
    if hits.is_empty() {
        output::info(&format!("No passwords match '{query}'."));
        return Ok(());
    }
    output::print_passwords_table(&hits);
    Ok(())
}

fn not_found(id: &str) -> SecuraError {
    SecuraError::RecordNotFound {
        kind: "password",
        id: id.to_string(),
    }
}
