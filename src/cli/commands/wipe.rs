//! `secura wipe` — delete every record for the current user.

use crate::cli::output;
use crate::cli::{confirm, open_vault, Cli};
use crate::errors::Result;

/// Execute the `wipe` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let mut vault = open_vault(cli)?;

    if vault.snapshot().is_empty() {
        output::info("The vault is already empty.");
        return Ok(());
    }

    if !force
        && !confirm(&format!(
            "Delete all {} saved items? This cannot be undone.",
            vault.snapshot().len()
        ))?
    {
        output::info("Cancelled.");
        return Ok(());
    }

    let saved = vault.clear()?;
    output::sync_issues(&saved.issues);
    output::success(&format!("Deleted {} items", saved.value));
    Ok(())
}
