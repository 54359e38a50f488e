//! `secura report` — vault health summary.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::vault::VaultReport;

/// Execute the `report` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli)?;
    let report = VaultReport::from_snapshot(vault.snapshot());
    output::print_report(&report);
    Ok(())
}
