//! `secura export` — write one kind of record to a dated JSON file.
//!
//! The file is named `secura-<kind>-<YYYY-MM-DD>.json` and holds the
//! records unencoded, so treat it like the secrets it contains.

use std::path::Path;

use chrono::Local;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;
use crate::vault::{transfer, CardRecord, PasswordRecord, RecordKind};

/// Execute the `export` command.
pub fn execute(cli: &Cli, kind: RecordKind, dir: Option<&str>) -> Result<()> {
    let vault = open_vault(cli)?;
    let cwd = std::env::current_dir()?;
    let dest = dir.map_or(cwd.clone(), |d| cwd.join(Path::new(d)));
    let today = Local::now().date_naive();

    let (path, count) = match kind {
        RecordKind::Passwords => {
            let records = vault.records::<PasswordRecord>();
            (transfer::write_export(&dest, kind, records, today)?, records.len())
        }
        RecordKind::Cards => {
            let records = vault.records::<CardRecord>();
            (transfer::write_export(&dest, kind, records, today)?, records.len())
        }
    };

    output::success(&format!(
        "Exported {count} {kind} to {}",
        path.display()
    ));
    output::warning("The export is not encoded. Delete it once you are done with it.");
    Ok(())
}
