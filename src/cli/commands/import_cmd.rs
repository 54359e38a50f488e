//! `secura import` — add records from a JSON export.

use std::fs;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{Result, SecuraError};
use crate::vault::{transfer, CardRecord, PasswordRecord, Record, RecordKind, Saved};

/// Execute the `import` command.
pub fn execute(cli: &Cli, kind: RecordKind, file: &str) -> Result<()> {
    let text = fs::read_to_string(file)
        .map_err(|e| SecuraError::CommandFailed(format!("cannot read '{file}': {e}")))?;

    let mut vault = open_vault(cli)?;
    let saved = match kind {
        RecordKind::Passwords => import::<PasswordRecord>(&mut vault, &text)?,
        RecordKind::Cards => import::<CardRecord>(&mut vault, &text)?,
    };
    output::sync_issues(&saved.issues);

    if saved.value == 0 {
        output::info(&format!("Nothing new to import; every {} already exists.", kind.noun()));
    } else {
        output::success(&format!("Imported {} {kind} from {file}", saved.value));
    }
    Ok(())
}

fn import<T: Record>(vault: &mut crate::cli::CliVault, text: &str) -> Result<Saved<usize>> {
    let records: Vec<T> = transfer::parse_import(text)?;
    vault.import(records)
}
