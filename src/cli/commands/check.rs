//! `secura check` — look a password up in the breach corpus.

use crate::breach::{BreachChecker, HttpRangeLookup};
use crate::cli::output;
use crate::cli::{load_settings, read_secret};
use crate::errors::Result;

/// Execute the `check` command.
pub fn execute(password: Option<&str>) -> Result<()> {
    let (_, settings) = load_settings()?;

    let candidate = match password {
        Some(pw) => {
            output::warning("Password provided on command line — it may appear in shell history.");
            pw.to_string()
        }
        None => read_secret("Password to check")?.to_string(),
    };

    let checker = BreachChecker::new(HttpRangeLookup::new(
        &settings.breach_api,
        settings.http_timeout(),
    ));
    let report = checker.check(&candidate)?;
    output::print_breach(&report);
    Ok(())
}
