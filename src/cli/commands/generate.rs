//! `secura generate` — print a random password.

use crate::cli::output;
use crate::errors::Result;
use crate::generator::{self, GeneratorOptions};

/// Execute the `generate` command.
///
/// The password goes to stdout on its own line so it can be piped.
pub fn execute(options: &GeneratorOptions) -> Result<()> {
    let password = generator::generate(options)?;
    println!("{password}");
    output::tip(&format!(
        "Strength: {}",
        generator::strength_label(&password)
    ));
    Ok(())
}
