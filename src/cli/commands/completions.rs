//! `secura completions` — print a shell completion script to stdout.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

pub fn execute(shell: Shell) -> Result<()> {
    generate(shell, &mut Cli::command(), "secura", &mut io::stdout());
    Ok(())
}
