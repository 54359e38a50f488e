//! One module per subcommand.

pub mod card;
pub mod check;
pub mod completions;
pub mod export;
pub mod generate;
pub mod import_cmd;
pub mod password;
pub mod report;
pub mod wipe;
