//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::codec::CodecKind;
use crate::config::Settings;
use crate::errors::{Result, SecuraError};
use crate::remote::RemoteStore;
use crate::session::{Identity, UserId};
use crate::storage::FileStore;
use crate::vault::{RecordKind, VaultManager};

/// The vault as the CLI uses it: files on disk plus whichever remote
/// `.secura.toml` selects.
pub type CliVault = VaultManager<FileStore, Box<dyn RemoteStore>>;

/// Secura CLI: password and payment-card vault.
#[derive(Parser)]
#[command(name = "secura", about = "Password and payment-card vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// User id to act as (default: anonymous, or `default_user` from .secura.toml)
    #[arg(short, long, env = "SECURA_USER", global = true)]
    pub user: Option<String>,

    /// Local data directory (default: .secura)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Manage saved passwords
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },

    /// Manage saved payment cards
    Card {
        #[command(subcommand)]
        action: CardAction,
    },

    /// Check whether a password appears in known breaches
    Check {
        /// Password to check (omit for interactive prompt)
        password: Option<String>,
    },

    /// Generate a random password
    Generate {
        /// Number of characters (4-128)
        #[arg(short, long, default_value_t = 16)]
        length: usize,
        /// Leave out A-Z
        #[arg(long)]
        no_uppercase: bool,
        /// Leave out a-z
        #[arg(long)]
        no_lowercase: bool,
        /// Leave out 0-9
        #[arg(long)]
        no_digits: bool,
        /// Leave out symbols
        #[arg(long)]
        no_symbols: bool,
    },

    /// Summarize vault health (weak and reused passwords)
    Report,

    /// Export one kind of record to a dated JSON file
    Export {
        /// passwords or cards
        kind: RecordKind,
        /// Directory to write into (default: current directory)
        #[arg(short, long)]
        dir: Option<String>,
    },

    /// Import records from a JSON export
    Import {
        /// passwords or cards
        kind: RecordKind,
        /// Path to the JSON file
        file: String,
    },

    /// Delete every password and card for the current user
    Wipe {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Password subcommands.
#[derive(clap::Subcommand)]
pub enum PasswordAction {
    /// Save a new password
    Add {
        /// Site or app name
        #[arg(long)]
        site: String,
        /// Login name
        #[arg(long)]
        username: String,
        /// Password (omit for interactive prompt or piped stdin)
        #[arg(long)]
        password: Option<String>,
        /// Generate a 16-character password instead of asking for one
        #[arg(long, conflicts_with = "password")]
        generate: bool,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List saved passwords
    List,

    /// Show one password
    Show {
        /// Record id
        id: String,
        /// Print the password instead of masking it
        #[arg(long)]
        reveal: bool,
        /// Copy the password to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Change fields of a saved password
    Update {
        /// Record id
        id: String,
        #[arg(long)]
        site: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a saved password
    Delete {
        /// Record id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Find passwords by site, username, or URL
    Search {
        query: String,
    },
}

/// Card subcommands.
#[derive(clap::Subcommand)]
pub enum CardAction {
    /// Save a new card
    Add {
        /// Label for the card
        #[arg(long)]
        name: String,
        /// visa, mastercard, amex, discover, or other
        #[arg(long = "type", default_value = "other")]
        card_type: String,
        /// Name printed on the card
        #[arg(long)]
        holder: String,
        /// Card number (omit for interactive prompt or piped stdin)
        #[arg(long)]
        number: Option<String>,
        /// Expiry as MM/YY
        #[arg(long)]
        expiry: String,
        /// Security code (omit for interactive prompt or piped stdin)
        #[arg(long)]
        cvv: Option<String>,
    },

    /// List saved cards with masked numbers
    List,

    /// Show one card
    Show {
        /// Record id
        id: String,
        /// Print the full number and CVV
        #[arg(long)]
        reveal: bool,
    },

    /// Change fields of a saved card
    Update {
        /// Record id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        card_type: Option<String>,
        #[arg(long)]
        holder: Option<String>,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        expiry: Option<String>,
        #[arg(long)]
        cvv: Option<String>,
    },

    /// Delete a saved card
    Delete {
        /// Record id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Find cards by name, cardholder, or type
    Search {
        query: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.secura.toml` from the working directory.
pub fn load_settings() -> Result<(PathBuf, Settings)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    Ok((cwd, settings))
}

/// `--user` (or `SECURA_USER`) wins over `default_user`; neither means anonymous.
pub fn resolve_user(cli: &Cli, settings: &Settings) -> Result<UserId> {
    let raw = cli
        .user
        .as_deref()
        .or(settings.default_user.as_deref())
        .unwrap_or_default();
    UserId::parse(raw)
}

/// Get the sealed-codec passphrase, trying in order:
/// 1. `SECURA_PASSPHRASE` env var (CI/scripts)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("SECURA_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    if !io::stdin().is_terminal() {
        return Err(SecuraError::MissingPassphrase);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault passphrase")
        .interact()
        .map_err(|e| SecuraError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Read a secret that was not given on the command line.
///
/// Piped stdin supplies one line per call, so several secrets can be
/// piped in order.  Otherwise the user gets a hidden prompt.
pub fn read_secret(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        let value = line.trim_end_matches(['\r', '\n']).to_string();
        if value.is_empty() {
            return Err(SecuraError::CommandFailed(format!(
                "expected {prompt} on stdin"
            )));
        }
        return Ok(Zeroizing::new(value));
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| SecuraError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Ask before doing something destructive.  Returns `true` when confirmed.
///
/// Without a terminal there is nobody to ask, so the caller must pass
/// `--force` instead.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        return Err(SecuraError::CommandFailed(format!(
            "{prompt} (no terminal to confirm; pass --force)"
        )));
    }

    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| SecuraError::CommandFailed(format!("confirm prompt: {e}")))
}

/// Open the vault for the current user and load it.
///
/// Sync problems during the load are printed as warnings; the vault is
/// still usable from local data.
pub fn open_vault(cli: &Cli) -> Result<CliVault> {
    let (cwd, settings) = load_settings()?;
    let user = resolve_user(cli, &settings)?;

    let data_dir = match &cli.data_dir {
        Some(dir) => cwd.join(dir),
        None => settings.data_path(&cwd),
    };

    let passphrase = match settings.codec {
        CodecKind::Sealed => Some(prompt_passphrase()?),
        CodecKind::Base64 | CodecKind::Xor => None,
    };

    let mut vault = VaultManager::new(
        FileStore::new(data_dir),
        settings.remote(&cwd),
        settings.codec_config(passphrase),
    );

    if let Some(report) = vault.switch_identity(Identity::ready(user))? {
        output::sync_issues(&report.issues);
    }
    Ok(vault)
}
