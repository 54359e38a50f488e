use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use secura::cli::{Cli, Commands};
use secura::generator::GeneratorOptions;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pipeable.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("SECURA_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        Commands::Password { ref action } => secura::cli::commands::password::execute(&cli, action),
        Commands::Card { ref action } => secura::cli::commands::card::execute(&cli, action),
        Commands::Check { ref password } => {
            secura::cli::commands::check::execute(password.as_deref())
        }
        Commands::Generate {
            length,
            no_uppercase,
            no_lowercase,
            no_digits,
            no_symbols,
        } => secura::cli::commands::generate::execute(&GeneratorOptions {
            length,
            uppercase: !no_uppercase,
            lowercase: !no_lowercase,
            digits: !no_digits,
            symbols: !no_symbols,
        }),
        Commands::Report => secura::cli::commands::report::execute(&cli),
        Commands::Export { kind, ref dir } => {
            secura::cli::commands::export::execute(&cli, kind, dir.as_deref())
        }
        Commands::Import { kind, ref file } => {
            secura::cli::commands::import_cmd::execute(&cli, kind, file)
        }
        Commands::Wipe { force } => secura::cli::commands::wipe::execute(&cli, force),
        Commands::Completions { shell } => secura::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        secura::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
