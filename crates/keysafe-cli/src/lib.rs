//! Keysafe command-line interface.

pub mod commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use keysafe_core::env::{self, vars};
use keysafe_core::{paths, Config};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keysafe - namespaced secrets in the system keychain
#[derive(Parser)]
#[command(name = "keysafe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "KEYSAFE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Store a secret (prompts for the value if none is given)
    Set(commands::secrets::SetArgs),

    /// Print a stored secret
    Get(commands::secrets::GetArgs),

    /// Delete a secret (succeeds if it does not exist)
    Delete(commands::secrets::KeyArgs),

    /// Check whether a secret exists
    Contains(commands::secrets::KeyArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => paths::config_file()?,
    };

    // A broken config file must not block `config init --force`.
    let loaded = load_config(&config_path);
    init_logging(cli.verbose, loaded.as_ref().ok());
    debug!(path = %config_path.display(), loaded = loaded.is_ok(), "Resolved config");

    match cli.command {
        Commands::Set(args) => commands::secrets::set(args, &validated(loaded)?).await,
        Commands::Get(args) => commands::secrets::get(args, &validated(loaded)?).await,
        Commands::Delete(args) => commands::secrets::delete(args, &validated(loaded)?).await,
        Commands::Contains(args) => commands::secrets::contains(args, &validated(loaded)?).await,
        Commands::Config(args) => commands::config::run(args, &config_path),
        Commands::Version => {
            println!("keysafe {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validated(loaded: anyhow::Result<Config>) -> anyhow::Result<Config> {
    let config = loaded?;
    config.validate()?;
    Ok(config)
}

/// Load the config file (defaults if absent) and apply environment overrides.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(path)?;
    config.apply_env_overrides()?;
    Ok(config)
}

/// Pick the log filter: `KEYSAFE_LOG`, then `-v` count, then the config level.
pub fn log_filter(verbose: u8, config: Option<&Config>) -> String {
    if let Some(filter) = env::get_var(vars::KEYSAFE_LOG) {
        return filter;
    }
    let level = match verbose {
        0 => config
            .map(|c| c.logging.level.as_filter())
            .unwrap_or("warn"),
        1 => "debug",
        _ => "trace",
    };
    format!("keysafe={level},keysafe_cli={level},keysafe_secrets={level},keysafe_core={level}")
}

fn init_logging(verbose: u8, config: Option<&Config>) {
    // Ignore the error if a subscriber is already installed (tests).
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(log_filter(verbose, config)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
