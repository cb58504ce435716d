//! Configuration management commands.

use std::path::Path;

use clap::Args;
use keysafe_core::Config;

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file plus environment overrides)
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the config command.
pub fn run(args: ConfigArgs, path: &Path) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = crate::load_config(path)?;
            println!("{}", config.to_json5()?);
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            init(path, force)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

/// Write the default configuration to `path`.
pub fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default().save(path)?;
    Ok(())
}
