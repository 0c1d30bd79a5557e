//! PassVault command-line interface.

pub mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use passvault_core::env::vars;
use passvault_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// PassVault - encrypted password vault
#[derive(Parser)]
#[command(name = "passvault")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "PASSVAULT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new vault encryption key
    Keygen,

    /// Generate a random password
    Generate(commands::generate::GenerateArgs),

    /// Manage vault entries
    Entry(commands::entry::EntryArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Run diagnostics
    Doctor,

    /// Show version information
    Version,
}

/// Install the global tracing subscriber.
///
/// `PASSVAULT_LOG` wins over the config file; `-v` raises the default level.
/// Logs go to stderr so command output stays pipeable.
pub fn init_logging(config: &Config, verbose: u8) {
    let default = match verbose {
        0 => format!("passvault={}", config.logging.level),
        1 => "passvault=debug".to_string(),
        _ => "passvault=trace".to_string(),
    };
    let filter = EnvFilter::try_from_env(vars::PASSVAULT_LOG).unwrap_or_else(|_| default.into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config;
    match cli.command {
        Commands::Keygen => commands::keygen::run(),
        Commands::Generate(args) => {
            let config = Config::load_or_default(config_path.as_deref())?;
            commands::generate::run(args, &config)
        }
        Commands::Entry(args) => {
            let config = Config::load_or_default(config_path.as_deref())?;
            commands::entry::run(args, &config).await
        }
        Commands::Config(args) => commands::config::run(args, config_path.as_deref()),
        Commands::Doctor => commands::doctor::run(config_path.as_deref()).await,
        Commands::Version => {
            println!("passvault {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
