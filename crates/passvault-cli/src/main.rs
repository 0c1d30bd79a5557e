//! PassVault CLI entry point.

use clap::Parser;
use passvault_cli::{init_logging, run, Cli};
use passvault_core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // A broken config file should not stop `config init` or `doctor` from
    // running, so fall back to defaults for logging setup.
    let config = Config::load_or_default(cli.config.as_deref()).unwrap_or_default();
    init_logging(&config, cli.verbose);

    run(cli).await
}
