//! Diagnostic commands.

use std::path::Path;

use console::{style, Emoji};
use passvault_core::{env, paths, Config, ConfigError};
use passvault_vault::{FileVaultStore, SecretKey};

static CHECK: Emoji = Emoji("✓", "+");
static CROSS: Emoji = Emoji("✗", "x");
static WARN: Emoji = Emoji("⚠", "!");

/// Run the doctor command.
pub async fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    println!("PassVault Doctor\n");

    let mut errors = 0;
    let mut warnings = 0;

    if let Err(e) = env::load_dotenv() {
        println!("  {} Failed to read .env file: {}", style(WARN).yellow(), e);
        warnings += 1;
    }

    // Check config
    println!("Checking configuration...");

    let path = match config_path {
        Some(p) => Ok(p.to_path_buf()),
        None => paths::config_file(),
    };
    let loaded = match path {
        Ok(p) => Config::load(&p),
        Err(e) => Err(e),
    };
    let config = match loaded {
        Ok(config) => {
            println!("  {} Configuration loaded", style(CHECK).green());
            match config.validate() {
                Ok(_) => println!("  {} Configuration valid", style(CHECK).green()),
                Err(e) => {
                    println!("  {} Configuration invalid: {}", style(CROSS).red(), e);
                    errors += 1;
                }
            }
            config
        }
        Err(ConfigError::NotFound(_)) => {
            println!("  {} Configuration file not found, using defaults", style(WARN).yellow());
            println!("    Run 'passvault config init' to create one");
            warnings += 1;
            Config::default()
        }
        Err(e) => {
            println!("  {} Configuration error: {}", style(CROSS).red(), e);
            errors += 1;
            Config::default()
        }
    };

    // Check encryption key
    println!("\nChecking encryption key...");

    match SecretKey::from_env(&config.vault.key_env) {
        Ok(_) => println!(
            "  {} {} holds a valid 256-bit key",
            style(CHECK).green(),
            config.vault.key_env
        ),
        Err(e) => {
            println!("  {} {}", style(CROSS).red(), e);
            println!("    Run 'passvault keygen' to create one");
            errors += 1;
        }
    }

    // Check vault file
    println!("\nChecking vault file...");

    match config.vault_path() {
        Ok(path) => match FileVaultStore::open(&path).await {
            Ok(_) => {
                if path.exists() {
                    println!("  {} Vault file readable: {:?}", style(CHECK).green(), path);
                } else {
                    println!(
                        "  {} Vault file not created yet: {:?}",
                        style(WARN).yellow(),
                        path
                    );
                    warnings += 1;
                }
            }
            Err(e) => {
                println!("  {} Vault file error: {}", style(CROSS).red(), e);
                errors += 1;
            }
        },
        Err(e) => {
            println!("  {} Failed to determine vault path: {}", style(CROSS).red(), e);
            errors += 1;
        }
    }

    // Summary
    println!("\n{}", style("Summary").bold());
    println!("  Errors: {}", if errors > 0 { style(errors).red() } else { style(errors).green() });
    println!("  Warnings: {}", if warnings > 0 { style(warnings).yellow() } else { style(warnings).green() });

    if errors > 0 {
        anyhow::bail!("{} error(s) found", errors);
    }

    Ok(())
}
