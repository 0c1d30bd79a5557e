//! Encryption key generation.

use console::style;
use passvault_core::env::vars;
use passvault_vault::SecretKey;

/// Print a fresh 32-byte key as hex, with setup notes on stderr.
///
/// Only the key goes to stdout so it can be piped into a secrets manager.
pub fn run() -> anyhow::Result<()> {
    let key = SecretKey::generate();
    println!("{}", key.to_hex());

    eprintln!();
    eprintln!("{}", style("Store this key somewhere safe:").bold());
    eprintln!("  export {}=<key>", vars::PASSVAULT_ENCRYPTION_KEY);
    eprintln!();
    eprintln!("{}", style("Security notes").yellow().bold());
    eprintln!("  - Never commit the key to version control.");
    eprintln!("  - Losing the key makes every stored entry unreadable.");
    eprintln!("  - Changing the key does not re-encrypt existing entries.");

    Ok(())
}
