//! Password generation command.

use clap::Args;
use console::{style, StyledObject};
use passvault_core::generator::{self, MAX_LENGTH, MIN_LENGTH};
use passvault_core::{Config, PasswordPolicy, Strength};

/// Generate command arguments.
///
/// Flags override the `generator` section of the config file.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Password length
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(MIN_LENGTH as i64..=MAX_LENGTH as i64))]
    pub length: Option<u8>,

    /// Exclude digits
    #[arg(long)]
    pub no_numbers: bool,

    /// Exclude letters
    #[arg(long)]
    pub no_letters: bool,

    /// Include symbols
    #[arg(long)]
    pub symbols: bool,

    /// Allow look-alike characters (0, O, o, 1, l, I)
    #[arg(long)]
    pub allow_look_alikes: bool,

    /// Number of passwords to print
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

impl GenerateArgs {
    /// Resolve the effective policy from config defaults and flags.
    pub fn policy(&self, config: &Config) -> PasswordPolicy {
        let mut policy = PasswordPolicy::from(&config.generator);
        if let Some(length) = self.length {
            policy.length = usize::from(length);
        }
        if self.no_numbers {
            policy.numbers = false;
        }
        if self.no_letters {
            policy.letters = false;
        }
        if self.symbols {
            policy.symbols = true;
        }
        if self.allow_look_alikes {
            policy.exclude_look_alikes = false;
        }
        policy
    }
}

fn strength_label(strength: Strength) -> StyledObject<Strength> {
    match strength {
        Strength::Weak => style(strength).red(),
        Strength::Medium => style(strength).yellow(),
        Strength::Strong => style(strength).blue(),
        Strength::VeryStrong => style(strength).green(),
    }
}

/// Run the generate command.
pub fn run(args: GenerateArgs, config: &Config) -> anyhow::Result<()> {
    let policy = args.policy(config);
    for _ in 0..args.count {
        let password = generator::generate(&policy)?;
        println!("{}", password.expose_secret());
    }
    eprintln!("Strength: {}", strength_label(policy.strength()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.generator.symbols = true;
        config.generator.length = 20;

        let args = GenerateArgs {
            length: Some(8),
            no_numbers: true,
            allow_look_alikes: true,
            ..Default::default()
        };
        let policy = args.policy(&config);
        assert_eq!(policy.length, 8);
        assert!(!policy.numbers);
        assert!(policy.letters);
        assert!(policy.symbols);
        assert!(!policy.exclude_look_alikes);
    }

    #[test]
    fn test_no_flags_uses_config() {
        let config = Config::default();
        let policy = GenerateArgs::default().policy(&config);
        assert_eq!(policy, PasswordPolicy::default());
    }

    #[test]
    fn test_strength_follows_effective_length() {
        let config = Config::default();
        let args = GenerateArgs {
            length: Some(16),
            ..Default::default()
        };
        assert_eq!(args.policy(&config).strength(), Strength::VeryStrong);
        assert_eq!(GenerateArgs::default().policy(&config).strength(), Strength::Strong);
        assert_eq!(
            strength_label(Strength::Weak).force_styling(false).to_string(),
            "Weak"
        );
    }

    #[test]
    fn test_empty_charset_is_an_error() {
        let args = GenerateArgs {
            no_numbers: true,
            no_letters: true,
            count: 1,
            ..Default::default()
        };
        assert!(run(args, &Config::default()).is_err());
    }
}
