//! Charset-based random password generation.
//!
//! Builds a character set from the selected classes, optionally strips
//! characters that are easy to misread, and draws each position uniformly
//! from what is left.

use std::fmt;

use rand::Rng;

use crate::error::GeneratorError;
use crate::secret::SecretString;

pub const DIGITS: &str = "0123456789";
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
pub const LOOK_ALIKES: &str = "0Oo1lI";

pub const MIN_LENGTH: usize = 6;
pub const MAX_LENGTH: usize = 30;
pub const DEFAULT_LENGTH: usize = 12;

/// Which character classes to draw from, and how many characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub numbers: bool,
    pub letters: bool,
    pub symbols: bool,
    pub exclude_look_alikes: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            numbers: true,
            letters: true,
            symbols: false,
            exclude_look_alikes: true,
        }
    }
}

impl PasswordPolicy {
    /// Strength of every password this policy produces.
    pub fn strength(&self) -> Strength {
        Strength::from_length(self.length)
    }

    /// The distinct characters a password under this policy may contain.
    pub fn charset(&self) -> Vec<char> {
        let mut charset = String::new();
        if self.numbers {
            charset.push_str(DIGITS);
        }
        if self.letters {
            charset.push_str(LETTERS);
        }
        if self.symbols {
            charset.push_str(SYMBOLS);
        }

        charset
            .chars()
            .filter(|c| !(self.exclude_look_alikes && LOOK_ALIKES.contains(*c)))
            .collect()
    }

    fn check(&self) -> Result<Vec<char>, GeneratorError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(GeneratorError::InvalidLength {
                length: self.length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }
        let charset = self.charset();
        if charset.is_empty() {
            return Err(GeneratorError::EmptyCharset);
        }
        Ok(charset)
    }
}

/// Length-based strength rating shown next to a generated password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    /// Rate a password of `length` characters.
    pub fn from_length(length: usize) -> Self {
        match length {
            0..=7 => Self::Weak,
            8..=11 => Self::Medium,
            12..=15 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        })
    }
}

/// Generate a password from the OS random source.
pub fn generate(policy: &PasswordPolicy) -> Result<SecretString, GeneratorError> {
    generate_with(policy, &mut rand::rngs::OsRng)
}

/// Generate a password from the given random source.
pub fn generate_with<R: Rng + ?Sized>(
    policy: &PasswordPolicy,
    rng: &mut R,
) -> Result<SecretString, GeneratorError> {
    let charset = policy.check()?;
    let password: String = (0..policy.length)
        .map(|_| charset[rng.gen_range(0..charset.len())])
        .collect();
    Ok(SecretString::new(password))
}
