//! Password generation and strength scoring.

use rand::Rng;

use crate::errors::{Result, ValidationError};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

/// Draw `length` characters uniformly from the selected classes.
pub fn generate(options: &GeneratorOptions) -> Result<String> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&options.length) {
        return Err(ValidationError::GeneratorLength {
            min: MIN_LENGTH,
            max: MAX_LENGTH,
            got: options.length,
        }
        .into());
    }

    let pool: Vec<char> = [
        (options.uppercase, UPPERCASE),
        (options.lowercase, LOWERCASE),
        (options.digits, DIGITS),
        (options.symbols, SYMBOLS),
    ]
    .iter()
    .filter(|(enabled, _)| *enabled)
    .flat_map(|(_, chars)| chars.chars())
    .collect();

    if pool.is_empty() {
        return Err(ValidationError::GeneratorNoClasses.into());
    }

    let mut rng = rand::rng();
    Ok((0..options.length)
        .map(|_| pool[rng.random_range(0..pool.len())])
        .collect())
}

/// Coarse password strength, 0 (empty) to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strength {
    pub score: u8,
}

impl Strength {
    pub fn label(self, empty: bool) -> &'static str {
        if empty {
            return "Empty";
        }
        match self.score {
            0 => "Very Weak",
            1 => "Weak",
            2 => "Fair",
            3 => "Good",
            4 => "Strong",
            _ => "Very Strong",
        }
    }
}

/// One point each for length ≥ 8, length ≥ 12, and each character
/// class present, capped at 5.
pub fn strength(password: &str) -> Strength {
    let len = password.chars().count();
    let checks = [
        len >= 8,
        len >= 12,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|passed| **passed).count().min(5);
    Strength { score: score as u8 }
}

/// Human label for `password`.
pub fn strength_label(password: &str) -> &'static str {
    strength(password).label(password.is_empty())
}
