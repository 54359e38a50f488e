use thiserror::Error;

use crate::vault::LoadState;

/// Reasons a record is rejected before it touches the vault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("card number must be 15 to 19 digits (got {0})")]
    CardNumberLength(usize),

    #[error("card number may only contain digits")]
    CardNumberNotDigits,

    #[error("expiry date '{0}' must use the MM/YY format")]
    ExpiryFormat(String),

    #[error("CVV must be 3 or 4 digits")]
    CvvFormat,

    #[error("unknown card type '{0}' — use visa, mastercard, amex, discover, or other")]
    UnknownCardType(String),

    #[error("user id '{0}' is invalid — only ASCII letters, digits, '_', '-', and '.' are allowed")]
    InvalidUserId(String),

    #[error("password length must be between {min} and {max} (got {got})")]
    GeneratorLength { min: usize, max: usize, got: usize },

    #[error("select at least one character class")]
    GeneratorNoClasses,
}

/// All errors that can occur in Secura.
#[derive(Debug, Error)]
pub enum SecuraError {
    // --- Validation ---
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    // --- Vault state ---
    #[error("Vault is not ready (state: {0:?}) — load an identity first")]
    NotReady(LoadState),

    #[error("No identity change is waiting to be loaded (state: {0:?})")]
    NoPendingLoad(LoadState),

    #[error("{kind} record '{id}' not found")]
    RecordNotFound { kind: &'static str, id: String },

    // --- Codec / crypto errors ---
    #[error("Stored data is corrupt: {0}")]
    CorruptData(String),

    #[error("Decryption failed — wrong passphrase or tampered data")]
    DecryptionFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("The sealed codec needs a passphrase (set SECURA_PASSPHRASE)")]
    MissingPassphrase,

    // --- Storage / sync ---
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Remote sync failed: {0}")]
    Remote(String),

    #[error("Breach lookup failed: {0}")]
    Breach(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Secura results.
pub type Result<T> = std::result::Result<T, SecuraError>;
