//! Cryptographic primitives behind the sealed codec.
//!
//! This module provides:
//! - AES-256-GCM sealing and opening (`encryption`)
//! - Argon2id passphrase-based key derivation (`kdf`)
//! - HKDF-based binding of the passphrase key to a user id (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

pub use encryption::{open, seal};
pub use kdf::{derive_passphrase_key, generate_salt, Argon2Params};
pub use keys::{derive_user_key, SealingKey};
