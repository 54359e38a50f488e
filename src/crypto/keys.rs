//! Binding a passphrase key to one user with HKDF-SHA256.
//!
//! The Argon2id output is the input keying material; the user id goes
//! into `info`, so the same passphrase produces unrelated keys for
//! different accounts.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{Result, SecuraError};

/// Length of derived keys (256 bits).
const KEY_LEN: usize = 32;

/// Derive the AES key that seals `user_id`'s blobs.
pub fn derive_user_key(passphrase_key: &[u8], user_id: &str) -> Result<[u8; KEY_LEN]> {
    let info = format!("secura-sealed:{user_id}");
    let hk = Hkdf::<Sha256>::new(None, passphrase_key);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info.as_bytes(), &mut okm)
        .map_err(|e| SecuraError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// A 32-byte sealing key that is wiped when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SealingKey {
    bytes: [u8; KEY_LEN],
}

impl SealingKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
