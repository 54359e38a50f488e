//! Passphrase-sealed blobs.
//!
//! Layout before base64:
//!   [ 16-byte Argon2 salt | 12-byte nonce | ciphertext + 16-byte tag ]
//!
//! A fresh salt is drawn for every blob, so no key material is ever
//! persisted next to the data.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::kdf::SALT_LEN;
use crate::crypto::{derive_passphrase_key, derive_user_key, generate_salt, open, seal};
use crate::crypto::{Argon2Params, SealingKey};
use crate::errors::{Result, SecuraError};

pub struct SealedCodec {
    passphrase: Zeroizing<String>,
    user_id: String,
    params: Argon2Params,
}

impl SealedCodec {
    pub fn new(passphrase: Zeroizing<String>, user_id: &str, params: Argon2Params) -> Self {
        Self {
            passphrase,
            user_id: user_id.to_string(),
            params,
        }
    }

    pub fn encode(&self, plain: &str) -> Result<String> {
        let salt = generate_salt();
        let key = self.key_for(&salt)?;
        let sealed = seal(key.as_bytes(), plain.as_bytes())?;

        let mut out = Vec::with_capacity(SALT_LEN + sealed.len());
        out.extend_from_slice(&salt);
        out.extend_from_slice(&sealed);
        Ok(BASE64.encode(out))
    }

    pub fn decode(&self, opaque: &str) -> Result<String> {
        let raw = BASE64
            .decode(opaque.trim())
            .map_err(|e| SecuraError::CorruptData(format!("base64: {e}")))?;
        if raw.len() < SALT_LEN {
            return Err(SecuraError::CorruptData("sealed blob is truncated".into()));
        }

        let (salt, sealed) = raw.split_at(SALT_LEN);
        let key = self.key_for(salt)?;
        let plain = open(key.as_bytes(), sealed)?;

        String::from_utf8(plain).map_err(|e| {
            let mut bad = e.into_bytes();
            bad.zeroize();
            SecuraError::CorruptData("decoded text is not UTF-8".into())
        })
    }

    fn key_for(&self, salt: &[u8]) -> Result<SealingKey> {
        let mut passphrase_key =
            derive_passphrase_key(self.passphrase.as_bytes(), salt, &self.params)?;
        let user_key = derive_user_key(&passphrase_key, &self.user_id);
        passphrase_key.zeroize();
        Ok(SealingKey::new(user_key?))
    }
}
