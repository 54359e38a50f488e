//! Reversible text codecs for record lists at rest.
//!
//! `base64` and `xor` are obfuscation only: they keep secrets from being
//! stored verbatim but offer no confidentiality against anyone who reads
//! this code.  `sealed` is authenticated encryption under a passphrase
//! and is opt-in (see `sealed`).
//!
//! Every codec maps text to text so blobs fit both the key-value store
//! and the remote metadata bag unchanged.

pub mod sealed;

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::crypto::Argon2Params;
use crate::errors::{Result, SecuraError};
use crate::session::UserId;

pub use sealed::SealedCodec;

/// Which codec a vault uses, as named in `.secura.toml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    #[default]
    Base64,
    Xor,
    Sealed,
}

impl FromStr for CodecKind {
    type Err = SecuraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "base64" => Ok(Self::Base64),
            "xor" => Ok(Self::Xor),
            "sealed" => Ok(Self::Sealed),
            other => Err(SecuraError::ConfigError(format!(
                "unknown codec '{other}' — use base64, xor, or sealed"
            ))),
        }
    }
}

/// Everything needed to build a `Codec` once the user is known.
#[derive(Clone, Default)]
pub struct CodecConfig {
    pub kind: CodecKind,
    /// Only read by the sealed codec.
    pub passphrase: Option<Zeroizing<String>>,
    pub argon2: Argon2Params,
}

impl fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecConfig")
            .field("kind", &self.kind)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .field("argon2", &self.argon2)
            .finish()
    }
}

impl CodecConfig {
    pub fn new(kind: CodecKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Build the codec for one user's blobs.
    pub fn build(&self, user: &UserId) -> Result<Codec> {
        match self.kind {
            CodecKind::Base64 => Ok(Codec::Base64),
            CodecKind::Xor => Ok(Codec::Xor(xor_keystream(user.as_str()))),
            CodecKind::Sealed => {
                let passphrase = self
                    .passphrase
                    .clone()
                    .ok_or(SecuraError::MissingPassphrase)?;
                Ok(Codec::Sealed(SealedCodec::new(
                    passphrase,
                    user.as_str(),
                    self.argon2,
                )))
            }
        }
    }
}

/// A codec bound to one user.
pub enum Codec {
    Base64,
    /// Repeating keystream derived from the user id.
    Xor([u8; 32]),
    Sealed(SealedCodec),
}

impl Codec {
    /// Turn plain text into an opaque, text-safe string.
    pub fn encode(&self, plain: &str) -> Result<String> {
        match self {
            Self::Base64 => Ok(BASE64.encode(plain.as_bytes())),
            Self::Xor(key) => Ok(BASE64.encode(xor_with(key, plain.as_bytes()))),
            Self::Sealed(codec) => codec.encode(plain),
        }
    }

    /// Reverse `encode`.
    ///
    /// Malformed input is `CorruptData`.  The sealed codec additionally
    /// reports `DecryptionFailed` when the tag does not verify.
    pub fn decode(&self, opaque: &str) -> Result<String> {
        match self {
            Self::Base64 => utf8(decode_base64(opaque)?),
            Self::Xor(key) => utf8(xor_with(key, &decode_base64(opaque)?)),
            Self::Sealed(codec) => codec.decode(opaque),
        }
    }
}

/// Serialize and encode a record list.
///
/// Returns `None` for an empty list: empty vaults are represented by the
/// absence of a blob, never by an encoded `[]`.
pub fn encode_records<R: Serialize>(records: &[R], codec: &Codec) -> Result<Option<String>> {
    if records.is_empty() {
        return Ok(None);
    }
    let json = serde_json::to_string(records)
        .map_err(|e| SecuraError::SerializationError(format!("records: {e}")))?;
    codec.encode(&json).map(Some)
}

/// Decode and parse a record list produced by `encode_records`.
pub fn decode_records<R: DeserializeOwned>(blob: &str, codec: &Codec) -> Result<Vec<R>> {
    let json = codec.decode(blob)?;
    if json.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&json).map_err(|e| SecuraError::CorruptData(format!("record JSON: {e}")))
}

fn decode_base64(opaque: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(opaque.trim())
        .map_err(|e| SecuraError::CorruptData(format!("base64: {e}")))
}

fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| SecuraError::CorruptData("decoded text is not UTF-8".into()))
}

fn xor_keystream(user_id: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"secura-xor:");
    hasher.update(user_id.as_bytes());
    hasher.finalize().into()
}

fn xor_with(key: &[u8; 32], data: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(byte, k)| byte ^ k)
        .collect()
}
