//! Remote metadata sync.
//!
//! The remote side is a per-user metadata bag (a JSON object) owned by
//! the identity provider.  Vault blobs live under `secura_passwords` and
//! `secura_cards`.  Sync is best-effort: local storage stays
//! authoritative and a failed push never undoes a local change.
//!
//! This module provides:
//! - The `RemoteStore` trait used by the vault manager
//! - `HttpRemote`, talking to the metadata endpoint (`http`)
//! - `MetadataStore` and its file/memory implementations (`metadata`)
//! - `NoRemote`, for when sync is switched off

pub mod http;
pub mod metadata;

use serde_json::{Map, Value};

use crate::errors::Result;
use crate::session::UserId;
use crate::vault::RecordKind;

pub use http::HttpRemote;
pub use metadata::{JsonFileMetadata, MemoryMetadata, MetadataRemote, MetadataStore};

/// A user's opaque key-value bag.
pub type MetadataBag = Map<String, Value>;

/// Blobs found in a user's bag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteBlobs {
    pub passwords: Option<String>,
    pub cards: Option<String>,
}

impl RemoteBlobs {
    /// Pick the vault blobs out of a bag, ignoring non-string values.
    pub fn from_bag(bag: &MetadataBag) -> Self {
        let blob = |kind: RecordKind| {
            bag.get(kind.metadata_key())
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            passwords: blob(RecordKind::Passwords),
            cards: blob(RecordKind::Cards),
        }
    }

    pub fn get(&self, kind: RecordKind) -> Option<&str> {
        match kind {
            RecordKind::Passwords => self.passwords.as_deref(),
            RecordKind::Cards => self.cards.as_deref(),
        }
    }
}

/// The remote half of the dual write.
pub trait RemoteStore {
    /// Replace one kind's blob; `None` clears it.
    fn push(&mut self, user: &UserId, kind: RecordKind, blob: Option<&str>) -> Result<()>;

    /// Fetch both blobs.  Called once per identity load.
    fn pull(&self, user: &UserId) -> Result<RemoteBlobs>;
}

impl<T: RemoteStore + ?Sized> RemoteStore for Box<T> {
    fn push(&mut self, user: &UserId, kind: RecordKind, blob: Option<&str>) -> Result<()> {
        (**self).push(user, kind, blob)
    }

    fn pull(&self, user: &UserId) -> Result<RemoteBlobs> {
        (**self).pull(user)
    }
}

/// Sync disabled: pushes succeed without doing anything, pulls are empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRemote;

impl RemoteStore for NoRemote {
    fn push(&mut self, _user: &UserId, _kind: RecordKind, _blob: Option<&str>) -> Result<()> {
        Ok(())
    }

    fn pull(&self, _user: &UserId) -> Result<RemoteBlobs> {
        Ok(RemoteBlobs::default())
    }
}

/// Merge a partial bag into `bag`: `null` removes a key, anything else
/// replaces it, keys not mentioned are untouched.
pub fn merge_bag(bag: &mut MetadataBag, partial: MetadataBag) {
    for (key, value) in partial {
        if value.is_null() {
            bag.remove(&key);
        } else {
            bag.insert(key, value);
        }
    }
}

/// The partial bag a push turns into.
pub fn push_patch(kind: RecordKind, blob: Option<&str>) -> MetadataBag {
    let mut patch = MetadataBag::new();
    patch.insert(
        kind.metadata_key().to_string(),
        blob.map_or(Value::Null, |b| Value::String(b.to_string())),
    );
    patch
}
