//! Local store adapter: record lists in, opaque blobs at rest.

use tracing::{debug, info};

use super::KeyValueStore;
use crate::codec::{decode_records, encode_records, Codec};
use crate::errors::{Result, SecuraError};
use crate::session::UserId;
use crate::vault::{Record, RecordKind};

/// Reads and writes `secura_<kind>_<userId>` entries.
///
/// Local storage is the authoritative copy of a user's vault.
#[derive(Debug, Clone)]
pub struct LocalStore<S> {
    store: S,
}

impl<S: KeyValueStore> LocalStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Load one kind of record for `user`.
    ///
    /// A missing entry yields an empty list.  An entry that cannot be read
    /// as text, decoded, or parsed is evicted and also yields an empty
    /// list.  A sealed blob that fails authentication is left in place and
    /// the error is returned, since a wrong passphrase looks the same.
    pub fn load<R: Record>(&mut self, user: &UserId, codec: &Codec) -> Result<Vec<R>> {
        let key = R::KIND.storage_key(user);
        let blob = match self.store.get(&key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Ok(Vec::new()),
            Err(SecuraError::CorruptData(reason)) => return self.evict(&key, &reason),
            Err(e) => return Err(e),
        };

        match decode_records::<R>(&blob, codec) {
            Ok(records) => {
                debug!(%key, count = records.len(), "loaded local records");
                Ok(records)
            }
            Err(SecuraError::CorruptData(reason)) => self.evict(&key, &reason),
            Err(e) => Err(e),
        }
    }

    fn evict<R>(&mut self, key: &str, reason: &str) -> Result<Vec<R>> {
        info!(%key, %reason, "evicting corrupt local entry");
        self.store.remove(key)?;
        Ok(Vec::new())
    }

    /// Encode and store `records`, or delete the entry when empty.
    pub fn save<R: Record>(&mut self, user: &UserId, records: &[R], codec: &Codec) -> Result<()> {
        let blob = encode_records(records, codec)?;
        self.write_blob(user, R::KIND, blob.as_deref())
    }

    /// Store an already-encoded blob; `None` deletes the entry.
    pub fn write_blob(&mut self, user: &UserId, kind: RecordKind, blob: Option<&str>) -> Result<()> {
        let key = kind.storage_key(user);
        match blob {
            Some(blob) => self.store.set(&key, blob),
            None => self.store.remove(&key),
        }
    }

    pub fn read_blob(&self, user: &UserId, kind: RecordKind) -> Result<Option<String>> {
        self.store.get(&kind.storage_key(user))
    }
}
