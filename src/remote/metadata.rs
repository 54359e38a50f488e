//! Metadata stores: the identity provider's per-user bag.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{merge_bag, push_patch, MetadataBag, RemoteBlobs, RemoteStore};
use crate::errors::{Result, SecuraError};
use crate::session::UserId;
use crate::vault::RecordKind;

/// `getMetadata` / `setMetadata` on the identity provider.
pub trait MetadataStore {
    fn get_metadata(&self, user: &UserId) -> Result<MetadataBag>;

    /// Merge `partial` into the user's bag (see `merge_bag`).
    fn set_metadata(&mut self, user: &UserId, partial: MetadataBag) -> Result<()>;
}

/// In-process bags, keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryMetadata {
    bags: BTreeMap<String, MetadataBag>,
}

impl MemoryMetadata {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for MemoryMetadata {
    fn get_metadata(&self, user: &UserId) -> Result<MetadataBag> {
        Ok(self.bags.get(user.as_str()).cloned().unwrap_or_default())
    }

    fn set_metadata(&mut self, user: &UserId, partial: MetadataBag) -> Result<()> {
        merge_bag(self.bags.entry(user.to_string()).or_default(), partial);
        Ok(())
    }
}

/// All users' bags in one JSON file: `{ "<userId>": { ... }, ... }`.
///
/// Handy for syncing through a shared folder when no endpoint exists.
#[derive(Debug, Clone)]
pub struct JsonFileMetadata {
    path: PathBuf,
}

impl JsonFileMetadata {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, MetadataBag>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            SecuraError::Remote(format!("metadata file {}: {e}", self.path.display()))
        })
    }

    fn write_all(&self, bags: &BTreeMap<String, MetadataBag>) -> Result<()> {
        let contents = serde_json::to_string_pretty(bags)
            .map_err(|e| SecuraError::SerializationError(format!("metadata: {e}")))?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl MetadataStore for JsonFileMetadata {
    fn get_metadata(&self, user: &UserId) -> Result<MetadataBag> {
        Ok(self.read_all()?.remove(user.as_str()).unwrap_or_default())
    }

    fn set_metadata(&mut self, user: &UserId, partial: MetadataBag) -> Result<()> {
        let mut bags = self.read_all()?;
        merge_bag(bags.entry(user.to_string()).or_default(), partial);
        self.write_all(&bags)
    }
}

/// A `RemoteStore` that writes straight into a `MetadataStore`.
#[derive(Debug, Default)]
pub struct MetadataRemote<M> {
    store: M,
}

impl<M: MetadataStore> MetadataRemote<M> {
    pub fn new(store: M) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &M {
        &self.store
    }
}

impl<M: MetadataStore> RemoteStore for MetadataRemote<M> {
    fn push(&mut self, user: &UserId, kind: RecordKind, blob: Option<&str>) -> Result<()> {
        self.store.set_metadata(user, push_patch(kind, blob))
    }

    fn pull(&self, user: &UserId) -> Result<RemoteBlobs> {
        Ok(RemoteBlobs::from_bag(&self.store.get_metadata(user)?))
    }
}
