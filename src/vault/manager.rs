//! The vault state manager.
//!
//! `VaultManager` owns the decoded snapshot for the active identity and
//! is the only writer to it.  Each mutation updates memory first, then
//! writes the affected kind to local storage and pushes it to the remote
//! store.  Write failures are reported back as `SyncIssue`s and never
//! undo the in-memory change.
//!
//! ```text
//! Unloaded ──set_identity──▶ Loading ──load──▶ Ready
//!     ▲                         ▲                 │
//!     └── provider not ready    └── user changed ─┘
//! ```

use std::fmt;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::record::{CardRecord, PasswordRecord, Record, RecordKind};
use super::snapshot::VaultSnapshot;
use crate::codec::{decode_records, encode_records, Codec, CodecConfig};
use crate::errors::{Result, SecuraError};
use crate::remote::{RemoteBlobs, RemoteStore};
use crate::session::{Identity, UserId};
use crate::storage::{KeyValueStore, LocalStore};

/// Where the manager is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Ready,
}

/// A non-fatal problem writing or reading one side of the sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncIssue {
    Local(String),
    Remote(String),
}

impl fmt::Display for SyncIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(msg) => write!(f, "local storage: {msg}"),
            Self::Remote(msg) => write!(f, "remote sync: {msg}"),
        }
    }
}

/// Result of a mutation that went through.
///
/// The in-memory change has happened regardless of `issues`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved<T> {
    pub value: T,
    pub issues: Vec<SyncIssue>,
}

impl<T> Saved<T> {
    fn clean(value: T) -> Self {
        Self {
            value,
            issues: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Which side a kind's records came from during a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Local,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub passwords: LoadSource,
    pub cards: LoadSource,
    pub issues: Vec<SyncIssue>,
}

pub struct VaultManager<S, R> {
    local: LocalStore<S>,
    remote: R,
    codec_config: CodecConfig,
    codec: Option<Codec>,
    user: Option<UserId>,
    state: LoadState,
    snapshot: VaultSnapshot,
}

impl<S: KeyValueStore, R: RemoteStore> VaultManager<S, R> {
    pub fn new(store: S, remote: R, codec_config: CodecConfig) -> Self {
        Self {
            local: LocalStore::new(store),
            remote,
            codec_config,
            codec: None,
            user: None,
            state: LoadState::Unloaded,
            snapshot: VaultSnapshot::default(),
        }
    }

    // ------------------------------------------------------------------
    // Identity and loading
    // ------------------------------------------------------------------

    /// Tell the manager who is signed in.
    ///
    /// A different user (or the first one) discards the snapshot and
    /// moves to `Loading`; nothing is saved until `load` completes.  The
    /// same user again is a no-op.  A provider that is not ready yet
    /// resets the manager to `Unloaded`.
    pub fn set_identity(&mut self, identity: Identity) -> LoadState {
        if !identity.ready {
            self.reset();
            return self.state;
        }

        if self.state != LoadState::Unloaded && self.user.as_ref() == Some(&identity.user) {
            return self.state;
        }

        debug!(user = %identity.user, "identity changed, reloading vault");
        self.snapshot.clear();
        self.codec = None;
        self.user = Some(identity.user);
        self.state = LoadState::Loading;
        self.state
    }

    /// Fetch and decode both kinds for the pending identity.
    ///
    /// For each kind the remote blob wins when it holds records; local
    /// storage is used otherwise.  Errors that would make a later save
    /// destroy data (unreadable storage, failed decryption) abort the
    /// load and leave the manager `Unloaded`.
    pub fn load(&mut self) -> Result<LoadReport> {
        if self.state != LoadState::Loading {
            return Err(SecuraError::NoPendingLoad(self.state));
        }
        let Some(user) = self.user.clone() else {
            return Err(SecuraError::NoPendingLoad(self.state));
        };

        match self.load_for(&user) {
            Ok((snapshot, codec, report)) => {
                debug!(
                    user = %user,
                    passwords = snapshot.passwords.len(),
                    cards = snapshot.cards.len(),
                    "vault ready"
                );
                self.snapshot = snapshot;
                self.codec = Some(codec);
                self.state = LoadState::Ready;
                Ok(report)
            }
            Err(e) => {
                warn!(user = %user, error = %e, "vault load failed");
                self.reset();
                Err(e)
            }
        }
    }

    /// `set_identity` followed by `load` when a load is pending.
    pub fn switch_identity(&mut self, identity: Identity) -> Result<Option<LoadReport>> {
        match self.set_identity(identity) {
            LoadState::Loading => self.load().map(Some),
            _ => Ok(None),
        }
    }

    fn load_for(&mut self, user: &UserId) -> Result<(VaultSnapshot, Codec, LoadReport)> {
        let codec = self.codec_config.build(user)?;
        let mut issues = Vec::new();

        let blobs = if user.is_anonymous() {
            RemoteBlobs::default()
        } else {
            self.remote.pull(user).unwrap_or_else(|e| {
                warn!(user = %user, error = %e, "remote pull failed, using local data");
                issues.push(SyncIssue::Remote(e.to_string()));
                RemoteBlobs::default()
            })
        };

        let (passwords, password_source) =
            self.load_kind::<PasswordRecord>(user, &codec, &blobs, &mut issues)?;
        let (cards, card_source) = self.load_kind::<CardRecord>(user, &codec, &blobs, &mut issues)?;

        let report = LoadReport {
            passwords: password_source,
            cards: card_source,
            issues,
        };
        Ok((VaultSnapshot { passwords, cards }, codec, report))
    }

    fn load_kind<T: Record>(
        &mut self,
        user: &UserId,
        codec: &Codec,
        blobs: &RemoteBlobs,
        issues: &mut Vec<SyncIssue>,
    ) -> Result<(Vec<T>, LoadSource)> {
        let kind = T::KIND;
        if let Some(blob) = blobs.get(kind) {
            match decode_records::<T>(blob, codec) {
                Ok(records) if !records.is_empty() => return Ok((records, LoadSource::Remote)),
                Ok(_) => {}
                Err(SecuraError::DecryptionFailed) => return Err(SecuraError::DecryptionFailed),
                Err(e) => {
                    warn!(user = %user, %kind, error = %e, "remote blob unreadable");
                    issues.push(SyncIssue::Remote(format!("{kind} blob unreadable: {e}")));
                }
            }
        }

        let records = self.local.load::<T>(user, codec)?;
        let source = if records.is_empty() {
            LoadSource::Empty
        } else {
            LoadSource::Local
        };
        Ok((records, source))
    }

    fn reset(&mut self) {
        self.snapshot.clear();
        self.codec = None;
        self.user = None;
        self.state = LoadState::Unloaded;
    }

    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    /// Validate and append a new record with a fresh id and timestamp.
    pub fn add<T: Record>(&mut self, draft: T::Draft) -> Result<Saved<T>> {
        self.ensure_ready()?;

        let mut id = Uuid::new_v4().to_string();
        while T::list(&self.snapshot).iter().any(|r| r.id() == id) {
            id = Uuid::new_v4().to_string();
        }

        let record = T::create(draft, id, Utc::now());
        record.validate()?;

        T::list_mut(&mut self.snapshot).push(record.clone());
        let issues = self.persist::<T>();
        Ok(Saved {
            value: record,
            issues,
        })
    }

    /// Merge `patch` into the record with `id`.
    ///
    /// Returns `None` without saving when no record has that id.  The
    /// merged record is validated before it replaces the old one.
    pub fn update<T: Record>(&mut self, id: &str, patch: T::Patch) -> Result<Saved<Option<T>>> {
        self.ensure_ready()?;

        let list = T::list_mut(&mut self.snapshot);
        let Some(pos) = list.iter().position(|r| r.id() == id) else {
            return Ok(Saved::clean(None));
        };

        let mut merged = list[pos].clone();
        merged.apply(patch);
        merged.validate()?;
        list[pos] = merged.clone();

        let issues = self.persist::<T>();
        Ok(Saved {
            value: Some(merged),
            issues,
        })
    }

    /// Remove the record with `id`.  Returns whether anything was removed;
    /// removing an unknown id changes nothing and saves nothing.
    pub fn remove<T: Record>(&mut self, id: &str) -> Result<Saved<bool>> {
        self.ensure_ready()?;

        let list = T::list_mut(&mut self.snapshot);
        let before = list.len();
        list.retain(|r| r.id() != id);
        if list.len() == before {
            return Ok(Saved::clean(false));
        }

        let issues = self.persist::<T>();
        Ok(Saved {
            value: true,
            issues,
        })
    }

    /// Append records from an export.
    ///
    /// Every record is validated first; one bad record rejects the whole
    /// batch.  Ids already present (or repeated in the batch) are skipped.
    pub fn import<T: Record>(&mut self, records: Vec<T>) -> Result<Saved<usize>> {
        self.ensure_ready()?;

        for record in &records {
            record.validate()?;
        }

        let list = T::list_mut(&mut self.snapshot);
        let mut added = 0;
        for record in records {
            if list.iter().any(|r| r.id() == record.id()) {
                continue;
            }
            list.push(record);
            added += 1;
        }

        if added == 0 {
            return Ok(Saved::clean(0));
        }
        let issues = self.persist::<T>();
        Ok(Saved {
            value: added,
            issues,
        })
    }

    /// Delete every record of both kinds.
    pub fn clear(&mut self) -> Result<Saved<usize>> {
        self.ensure_ready()?;

        let removed = self.snapshot.len();
        self.snapshot.clear();

        let mut issues = self.persist::<PasswordRecord>();
        issues.extend(self.persist::<CardRecord>());
        Ok(Saved {
            value: removed,
            issues,
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn get<T: Record>(&self, id: &str) -> Result<Option<&T>> {
        self.ensure_ready()?;
        Ok(T::list(&self.snapshot).iter().find(|r| r.id() == id))
    }

    /// Records of one kind in insertion order (empty unless `Ready`).
    pub fn records<T: Record>(&self) -> &[T] {
        T::list(&self.snapshot)
    }

    /// Records whose searchable text fields contain `query`,
    /// ignoring case.  Does not touch state.
    pub fn search<T: Record>(&self, query: &str) -> Result<Vec<T>> {
        self.ensure_ready()?;
        let needle = query.to_lowercase();
        Ok(T::list(&self.snapshot)
            .iter()
            .filter(|r| r.matches(&needle))
            .cloned()
            .collect())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn snapshot(&self) -> &VaultSnapshot {
        &self.snapshot
    }

    pub fn local(&self) -> &LocalStore<S> {
        &self.local
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn ensure_ready(&self) -> Result<()> {
        if self.state == LoadState::Ready {
            Ok(())
        } else {
            Err(SecuraError::NotReady(self.state))
        }
    }

    /// Write one kind to both stores.  Never fails the caller.
    fn persist<T: Record>(&mut self) -> Vec<SyncIssue> {
        let mut issues = Vec::new();
        let (Some(user), Some(codec)) = (self.user.as_ref(), self.codec.as_ref()) else {
            return issues;
        };
        let kind: RecordKind = T::KIND;

        let blob = match encode_records(T::list(&self.snapshot), codec) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(user = %user, %kind, error = %e, "could not encode records");
                issues.push(SyncIssue::Local(e.to_string()));
                return issues;
            }
        };

        if let Err(e) = self.local.write_blob(user, kind, blob.as_deref()) {
            warn!(user = %user, %kind, error = %e, "local save failed");
            issues.push(SyncIssue::Local(e.to_string()));
        }

        if !user.is_anonymous() {
            if let Err(e) = self.remote.push(user, kind, blob.as_deref()) {
                warn!(user = %user, %kind, error = %e, "remote push failed");
                issues.push(SyncIssue::Remote(e.to_string()));
            }
        }

        debug!(user = %user, %kind, count = T::list(&self.snapshot).len(), "saved");
        issues
    }
}
