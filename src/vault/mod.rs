//! Vault module — records, validation, and the state manager.
//!
//! This module provides:
//! - `PasswordRecord`, `CardRecord` and the `Record` trait (`record`)
//! - Field validation (`validate`)
//! - `VaultSnapshot`, the in-memory lists (`snapshot`)
//! - `VaultManager`, load/save orchestration and CRUD (`manager`)
//! - Health summary (`report`) and JSON export/import (`transfer`)

pub mod manager;
pub mod record;
pub mod report;
pub mod snapshot;
pub mod transfer;
pub mod validate;

// Re-export the most commonly used items.
pub use manager::{LoadReport, LoadSource, LoadState, Saved, SyncIssue, VaultManager};
pub use record::{
    CardPatch, CardRecord, CardType, NewCard, NewPassword, PasswordPatch, PasswordRecord, Record,
    RecordKind,
};
pub use report::VaultReport;
pub use snapshot::VaultSnapshot;
