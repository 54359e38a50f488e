//! Vault health summary: how much is stored and which passwords need
//! attention.

use std::collections::HashMap;

use super::snapshot::VaultSnapshot;

/// Passwords shorter than this count as weak.
pub const WEAK_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VaultReport {
    pub total_items: usize,
    pub passwords: usize,
    pub cards: usize,
    pub weak_passwords: usize,
    /// Records whose secret also appears in at least one other record.
    pub reused_passwords: usize,
}

impl VaultReport {
    pub fn from_snapshot(snapshot: &VaultSnapshot) -> Self {
        let mut uses: HashMap<&str, usize> = HashMap::new();
        for record in &snapshot.passwords {
            *uses.entry(record.secret.as_str()).or_default() += 1;
        }

        Self {
            total_items: snapshot.len(),
            passwords: snapshot.passwords.len(),
            cards: snapshot.cards.len(),
            weak_passwords: snapshot
                .passwords
                .iter()
                .filter(|r| r.secret.chars().count() < WEAK_PASSWORD_LEN)
                .count(),
            reused_passwords: snapshot
                .passwords
                .iter()
                .filter(|r| uses.get(r.secret.as_str()).copied().unwrap_or(0) > 1)
                .count(),
        }
    }
}
