use super::record::{CardRecord, PasswordRecord};

/// Everything one user has stored, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultSnapshot {
    pub passwords: Vec<PasswordRecord>,
    pub cards: Vec<CardRecord>,
}

impl VaultSnapshot {
    pub fn len(&self) -> usize {
        self.passwords.len() + self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty() && self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.passwords.clear();
        self.cards.clear();
    }
}
