//! Session context — who the vault currently belongs to.
//!
//! The identity is handed to `VaultManager::set_identity` by whoever owns
//! the session (the CLI, or an embedding application).  Nothing in the
//! crate reads the active user from ambient state.

use std::fmt;

use crate::errors::{Result, ValidationError};

/// Name used for the signed-out user in storage keys.
pub const ANONYMOUS: &str = "anonymous";

/// Longest accepted user id.
const MAX_USER_ID_LEN: usize = 128;

/// A validated provider-issued account id.  Only `UserId::parse` builds one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The owner of a vault snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserId {
    /// Nobody is signed in.  Data stays local, remote sync is skipped.
    Anonymous,
    /// A user id issued by the identity provider.
    Authenticated(AccountId),
}

impl UserId {
    /// Parse a user id from CLI/config input.
    ///
    /// An empty string or `anonymous` yields `UserId::Anonymous`.  Other
    /// ids end up in file names, so they are restricted to ASCII letters,
    /// digits, underscores, hyphens, and periods.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw == ANONYMOUS {
            return Ok(Self::Anonymous);
        }

        let valid = raw.len() <= MAX_USER_ID_LEN
            && !raw.starts_with('.')
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.');
        if !valid {
            return Err(ValidationError::InvalidUserId(raw.to_string()).into());
        }

        Ok(Self::Authenticated(AccountId(raw.to_string())))
    }

    /// The id as it appears in storage keys and requests.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Anonymous => ANONYMOUS,
            Self::Authenticated(id) => id.as_str(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the identity provider currently reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: UserId,
    /// `false` while the provider is still resolving the session.
    pub ready: bool,
}

impl Identity {
    /// A resolved identity for `user`.
    pub fn ready(user: UserId) -> Self {
        Self { user, ready: true }
    }

    /// An identity whose provider has not finished loading.
    pub fn pending() -> Self {
        Self {
            user: UserId::Anonymous,
            ready: false,
        }
    }
}
