//! Breach check against a k-anonymity range API (Have I Been Pwned).
//!
//! The candidate is hashed with SHA-1 locally.  Only the first five hex
//! characters of the digest go over the wire; the API answers with every
//! known leaked suffix under that prefix and the match happens here.

use std::time::Duration;

use sha1::{Digest, Sha1};
use tracing::debug;
use ureq::Agent;

use crate::errors::{Result, SecuraError, ValidationError};

/// Hex characters sent to the range API.
pub const PREFIX_LEN: usize = 5;

/// Default public range API.
pub const DEFAULT_API: &str = "https://api.pwnedpasswords.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreachReport {
    pub breached: bool,
    /// How many times the password appears in known breaches.
    pub count: u64,
}

/// Something that can answer a range query for a digest prefix.
pub trait RangeLookup {
    /// Return the raw `SUFFIX:COUNT` listing for `prefix`.
    fn range(&self, prefix: &str) -> Result<String>;
}

/// The range API over HTTPS.
pub struct HttpRangeLookup {
    agent: Agent,
    base_url: String,
}

impl HttpRangeLookup {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .user_agent(concat!("secura/", env!("CARGO_PKG_VERSION")))
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl RangeLookup for HttpRangeLookup {
    fn range(&self, prefix: &str) -> Result<String> {
        let url = format!("{}/range/{prefix}", self.base_url);
        let mut response = self
            .agent
            .get(&url)
            .header("Add-Padding", "true")
            .call()
            .map_err(|e| SecuraError::Breach(format!("range request: {e}")))?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| SecuraError::Breach(format!("range response: {e}")))
    }
}

pub struct BreachChecker<L> {
    lookup: L,
}

impl<L: RangeLookup> BreachChecker<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Look `candidate` up without sending it, or its full digest, anywhere.
    pub fn check(&self, candidate: &str) -> Result<BreachReport> {
        if candidate.is_empty() {
            return Err(ValidationError::EmptyField("password").into());
        }

        let digest = sha1_hex(candidate);
        let (prefix, suffix) = digest.split_at(PREFIX_LEN);

        let body = self.lookup.range(prefix)?;
        let count = find_suffix(&body, suffix)?;
        debug!(prefix, breached = count > 0, "breach lookup complete");

        Ok(BreachReport {
            breached: count > 0,
            count,
        })
    }
}

/// Uppercase hex SHA-1 of the UTF-8 bytes.
pub fn sha1_hex(input: &str) -> String {
    let digest = Sha1::digest(input.as_bytes());
    digest.iter().map(|b| format!("{b:02X}")).collect()
}

/// Find `suffix` in a range listing and return its count (0 if absent).
///
/// Padding rows carry a count of 0 and therefore read as "not found".
fn find_suffix(body: &str, suffix: &str) -> Result<u64> {
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (candidate, count) = line
            .split_once(':')
            .ok_or_else(|| SecuraError::Breach(format!("malformed range line '{line}'")))?;
        if candidate.trim().eq_ignore_ascii_case(suffix) {
            return count
                .trim()
                .parse()
                .map_err(|_| SecuraError::Breach(format!("bad count in range line '{line}'")));
        }
    }
    Ok(0)
}
