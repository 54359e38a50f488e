//! HTTP transport for the metadata endpoint.
//!
//! - `POST <endpoint>` with `{"userId": "...", "<kind>": "<blob>" | null}`
//!   merges one kind into the user's bag.
//! - `GET <endpoint>?userId=<id>` returns the bag as a JSON object.

use std::time::Duration;

use serde_json::{Map, Value};
use tracing::debug;
use ureq::Agent;

use super::{MetadataBag, RemoteBlobs, RemoteStore};
use crate::errors::{Result, SecuraError};
use crate::session::UserId;
use crate::vault::RecordKind;

pub struct HttpRemote {
    agent: Agent,
    endpoint: String,
}

impl HttpRemote {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .user_agent(concat!("secura/", env!("CARGO_PKG_VERSION")))
            .build()
            .into();
        Self {
            agent,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Request body for a push.
pub fn push_body(user: &UserId, kind: RecordKind, blob: Option<&str>) -> Value {
    let mut body = Map::new();
    body.insert("userId".into(), Value::String(user.to_string()));
    body.insert(
        kind.as_str().into(),
        blob.map_or(Value::Null, |b| Value::String(b.to_string())),
    );
    Value::Object(body)
}

impl RemoteStore for HttpRemote {
    fn push(&mut self, user: &UserId, kind: RecordKind, blob: Option<&str>) -> Result<()> {
        let body = push_body(user, kind, blob);
        self.agent
            .post(&self.endpoint)
            .send_json(&body)
            .map_err(|e| SecuraError::Remote(format!("push {kind}: {e}")))?;
        debug!(user = %user, %kind, cleared = blob.is_none(), "pushed metadata");
        Ok(())
    }

    fn pull(&self, user: &UserId) -> Result<RemoteBlobs> {
        let mut response = self
            .agent
            .get(&self.endpoint)
            .query("userId", user.as_str())
            .call()
            .map_err(|e| SecuraError::Remote(format!("pull: {e}")))?;

        let bag: MetadataBag = response
            .body_mut()
            .read_json()
            .map_err(|e| SecuraError::Remote(format!("pull: bad metadata body: {e}")))?;

        Ok(RemoteBlobs::from_bag(&bag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_body_shape() {
        let user = UserId::parse("user_1").unwrap();
        let body = push_body(&user, RecordKind::Cards, Some("blob"));
        assert_eq!(body["userId"], "user_1");
        assert_eq!(body["cards"], "blob");
        assert!(body.get("passwords").is_none());

        let cleared = push_body(&user, RecordKind::Passwords, None);
        assert!(cleared["passwords"].is_null());
    }

    #[test]
    fn endpoint_trailing_slash_trimmed() {
        let remote = HttpRemote::new("https://example.test/api/save-metadata/", Duration::from_secs(1));
        assert_eq!(remote.endpoint(), "https://example.test/api/save-metadata");
    }

    #[test]
    fn unreachable_endpoint_is_remote_error() {
        let mut remote = HttpRemote::new("http://127.0.0.1:9/metadata", Duration::from_millis(200));
        let user = UserId::parse("u").unwrap();
        assert!(matches!(
            remote.push(&user, RecordKind::Cards, None),
            Err(SecuraError::Remote(_))
        ));
        assert!(matches!(remote.pull(&user), Err(SecuraError::Remote(_))));
    }
}
