//! Capability trait and failure taxonomy for issue lookup.

use async_trait::async_trait;
use thiserror::Error;

use crate::issue::Issue;

#[derive(Debug, Error)]
/// Failure modes of a single issue lookup.
///
/// `NotFound` is an expected outcome for stale or mistyped keys and callers
/// must treat it as an absence, not an error. `Client` covers everything
/// else: auth, network, rate limiting, malformed responses, timeouts.
pub enum IssueClientError {
    #[error("issue {key} was not found")]
    NotFound { key: String },
    #[error("issue tracker request failed: {message}")]
    Client { message: String },
}

impl IssueClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[async_trait]
/// Opaque "fetch issue by key" capability provided by the tracker client.
pub trait IssueClient: Send + Sync {
    async fn get_issue(&self, key: &str) -> Result<Issue, IssueClientError>;
}
