//! Concurrent, partial-failure-tolerant resolution of parsed keys.

use futures_util::stream::{self, StreamExt};
use jitter_jira::{Issue, IssueClient};
use tracing::{debug, error};

use crate::issue_key_parser::{IssueDetail, IssueKeyCandidate};

/// Resolves every candidate against the tracker with bounded fan-out and a
/// full join: no lookup is cancelled because a sibling failed or finished
/// first.
///
/// A not-found key is an expected outcome and is dropped without an error
/// log. Any other client failure is logged once and the key is dropped; the
/// rest of the batch proceeds, so one stale mention never suppresses replies
/// about the valid ones. The result keeps candidate order, which makes
/// attachment order equal to first-mention order. An empty result is
/// legitimate.
pub async fn fetch_issues(
    client: &dyn IssueClient,
    candidates: &[IssueKeyCandidate],
    max_concurrent: usize,
) -> Vec<(Issue, IssueDetail)> {
    // The lookup future must not borrow the closure argument: a closure whose
    // return type depends on its argument lifetime trips rustc's
    // "implementation of `FnOnce` is not general enough" false positive once
    // this future is nested in a Send context (the axum handler). Cloning the
    // key keeps the future lifetime-free; `buffered` preserves order, so the
    // outcomes zip back onto the candidates positionally.
    let lookups: Vec<_> = candidates
        .iter()
        .map(|candidate| {
            let key = candidate.key.clone();
            async move { client.get_issue(&key).await }
        })
        .collect();
    let outcomes = stream::iter(lookups)
        .buffered(max_concurrent.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut resolved = Vec::with_capacity(outcomes.len());
    for (candidate, outcome) in candidates.iter().zip(outcomes) {
        match outcome {
            Ok(issue) => resolved.push((issue, candidate.detail)),
            Err(error) if error.is_not_found() => {
                debug!(key = %candidate.key, "issue key did not resolve");
            }
            Err(error) => {
                error!(key = %candidate.key, "issue lookup failed: {error}");
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use jitter_jira::{Issue, IssueClient, IssueClientError};

    use super::fetch_issues;
    use crate::issue_key_parser::{IssueDetail, IssueKeyCandidate};

    struct ScriptedClient {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl IssueClient for ScriptedClient {
        async fn get_issue(&self, key: &str) -> Result<Issue, IssueClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match key {
                "PROJ-404" => Err(IssueClientError::NotFound {
                    key: key.to_string(),
                }),
                "PROJ-500" => Err(IssueClientError::Client {
                    message: "http 500".to_string(),
                }),
                _ => Ok(Issue {
                    id: key.to_string(),
                    key: key.to_string(),
                    fields: Default::default(),
                }),
            }
        }
    }

    fn candidates(keys: &[&str]) -> Vec<IssueKeyCandidate> {
        keys.iter()
            .map(|key| IssueKeyCandidate {
                key: key.to_string(),
                detail: IssueDetail::Normal,
            })
            .collect()
    }

    #[tokio::test]
    async fn functional_fetch_drops_not_found_and_errors_but_keeps_the_rest() {
        let calls = Arc::new(AtomicUsize::new(0));
        let client = ScriptedClient {
            calls: calls.clone(),
        };
        let resolved = fetch_issues(
            &client,
            &candidates(&["PROJ-1", "PROJ-404", "PROJ-500", "PROJ-2"]),
            2,
        )
        .await;

        let keys: Vec<_> = resolved.iter().map(|(issue, _)| issue.key.as_str()).collect();
        assert_eq!(keys, vec!["PROJ-1", "PROJ-2"]);
        // Full join: every lookup ran despite the sibling failures.
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn functional_fetch_preserves_candidate_order() {
        let client = ScriptedClient {
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let resolved = fetch_issues(&client, &candidates(&["B-2", "A-1", "C-3"]), 8).await;
        let keys: Vec<_> = resolved.iter().map(|(issue, _)| issue.key.as_str()).collect();
        assert_eq!(keys, vec!["B-2", "A-1", "C-3"]);
    }

    #[tokio::test]
    async fn regression_fetch_with_no_candidates_is_empty() {
        let client = ScriptedClient {
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let resolved = fetch_issues(&client, &[], 4).await;
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn regression_fetch_carries_candidate_detail_through() {
        let client = ScriptedClient {
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let extended = vec![IssueKeyCandidate {
            key: "PROJ-9".to_string(),
            detail: IssueDetail::Extended,
        }];
        let resolved = fetch_issues(&client, &extended, 1).await;
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].1, IssueDetail::Extended);
    }
}
