//! Pipeline orchestrator: validate → parse → fetch → compose.

use std::sync::Arc;

use jitter_core::{FromChatMessage, ReplyMessage, ReplyMessageFactory};
use jitter_jira::IssueClient;
use tracing::{debug, info};

use crate::attachment_creator::AttachmentCreator;
use crate::issue_fetcher::fetch_issues;
use crate::issue_key_parser::IssueKeyParser;
use crate::message_validators::{is_eligible, MessageValidator};

/// One request-scoped detection run over an inbound chat message.
///
/// The service itself is built once at startup and holds no mutable state;
/// every invocation creates and discards its own intermediate data. `None`
/// is the no-op outcome: validation failure, zero parsed keys, and zero
/// resolved issues all end the run silently.
pub struct DetectService {
    validators: Vec<Box<dyn MessageValidator>>,
    key_parser: IssueKeyParser,
    issue_client: Arc<dyn IssueClient>,
    attachment_creator: AttachmentCreator,
    reply_factory: ReplyMessageFactory,
    max_concurrent_fetches: usize,
}

impl std::fmt::Debug for DetectService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectService").finish_non_exhaustive()
    }
}

impl DetectService {
    pub fn new(
        validators: Vec<Box<dyn MessageValidator>>,
        key_parser: IssueKeyParser,
        issue_client: Arc<dyn IssueClient>,
        attachment_creator: AttachmentCreator,
        reply_factory: ReplyMessageFactory,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            validators,
            key_parser,
            issue_client,
            attachment_creator,
            reply_factory,
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    pub async fn handle(&self, message: &FromChatMessage) -> Option<ReplyMessage> {
        debug!("validating message");
        if !is_eligible(&self.validators, message) {
            info!("validation failed, ignoring message");
            return None;
        }

        debug!(text = %message.text, "parsing issue keys");
        let candidates = self.key_parser.parse(&message.text);
        if candidates.is_empty() {
            info!("no issue keys found, ignoring message");
            return None;
        }
        info!(keys = candidates.len(), "identified issue keys");

        let issues = fetch_issues(
            self.issue_client.as_ref(),
            &candidates,
            self.max_concurrent_fetches,
        )
        .await;
        if issues.is_empty() {
            info!("no issues resolved, ignoring message");
            return None;
        }
        info!(issues = issues.len(), "resolved issues");

        let attachments = issues
            .iter()
            .map(|(issue, detail)| self.attachment_creator.create(issue, *detail))
            .collect();
        let text = if issues.len() == 1 {
            "Found 1 issue".to_string()
        } else {
            format!("Found {} issues", issues.len())
        };
        Some(self.reply_factory.create(text, attachments))
    }
}
