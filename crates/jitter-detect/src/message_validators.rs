//! Eligibility gate evaluated before any parsing happens.

use jitter_core::FromChatMessage;

/// One independent predicate over an inbound message. Validators never
/// mutate the message; eligibility is the AND over the configured chain.
pub trait MessageValidator: Send + Sync {
    fn is_valid(&self, message: &FromChatMessage) -> bool;
}

/// Returns true when every validator in the chain accepts the message.
pub fn is_eligible(validators: &[Box<dyn MessageValidator>], message: &FromChatMessage) -> bool {
    validators.iter().all(|validator| validator.is_valid(message))
}

#[derive(Debug, Clone)]
/// Accepts only messages carrying one of the configured webhook tokens.
pub struct TokenValidator {
    allowed_tokens: Vec<String>,
}

impl TokenValidator {
    pub fn new(allowed_tokens: Vec<String>) -> Self {
        Self { allowed_tokens }
    }
}

impl MessageValidator for TokenValidator {
    fn is_valid(&self, message: &FromChatMessage) -> bool {
        self.allowed_tokens
            .iter()
            .any(|token| token == &message.token)
    }
}

#[derive(Debug, Clone)]
/// Rejects messages from blocked users (matched on id or name), which keeps
/// the bot from triggering on its own or other bots' posts.
pub struct UserBlocklistValidator {
    blocked_users: Vec<String>,
}

impl UserBlocklistValidator {
    pub fn new(blocked_users: Vec<String>) -> Self {
        Self { blocked_users }
    }
}

impl MessageValidator for UserBlocklistValidator {
    fn is_valid(&self, message: &FromChatMessage) -> bool {
        !self
            .blocked_users
            .iter()
            .any(|user| user == &message.user_id || user == &message.user_name)
    }
}

#[derive(Debug, Clone)]
/// Rejects messages posted in blocked channels (matched on id or name).
pub struct ChannelBlocklistValidator {
    blocked_channels: Vec<String>,
}

impl ChannelBlocklistValidator {
    pub fn new(blocked_channels: Vec<String>) -> Self {
        Self { blocked_channels }
    }
}

impl MessageValidator for ChannelBlocklistValidator {
    fn is_valid(&self, message: &FromChatMessage) -> bool {
        !self
            .blocked_channels
            .iter()
            .any(|channel| channel == &message.channel_id || channel == &message.channel_name)
    }
}
