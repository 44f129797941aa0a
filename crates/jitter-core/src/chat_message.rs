//! Inbound chat message payload as delivered by the outgoing-webhook transport.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
/// One chat message received from the team-chat webhook.
///
/// The transport layer hands this over already parsed; malformed payloads are
/// rejected before the pipeline ever sees them. The pipeline never mutates it.
pub struct FromChatMessage {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub trigger_word: Option<String>,
}
