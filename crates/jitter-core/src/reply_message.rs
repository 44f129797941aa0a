//! Outgoing reply payload returned to the chat transport.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
/// One labelled field rendered inside a rich attachment.
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
/// One rich attachment summarizing a single resolved issue.
pub struct Attachment {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub fields: Vec<AttachmentField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
/// The reply message handed back to the transport for delivery.
///
/// A pipeline run that has nothing to say produces no `ReplyMessage` at all;
/// an empty reply is never sent.
pub struct ReplyMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default)]
/// Applies the configured bot identity to every outgoing reply.
pub struct ReplyMessageFactory {
    username: Option<String>,
    icon_url: Option<String>,
}

impl ReplyMessageFactory {
    pub fn new(username: Option<String>, icon_url: Option<String>) -> Self {
        Self {
            username: username.filter(|value| !value.trim().is_empty()),
            icon_url: icon_url.filter(|value| !value.trim().is_empty()),
        }
    }

    pub fn create(&self, text: impl Into<String>, attachments: Vec<Attachment>) -> ReplyMessage {
        ReplyMessage {
            text: text.into(),
            username: self.username.clone(),
            icon_url: self.icon_url.clone(),
            attachments,
        }
    }
}
