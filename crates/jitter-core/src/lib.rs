//! Chat message data model shared across Jitter crates.
//!
//! Holds the inbound webhook payload and the outgoing reply payload types
//! used by the detection pipeline and the webhook transport.

pub mod chat_message;
pub mod reply_message;

pub use chat_message::FromChatMessage;
pub use reply_message::{Attachment, AttachmentField, ReplyMessage, ReplyMessageFactory};
