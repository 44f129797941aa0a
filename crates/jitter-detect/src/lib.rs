//! Detection pipeline: key parsing, validation, issue fetch, and reply
//! composition.
//!
//! The pipeline is strictly forward-flowing: inbound message → validator
//! chain → key parser → concurrent issue fetch → attachment composition →
//! reply. Every per-item failure inside a run is absorbed and shrinks the
//! result set; only startup misconfiguration is fatal.

pub mod attachment_creator;
pub mod detect_service;
pub mod field_creators;
pub mod issue_fetcher;
pub mod issue_key_parser;
pub mod message_validators;

pub use attachment_creator::AttachmentCreator;
pub use detect_service::DetectService;
pub use field_creators::{resolve_field_creators, FieldCreator};
pub use issue_fetcher::fetch_issues;
pub use issue_key_parser::{IssueDetail, IssueKeyCandidate, IssueKeyParser};
pub use message_validators::{
    is_eligible, ChannelBlocklistValidator, MessageValidator, TokenValidator,
    UserBlocklistValidator,
};
