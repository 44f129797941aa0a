//! Resolved issue record as returned by the tracker REST API.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
/// A tracker issue resolved from a parsed key.
///
/// Only the attributes the field creators read are modelled; everything else
/// in the REST payload is ignored. All attributes are optional so that a
/// sparse or partially-visible issue still composes.
pub struct Issue {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
/// Attribute bag under the REST payload's `fields` object.
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<NamedField>,
    #[serde(default)]
    pub priority: Option<NamedField>,
    #[serde(default)]
    pub issuetype: Option<NamedField>,
    #[serde(default)]
    pub assignee: Option<IssueUser>,
    #[serde(default)]
    pub reporter: Option<IssueUser>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
/// Named sub-object (status, priority, issue type).
pub struct NamedField {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
/// User reference (assignee, reporter).
pub struct IssueUser {
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl IssueUser {
    /// Best-effort human-readable name for rendering.
    pub fn render_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .or(self
                .name
                .as_deref()
                .filter(|value| !value.trim().is_empty()))
    }
}

/// Parses a tracker timestamp such as `2024-05-01T10:22:07.000+0000`.
///
/// Returns `None` on any malformed input so rendering can fall back to the
/// raw string instead of failing the attachment.
pub fn parse_issue_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw.trim(), JIRA_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw.trim()))
        .ok()
}
