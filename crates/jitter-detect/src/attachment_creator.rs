//! Composition of one rich attachment per resolved issue.

use jitter_core::Attachment;
use jitter_jira::Issue;

use crate::field_creators::FieldCreator;
use crate::issue_key_parser::IssueDetail;

/// Composes attachments from resolved issues using the configured field
/// creator registries.
///
/// Built once at startup and immutable afterwards. Composition is
/// deterministic per (issue, detail): field content never depends on fetch
/// timing, and field order is the configured creator order.
pub struct AttachmentCreator {
    default_creators: Vec<Box<dyn FieldCreator>>,
    extended_creators: Vec<Box<dyn FieldCreator>>,
    browse_base_url: Option<String>,
    priority_colors: bool,
    default_color: String,
}

impl AttachmentCreator {
    pub fn new(
        default_creators: Vec<Box<dyn FieldCreator>>,
        extended_creators: Vec<Box<dyn FieldCreator>>,
        browse_base_url: impl Into<String>,
        priority_colors: bool,
        default_color: impl Into<String>,
    ) -> Self {
        let browse_base_url = browse_base_url.into();
        let browse_base_url = browse_base_url.trim().trim_end_matches('/').to_string();
        Self {
            default_creators,
            extended_creators,
            browse_base_url: (!browse_base_url.is_empty()).then_some(browse_base_url),
            priority_colors,
            default_color: default_color.into(),
        }
    }

    pub fn create(&self, issue: &Issue, detail: IssueDetail) -> Attachment {
        let creators = match detail {
            IssueDetail::Normal => &self.default_creators,
            IssueDetail::Extended => &self.extended_creators,
        };

        let title = match issue.fields.summary.as_deref().map(str::trim) {
            Some(summary) if !summary.is_empty() => format!("{} {summary}", issue.key),
            _ => issue.key.clone(),
        };

        Attachment {
            title,
            title_link: self
                .browse_base_url
                .as_deref()
                .map(|base| format!("{base}/browse/{}", issue.key)),
            color: Some(self.color_for(issue)),
            fields: creators
                .iter()
                .filter_map(|creator| creator.create(issue, detail))
                .collect(),
        }
    }

    fn color_for(&self, issue: &Issue) -> String {
        if !self.priority_colors {
            return self.default_color.clone();
        }
        let priority = issue
            .fields
            .priority
            .as_ref()
            .map(|priority| priority.name.to_ascii_lowercase())
            .unwrap_or_default();
        match priority.as_str() {
            "blocker" | "critical" | "highest" => "#cc0000".to_string(),
            "major" | "high" => "#e88b00".to_string(),
            "minor" | "low" | "trivial" | "lowest" => "#009900".to_string(),
            _ => self.default_color.clone(),
        }
    }
}
