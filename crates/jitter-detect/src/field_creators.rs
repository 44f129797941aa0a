//! Named field-extraction capabilities used to assemble attachment fields.

use anyhow::{bail, Result};
use jitter_core::AttachmentField;
use jitter_jira::issue::parse_issue_timestamp;
use jitter_jira::Issue;

use crate::issue_key_parser::IssueDetail;

const DESCRIPTION_MAX_CHARS: usize = 1_000;
const TIMESTAMP_RENDER_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders one attachment field from a resolved issue.
///
/// Returning `None` means the attribute is absent or unrenderable; the field
/// is omitted and composition of the rest of the attachment proceeds.
pub trait FieldCreator: Send + Sync {
    fn create(&self, issue: &Issue, detail: IssueDetail) -> Option<AttachmentField>;
}

impl std::fmt::Debug for dyn FieldCreator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FieldCreator")
    }
}

/// Resolves configured field names into creators, preserving order.
///
/// An unknown name is a startup configuration error, never a per-request
/// failure.
pub fn resolve_field_creators(names: &[String]) -> Result<Vec<Box<dyn FieldCreator>>> {
    let mut creators: Vec<Box<dyn FieldCreator>> = Vec::with_capacity(names.len());
    for name in names {
        let creator: Box<dyn FieldCreator> = match name.trim() {
            "description" => Box::new(DescriptionFieldCreator),
            "assignee" => Box::new(AssigneeFieldCreator),
            "status" => Box::new(StatusFieldCreator),
            "priority" => Box::new(PriorityFieldCreator),
            "type" => Box::new(TypeFieldCreator),
            "reporter" => Box::new(ReporterFieldCreator),
            "created" => Box::new(CreatedFieldCreator),
            "updated" => Box::new(UpdatedFieldCreator),
            other => bail!(
                "unknown attachment field name '{other}' (supported: description, assignee, \
                 status, priority, type, reporter, created, updated)"
            ),
        };
        creators.push(creator);
    }
    Ok(creators)
}

fn short_field(title: &str, value: impl Into<String>) -> Option<AttachmentField> {
    Some(AttachmentField {
        title: title.to_string(),
        value: value.into(),
        short: true,
    })
}

fn render_timestamp(raw: &str) -> String {
    match parse_issue_timestamp(raw) {
        Some(parsed) => parsed.format(TIMESTAMP_RENDER_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

struct DescriptionFieldCreator;

impl FieldCreator for DescriptionFieldCreator {
    fn create(&self, issue: &Issue, _detail: IssueDetail) -> Option<AttachmentField> {
        let description = issue.fields.description.as_deref()?.trim();
        if description.is_empty() {
            return None;
        }
        let value = if description.chars().count() > DESCRIPTION_MAX_CHARS {
            let truncated: String = description.chars().take(DESCRIPTION_MAX_CHARS).collect();
            format!("{truncated}…")
        } else {
            description.to_string()
        };
        Some(AttachmentField {
            title: "Description".to_string(),
            value,
            short: false,
        })
    }
}

struct AssigneeFieldCreator;

impl FieldCreator for AssigneeFieldCreator {
    fn create(&self, issue: &Issue, _detail: IssueDetail) -> Option<AttachmentField> {
        let name = issue.fields.assignee.as_ref()?.render_name()?;
        short_field("Assignee", name)
    }
}

struct StatusFieldCreator;

impl FieldCreator for StatusFieldCreator {
    fn create(&self, issue: &Issue, _detail: IssueDetail) -> Option<AttachmentField> {
        let status = issue.fields.status.as_ref()?;
        if status.name.trim().is_empty() {
            return None;
        }
        short_field("Status", status.name.clone())
    }
}

struct PriorityFieldCreator;

impl FieldCreator for PriorityFieldCreator {
    fn create(&self, issue: &Issue, _detail: IssueDetail) -> Option<AttachmentField> {
        let priority = issue.fields.priority.as_ref()?;
        if priority.name.trim().is_empty() {
            return None;
        }
        short_field("Priority", priority.name.clone())
    }
}

struct TypeFieldCreator;

impl FieldCreator for TypeFieldCreator {
    fn create(&self, issue: &Issue, _detail: IssueDetail) -> Option<AttachmentField> {
        let issue_type = issue.fields.issuetype.as_ref()?;
        if issue_type.name.trim().is_empty() {
            return None;
        }
        short_field("Type", issue_type.name.clone())
    }
}

struct ReporterFieldCreator;

impl FieldCreator for ReporterFieldCreator {
    fn create(&self, issue: &Issue, _detail: IssueDetail) -> Option<AttachmentField> {
        let name = issue.fields.reporter.as_ref()?.render_name()?;
        short_field("Reporter", name)
    }
}

struct CreatedFieldCreator;

impl FieldCreator for CreatedFieldCreator {
    fn create(&self, issue: &Issue, _detail: IssueDetail) -> Option<AttachmentField> {
        let created = issue.fields.created.as_deref()?;
        short_field("Created", render_timestamp(created))
    }
}

struct UpdatedFieldCreator;

impl FieldCreator for UpdatedFieldCreator {
    fn create(&self, issue: &Issue, _detail: IssueDetail) -> Option<AttachmentField> {
        let updated = issue.fields.updated.as_deref()?;
        short_field("Updated", render_timestamp(updated))
    }
}
