//! Issue tracker capability consumed by the detection pipeline.
//!
//! Exposes the `Issue` record model, the `IssueClient` capability trait with
//! its `NotFound`/`Client` failure taxonomy, and the concrete Jira REST
//! client implementation.

pub mod issue;
pub mod issue_client;
pub mod jira_rest_client;

pub use issue::{Issue, IssueFields, IssueUser, NamedField};
pub use issue_client::{IssueClient, IssueClientError};
pub use jira_rest_client::JiraRestClient;
