//! Jira REST API client implementing the issue lookup capability.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::issue::Issue;
use crate::issue_client::{IssueClient, IssueClientError};

const ISSUE_ENDPOINT_PREFIX: &str = "rest/api/2/issue";
const ERROR_BODY_MAX_CHARS: usize = 300;

#[derive(Clone)]
/// Thin client over the tracker's REST issue endpoint.
///
/// The request timeout configured here is the per-fetch timeout of the
/// pipeline; a breach surfaces as `IssueClientError::Client`.
pub struct JiraRestClient {
    http: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl JiraRestClient {
    pub fn new(
        base_url: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
        request_timeout_ms: u64,
    ) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("jitter-jira-client"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create jira rest client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.filter(|value| !value.trim().is_empty()),
            password,
        })
    }

}

#[async_trait]
impl IssueClient for JiraRestClient {
    async fn get_issue(&self, key: &str) -> Result<Issue, IssueClientError> {
        let url = format!("{}/{ISSUE_ENDPOINT_PREFIX}/{key}", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(username) = self.username.as_deref() {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request
            .send()
            .await
            .map_err(|error| IssueClientError::Client {
                message: format!("request to {url} failed: {error}"),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(IssueClientError::NotFound {
                key: key.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IssueClientError::Client {
                message: format!(
                    "unexpected status {status} from {url}: {}",
                    truncate_error_body(&body)
                ),
            });
        }

        response
            .json::<Issue>()
            .await
            .map_err(|error| IssueClientError::Client {
                message: format!("failed to decode issue payload from {url}: {error}"),
            })
    }
}

fn truncate_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= ERROR_BODY_MAX_CHARS {
        return trimmed.to_string();
    }
    let truncated: String = trimmed.chars().take(ERROR_BODY_MAX_CHARS).collect();
    format!("{truncated}…")
}
