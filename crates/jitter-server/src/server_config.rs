//! TOML configuration resolved once at startup.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_bot_username() -> Option<String> {
    Some("Jira".to_string())
}

fn default_fields() -> Vec<String> {
    vec![
        "description".to_string(),
        "assignee".to_string(),
        "status".to_string(),
    ]
}

fn default_extended_fields() -> Vec<String> {
    vec![
        "description".to_string(),
        "assignee".to_string(),
        "status".to_string(),
        "priority".to_string(),
        "type".to_string(),
        "reporter".to_string(),
        "created".to_string(),
        "updated".to_string(),
    ]
}

fn default_priority_colors() -> bool {
    true
}

fn default_color() -> String {
    "#205081".to_string()
}

fn default_bind() -> String {
    "0.0.0.0:4567".to_string()
}

fn default_max_concurrent_fetches() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize)]
/// Root configuration file layout.
pub struct ServerConfig {
    pub jira: JiraConfig,
    #[serde(default)]
    pub message: MessageConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub server: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
/// Tracker connection settings.
pub struct JiraConfig {
    pub uri: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
/// Reply identity and attachment field selection.
pub struct MessageConfig {
    #[serde(default = "default_bot_username")]
    pub username: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default = "default_fields")]
    pub default_fields: Vec<String>,
    #[serde(default = "default_extended_fields")]
    pub extended_fields: Vec<String>,
    #[serde(default = "default_priority_colors")]
    pub priority_colors: bool,
    #[serde(default = "default_color")]
    pub default_color: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            username: default_bot_username(),
            icon_url: None,
            default_fields: default_fields(),
            extended_fields: default_extended_fields(),
            priority_colors: default_priority_colors(),
            default_color: default_color(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Validator chain configuration. Empty lists disable the corresponding
/// validator entirely.
pub struct ValidationConfig {
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default)]
    pub blocked_users: Vec<String>,
    #[serde(default)]
    pub blocked_channels: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
/// HTTP listener and per-request fan-out settings.
pub struct HttpConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

/// Loads and validates the configuration file. Any problem here is fatal at
/// startup; nothing in this module is consulted per request.
pub fn load_config(path: &Path) -> Result<ServerConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: ServerConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    if config.jira.uri.trim().is_empty() {
        bail!("config error: jira.uri must not be empty");
    }
    if config.server.max_concurrent_fetches == 0 {
        bail!("config error: server.max_concurrent_fetches must be greater than 0");
    }

    Ok(config)
}
