//! Inbound webhook endpoint wiring the detection pipeline to HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use jitter_core::{FromChatMessage, ReplyMessageFactory};
use jitter_detect::{
    resolve_field_creators, AttachmentCreator, ChannelBlocklistValidator, DetectService,
    IssueKeyParser, MessageValidator, TokenValidator, UserBlocklistValidator,
};
use jitter_jira::JiraRestClient;
use tokio::net::TcpListener;
use tracing::info;

use crate::server_config::ServerConfig;

/// Builds the full pipeline from resolved configuration.
///
/// Registry resolution and client construction happen here, once; any
/// failure is a startup error.
pub fn build_detect_service(config: &ServerConfig) -> Result<DetectService> {
    let jira_client = JiraRestClient::new(
        config.jira.uri.clone(),
        config.jira.username.clone(),
        config.jira.password.clone(),
        config.jira.request_timeout_ms,
    )?;

    let mut validators: Vec<Box<dyn MessageValidator>> = Vec::new();
    if !config.validation.tokens.is_empty() {
        validators.push(Box::new(TokenValidator::new(
            config.validation.tokens.clone(),
        )));
    }
    if !config.validation.blocked_users.is_empty() {
        validators.push(Box::new(UserBlocklistValidator::new(
            config.validation.blocked_users.clone(),
        )));
    }
    if !config.validation.blocked_channels.is_empty() {
        validators.push(Box::new(ChannelBlocklistValidator::new(
            config.validation.blocked_channels.clone(),
        )));
    }

    let attachment_creator = AttachmentCreator::new(
        resolve_field_creators(&config.message.default_fields)
            .context("invalid message.default_fields")?,
        resolve_field_creators(&config.message.extended_fields)
            .context("invalid message.extended_fields")?,
        config.jira.uri.clone(),
        config.message.priority_colors,
        config.message.default_color.clone(),
    );

    Ok(DetectService::new(
        validators,
        IssueKeyParser::new()?,
        Arc::new(jira_client),
        attachment_creator,
        ReplyMessageFactory::new(
            config.message.username.clone(),
            config.message.icon_url.clone(),
        ),
        config.server.max_concurrent_fetches,
    ))
}

/// Runs the webhook server until ctrl-c.
pub async fn run_webhook_server(config: ServerConfig) -> Result<()> {
    let service = build_detect_service(&config)?;

    let listener = bind_listener(&config.server.bind).await?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound webhook server address")?;
    info!(addr = %local_addr, "webhook server listening");

    let app = build_webhook_router(Arc::new(service));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("webhook server exited unexpectedly")
}

async fn bind_listener(bind: &str) -> Result<TcpListener> {
    let bind_addr = bind
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid server.bind '{bind}'"))?;
    TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind webhook server on {bind_addr}"))
}

pub(crate) fn build_webhook_router(service: Arc<DetectService>) -> Router {
    Router::new()
        .route("/", post(handle_webhook))
        .route("/health", get(handle_health))
        .with_state(service)
}

async fn handle_webhook(
    State(service): State<Arc<DetectService>>,
    Json(message): Json<FromChatMessage>,
) -> Response {
    match service.handle(&message).await {
        Some(reply) => Json(reply).into_response(),
        // No-op: an empty 200 tells the chat server there is nothing to post.
        None => StatusCode::OK.into_response(),
    }
}

async fn handle_health() -> Response {
    Json(serde_json::json!({ "status": "ok" })).into_response()
}
