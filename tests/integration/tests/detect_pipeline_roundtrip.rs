//! End-to-end pipeline tests against a mocked tracker REST API.

use std::sync::Arc;

use httpmock::prelude::*;
use jitter_core::{FromChatMessage, ReplyMessageFactory};
use jitter_detect::{
    resolve_field_creators, AttachmentCreator, DetectService, IssueKeyParser, MessageValidator,
    TokenValidator,
};
use jitter_jira::JiraRestClient;

fn mock_issue(server: &MockServer, key: &str, summary: &str, status: &str) {
    let body = serde_json::json!({
        "id": key,
        "key": key,
        "fields": {
            "summary": summary,
            "status": { "name": status },
            "priority": { "name": "Major" }
        }
    });
    server.mock(|when, then| {
        when.method(GET).path(format!("/rest/api/2/issue/{key}"));
        then.status(200).json_body(body.clone());
    });
}

fn pipeline(server: &MockServer, validators: Vec<Box<dyn MessageValidator>>) -> DetectService {
    let client = JiraRestClient::new(server.base_url(), None, None, 2_000)
        .expect("jira client should build");
    let default_fields = vec!["status".to_string()];
    let extended_fields = vec!["status".to_string(), "priority".to_string()];
    DetectService::new(
        validators,
        IssueKeyParser::new().expect("parser should build"),
        Arc::new(client),
        AttachmentCreator::new(
            resolve_field_creators(&default_fields).expect("default fields resolve"),
            resolve_field_creators(&extended_fields).expect("extended fields resolve"),
            server.base_url(),
            true,
            "#205081",
        ),
        ReplyMessageFactory::new(Some("Jira".to_string()), None),
        4,
    )
}

fn chat_message(text: &str) -> FromChatMessage {
    serde_json::from_value(serde_json::json!({
        "token": "hunter2",
        "channel_id": "C1",
        "channel_name": "dev",
        "user_id": "U1",
        "user_name": "alice",
        "text": text
    }))
    .expect("chat message should deserialize")
}

#[tokio::test]
async fn integration_pipeline_replies_for_mixed_mentions() {
    let server = MockServer::start();
    mock_issue(&server, "PROJ-1", "Login broken", "Open");
    mock_issue(&server, "OPS-7", "Disk full", "Done");

    let reply = pipeline(&server, Vec::new())
        .handle(&chat_message(
            "PROJ-1 is blocked on OPS-7, see also https://jira.example.com/browse/PROJ-1",
        ))
        .await
        .expect("two issues should produce a reply");

    assert_eq!(reply.text, "Found 2 issues");
    assert_eq!(reply.attachments.len(), 2);
    assert_eq!(reply.attachments[0].title, "PROJ-1 Login broken");
    assert_eq!(reply.attachments[1].title, "OPS-7 Disk full");
    assert_eq!(reply.username.as_deref(), Some("Jira"));
}

#[tokio::test]
async fn integration_pipeline_extended_marker_selects_extended_fields() {
    let server = MockServer::start();
    mock_issue(&server, "PROJ-2", "Slow queries", "Open");

    let reply = pipeline(&server, Vec::new())
        .handle(&chat_message("details on PROJ-2+ please"))
        .await
        .expect("one issue should produce a reply");

    let titles: Vec<_> = reply.attachments[0]
        .fields
        .iter()
        .map(|field| field.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Status", "Priority"]);
}

#[tokio::test]
async fn integration_pipeline_is_noop_when_every_key_is_unknown() {
    let server = MockServer::start();
    for key in ["PROJ-99", "OPS-98"] {
        server.mock(|when, then| {
            when.method(GET).path(format!("/rest/api/2/issue/{key}"));
            then.status(404).body("{}");
        });
    }

    let reply = pipeline(&server, Vec::new())
        .handle(&chat_message("PROJ-99 and OPS-98"))
        .await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn integration_pipeline_survives_partial_tracker_outage() {
    let server = MockServer::start();
    mock_issue(&server, "PROJ-1", "Login broken", "Open");
    mock_issue(&server, "PROJ-3", "Crash on save", "Open");
    server.mock(|when, then| {
        when.method(GET).path("/rest/api/2/issue/PROJ-2");
        then.status(500).body("boom");
    });

    let reply = pipeline(&server, Vec::new())
        .handle(&chat_message("PROJ-1 PROJ-2 PROJ-3"))
        .await
        .expect("partial failure should still reply");

    assert_eq!(reply.text, "Found 2 issues");
    let titles: Vec<_> = reply
        .attachments
        .iter()
        .map(|attachment| attachment.title.as_str())
        .collect();
    assert_eq!(titles, vec!["PROJ-1 Login broken", "PROJ-3 Crash on save"]);
}

#[tokio::test]
async fn integration_pipeline_validator_gate_short_circuits_tracker_calls() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET).path("/rest/api/2/issue/PROJ-1");
        then.status(200).json_body(serde_json::json!({ "id": "1", "key": "PROJ-1" }));
    });

    let validators: Vec<Box<dyn MessageValidator>> =
        vec![Box::new(TokenValidator::new(vec!["other".to_string()]))];
    let reply = pipeline(&server, validators)
        .handle(&chat_message("PROJ-1"))
        .await;

    assert!(reply.is_none());
    lookup.assert_calls(0);
}
