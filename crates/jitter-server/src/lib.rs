//! Configuration loading and the inbound webhook transport.

pub mod server_config;
pub mod webhook_server;

pub use server_config::{
    load_config, HttpConfig, JiraConfig, MessageConfig, ServerConfig, ValidationConfig,
};
pub use webhook_server::{build_detect_service, run_webhook_server};
