//! `jitterd` binary: loads configuration and runs the webhook server.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use jitter_server::{load_config, run_webhook_server};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "jitterd",
    about = "Chat bot that replies with issue summaries for tracker keys mentioned in messages",
    version
)]
struct Cli {
    #[arg(env = "JITTER_CONFIG", help = "Path to the TOML configuration file.")]
    config: PathBuf,

    #[arg(
        long,
        env = "JITTER_BIND",
        help = "Override the configured listen address, e.g. 127.0.0.1:4567."
    )]
    bind: Option<String>,
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    run_webhook_server(config).await
}
