#![forbid(unsafe_code)]

//! `tasker` — MCP task-tracking server binary.
//!
//! Bootstraps configuration from the environment, connects the `SQLite`
//! pool, and serves the tool surface over stdio until interrupted.

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use tasker::config::GlobalConfig;
use tasker::mcp::handler::AppState;
use tasker::mcp::transport;
use tasker::persistence::db;
use tasker::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "tasker", about = "MCP task-tracking server", version, long_about = None)]
struct Cli {
    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("tasker server bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run())
}

async fn run() -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let config = Arc::new(GlobalConfig::from_env()?);
    if !config.allow_mutations {
        info!("mutation gate disabled; serving read-only");
    }
    info!("configuration loaded");

    // ── Initialize database ─────────────────────────────
    let pool = Arc::new(db::connect(&config.database_url).await?);
    info!("database connected");

    let state = Arc::new(AppState {
        config,
        db: Arc::clone(&pool),
    });

    // ── Shutdown wiring ─────────────────────────────────
    let ct = CancellationToken::new();
    let shutdown_ct = ct.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "failed to listen for shutdown signal");
        }
        info!("shutdown signal received");
        shutdown_ct.cancel();
    });

    // ── Serve ───────────────────────────────────────────
    let result = transport::serve_stdio(state, ct).await;

    db::close(&pool).await;
    info!("database pool closed");

    result
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let init_result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    init_result.map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))
}
