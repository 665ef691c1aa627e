//! `requisition-server`: serves the request store API.
//!
//! Usage:
//!   requisition-server [--config <path>] [--listen <addr>] [--json-logs]

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use requisition::{init_logging, load_or_default, router, AppState, LogFormat, SharedDatabase};

#[derive(Parser, Debug)]
#[command(name = "requisition-server", about = "Request store HTTP server", version)]
struct Cli {
    /// Path to a JSON config file. Defaults apply when omitted.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Listen address, overriding the config and REQUISITION_LISTEN.
    #[arg(long = "listen")]
    listen: Option<String>,

    /// Emit log lines as JSON.
    #[arg(long = "json-logs")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_logging(format, "info")?;

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(listen) = cli.listen {
        config.server.listen = listen;
    }

    let location = config.database.location();
    info!(location = ?location, "Request store configured");

    let app = router(AppState::new(SharedDatabase::new(location)));

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    info!("Requisition server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Requisition server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
