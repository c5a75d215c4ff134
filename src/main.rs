//! API server entry point.
//!
//! Parses flags, loads environment configuration, wires the store, the
//! service and the HTTP server, then serves until interrupted.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use sequence_api::config::Config;
use sequence_api::http_server::{HttpServer, SequenceState};
use sequence_api::observability::Logger;
use sequence_api::sequence::InMemorySequenceStore;

#[derive(Debug, Parser)]
#[command(name = "sequence-api", about = "CRUD backend for timed email sequences", version)]
struct Args {
    /// Host to bind, overrides API_HOST
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides API_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    Logger::init(config.logger.level);

    let state = Arc::new(SequenceState::new(InMemorySequenceStore::new()));
    let server = HttpServer::new(config.api, state);

    if let Err(err) = server.start(shutdown_signal()).await {
        Logger::error("api server failed", &[("err", &err.to_string())]);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Resolves on SIGINT, triggering graceful shutdown.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => Logger::info("shutting down the api", &[]),
        Err(err) => {
            // Without a signal handler the server can only be killed hard;
            // keep serving rather than shutting down immediately.
            Logger::error(
                "failed to install shutdown handler",
                &[("err", &err.to_string())],
            );
            std::future::pending::<()>().await;
        }
    }
}
