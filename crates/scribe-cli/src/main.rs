#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use scribe_server::handler::routes;
use scribe_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use scribe_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig, create_ocr_service, create_relay_service};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "scribe_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "scribe_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "scribe_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let ocr = create_ocr_service(&cli)
        .await
        .context("failed to create OCR service")?;
    let relay = create_relay_service(&cli).context("failed to create webhook relay")?;

    let state = ServiceState::new(&cli.service, ocr, relay);
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. Security - CORS, headers, body limit
/// 4. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_state(state)
        .with_security(&middleware.security)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
