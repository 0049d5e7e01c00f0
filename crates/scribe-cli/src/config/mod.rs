//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, shutdown
//! ├── middleware: MiddlewareConfig  # CORS, body limit, request timeout
//! ├── service: ServiceConfig        # Batch limits, enhancement
//! ├── relay: RelayConfig            # Webhook URL and timeout
//! ├── paddle: PaddleConfig          # Model paths (feature-gated)
//! └── mock: MockConfig              # Fixed OCR text (feature-gated)
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod middleware;
mod provider;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use middleware::MiddlewareConfig;
pub use provider::{create_ocr_service, create_relay_service};
use scribe_server::service::ServiceConfig;
use scribe_webhook::reqwest::RelayConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

#[cfg(not(any(feature = "paddle", feature = "mock")))]
compile_error!("enable at least one OCR engine feature: `paddle` or `mock`");

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "scribe")]
#[command(about = "Extracts text from uploaded photos and relays it for summarization")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, body limit, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Batch processing configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Webhook relay configuration.
    #[clap(flatten)]
    pub relay: RelayConfig,

    /// PaddleOCR model configuration.
    #[cfg(all(feature = "paddle", not(feature = "mock")))]
    #[clap(flatten)]
    pub paddle: scribe_paddle::PaddleConfig,

    /// Mock engine configuration.
    #[cfg(feature = "mock")]
    #[clap(flatten)]
    pub mock: scribe_core::mock::MockConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;

        #[cfg(all(feature = "paddle", not(feature = "mock")))]
        self.paddle
            .validate()
            .context("invalid PaddleOCR configuration")?;

        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            max_files = self.service.batch.max_files,
            threshold = self.service.batch.enhance.threshold,
            contrast = self.service.batch.enhance.contrast,
            "Batch configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            webhook_host = self.relay.webhook_url.host_str().unwrap_or_default(),
            timeout_secs = ?self.relay.http_timeout,
            "Relay configuration"
        );
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "paddle").then_some("paddle"),
            cfg!(feature = "mock").then_some("mock"),
            cfg!(feature = "dotenv").then_some("dotenv"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
