//! Middleware configuration for the HTTP server.
//!
//! All middleware configs are re-exported from `scribe-server` and support
//! both CLI arguments and environment variables.
//!
//! # Example
//!
//! ```bash
//! scribe --cors-origins "https://example.com" --request-timeout 60
//! ```

use clap::Args;
use scribe_server::middleware::{RecoveryConfig, SecurityConfig};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Middleware configuration combining security and recovery settings.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// CORS rules and request body limit.
    #[clap(flatten)]
    pub security: SecurityConfig,

    /// Recovery middleware configuration.
    ///
    /// Controls request timeout and panic recovery behavior.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.security.cors.allowed_origins,
            credentials = self.security.cors.allow_credentials,
            max_body_size = self.security.max_body_size,
            "Security configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = ?self.recovery.request_timeout,
            "Recovery configuration"
        );
    }
}
