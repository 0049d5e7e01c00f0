//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Recovery: panics and timeouts become JSON error responses
//! - Observability: request IDs and tracing spans
//! - Security: CORS and request body limits
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use axum::Router;
//! use scribe_server::middleware::{
//!     RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//!     SecurityConfig,
//! };
//!
//! let app = Router::new()
//!     .with_security(&SecurityConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod observability;
mod recovery;
mod security;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, DEFAULT_MAX_BODY_SIZE, RouterSecurityExt, SecurityConfig};
