//! Reqwest-based HTTP relay.
//!
//! # Example
//!
//! ```rust,ignore
//! use scribe_webhook::reqwest::{RelayClient, RelayConfig};
//!
//! let config = RelayConfig::new("https://hook.example.com/abc".parse()?);
//! let relay = RelayClient::new(config)?.into_service();
//! let summary = relay.relay("extracted text").await?;
//! ```

mod client;
mod config;

pub use client::RelayClient;
pub use config::RelayConfig;

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "scribe_webhook::reqwest";
