//! Relay client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the webhook relay client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct RelayConfig {
    /// URL that receives `{"text": ...}` and answers with `{"summary": ...}`
    #[cfg_attr(feature = "config", arg(long = "webhook-url", env = "WEBHOOK_URL"))]
    pub webhook_url: Url,

    /// HTTP request timeout in seconds (no timeout when unset)
    #[cfg_attr(
        feature = "config",
        arg(long = "webhook-timeout", env = "WEBHOOK_TIMEOUT")
    )]
    #[serde(default)]
    pub http_timeout: Option<u64>,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "webhook-user-agent", env = "WEBHOOK_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl RelayConfig {
    /// Creates a configuration for the given webhook URL.
    pub fn new(webhook_url: Url) -> Self {
        Self {
            webhook_url,
            http_timeout: None,
            user_agent: None,
        }
    }

    /// Returns the request timeout, if one is configured.
    ///
    /// A zero value is treated as no timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.http_timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(Self::default_user_agent)
    }

    fn default_user_agent() -> String {
        format!("scribe/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Sets the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = Some(timeout_secs);
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
