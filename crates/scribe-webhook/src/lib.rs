#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod payload;
mod service;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

pub use error::{BoxedError, Error, Result};
pub use payload::{RelayPayload, SummaryResponse};
pub use service::RelayService;

/// Tracing target for relay operations.
pub const TRACING_TARGET: &str = "scribe_webhook";

/// Core trait for summary relays.
///
/// Implement this trait to forward text somewhere other than an HTTP webhook,
/// or to stub the relay out in tests.
#[async_trait::async_trait]
pub trait RelayProvider: Send + Sync {
    /// Forwards the text and returns the summary produced by the receiver.
    async fn relay(&self, payload: &RelayPayload) -> Result<String>;
}
