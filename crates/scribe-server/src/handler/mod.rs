//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use scribe_server::handler::routes;
//! use scribe_server::service::{ServiceConfig, ServiceState};
//!
//! let state = ServiceState::new(&ServiceConfig::default(), ocr, relay);
//! let router: axum::Router = routes().with_state(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod images;
mod index;
mod monitors;
mod relay;
pub mod request;
pub mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes and a JSON `404` fallback.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(index::routes())
        .merge(images::routes())
        .merge(relay::routes())
        .merge(monitors::routes())
        .fallback(handler)
}
