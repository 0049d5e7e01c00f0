//! Reqwest-based HTTP client for the summary relay.

use std::sync::Arc;

use reqwest::Client;

use super::{RelayConfig, TRACING_TARGET};
use crate::{Error, RelayPayload, RelayProvider, RelayService, Result, SummaryResponse};

/// Inner client that holds the HTTP client and configuration.
struct RelayClientInner {
    http: Client,
    config: RelayConfig,
}

/// HTTP relay that posts text to a configured webhook.
///
/// Connection failures, timeouts, non-2xx statuses and non-JSON bodies are
/// reported as [`Error::TransportFailure`]. A JSON reply without a non-empty
/// string `summary` is reported as [`Error::NoSummary`].
#[derive(Clone)]
pub struct RelayClient {
    inner: Arc<RelayClientInner>,
}

impl std::fmt::Debug for RelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl RelayClient {
    /// Creates a new relay client with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.effective_user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| Error::transport("failed to create HTTP client").with_source(e))?;

        tracing::debug!(
            target: TRACING_TARGET,
            webhook_url = %config.webhook_url,
            timeout_ms = config.timeout().map(|t| t.as_millis() as u64),
            "relay client created"
        );

        let inner = RelayClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.inner.config
    }

    /// Converts this client into a [`RelayService`] for dependency injection.
    pub fn into_service(self) -> RelayService {
        RelayService::new(self)
    }
}

#[async_trait::async_trait]
impl RelayProvider for RelayClient {
    async fn relay(&self, payload: &RelayPayload) -> Result<String> {
        let url = &self.inner.config.webhook_url;

        let response = self
            .inner
            .http
            .post(url.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::transport("request failed").with_source(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                target: TRACING_TARGET,
                webhook_url = %url,
                status = status.as_u16(),
                "webhook answered with an error status"
            );
            return Err(Error::transport(format!("webhook answered {status}")));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::transport("webhook reply is not JSON").with_source(e))?;

        SummaryResponse::from_value(body)
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use serde_json::{Value, json};
    use tokio::net::TcpListener;
    use url::Url;

    use super::*;

    async fn serve(router: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        Url::parse(&format!("http://{addr}/hook")).unwrap()
    }

    fn client(url: Url) -> RelayClient {
        RelayClient::new(RelayConfig::new(url).with_timeout(5)).unwrap()
    }

    #[tokio::test]
    async fn returns_summary_and_sends_text() {
        let router = Router::new().route(
            "/hook",
            post(|axum::Json(body): axum::Json<Value>| async move {
                let text = body["text"].as_str().unwrap_or_default().to_owned();
                axum::Json(json!({ "summary": format!("got: {text}"), "extra": true }))
            }),
        );
        let relay = client(serve(router).await);

        let summary = relay.relay(&RelayPayload::new("Račun 12")).await.unwrap();
        assert_eq!(summary, "got: Račun 12");
    }

    #[tokio::test]
    async fn empty_text_is_relayed() {
        let router = Router::new().route(
            "/hook",
            post(|axum::Json(body): axum::Json<Value>| async move {
                let received = body["text"].as_str() == Some("");
                axum::Json(json!({ "summary": format!("empty: {received}") }))
            }),
        );
        let relay = client(serve(router).await);

        let summary = relay.relay(&RelayPayload::default()).await.unwrap();
        assert_eq!(summary, "empty: true");
    }

    #[tokio::test]
    async fn missing_summary_is_reported() {
        let router = Router::new().route(
            "/hook",
            post(|| async { axum::Json(json!({ "status": "accepted" })) }),
        );
        let relay = client(serve(router).await);

        let error = relay.relay(&RelayPayload::new("text")).await.unwrap_err();
        assert!(matches!(error, Error::NoSummary));
    }

    #[tokio::test]
    async fn error_status_is_transport_failure() {
        let router = Router::new().route(
            "/hook",
            post(|| async { (StatusCode::BAD_GATEWAY, axum::Json(json!({ "summary": "x" }))) }),
        );
        let relay = client(serve(router).await);

        let error = relay.relay(&RelayPayload::new("text")).await.unwrap_err();
        assert!(matches!(error, Error::TransportFailure { .. }));
    }

    #[tokio::test]
    async fn non_json_reply_is_transport_failure() {
        let router = Router::new().route("/hook", post(|| async { "Accepted" }));
        let relay = client(serve(router).await);

        let error = relay.relay(&RelayPayload::new("text")).await.unwrap_err();
        assert!(matches!(error, Error::TransportFailure { .. }));
    }

    #[tokio::test]
    async fn unreachable_webhook_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let relay = client(Url::parse(&format!("http://{addr}/hook")).unwrap());
        let error = relay.relay(&RelayPayload::new("text")).await.unwrap_err();
        assert!(matches!(error, Error::TransportFailure { .. }));
    }
}
