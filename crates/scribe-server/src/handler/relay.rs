//! Summary relay handler.

use axum::Router;
use axum::extract::State;
use axum::routing::post;
use scribe_webhook::RelayService;

use super::request::RelayText;
use super::response::Summary;
use crate::extract::Json;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for relay operations.
const TRACING_TARGET: &str = "scribe_server::handler::relay";

/// Forwards text to the webhook and returns its summary.
#[tracing::instrument(skip_all)]
async fn send_to_webhook(
    State(relay): State<RelayService>,
    Json(request): Json<RelayText>,
) -> Result<Json<Summary>> {
    let summary = relay.relay(request.text).await?;

    tracing::info!(
        target: TRACING_TARGET,
        summary_len = summary.len(),
        "summary relayed"
    );

    Ok(Json(Summary { summary }))
}

/// Returns a [`Router`] with the relay route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/send-to-make", post(send_to_webhook))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::{FixedRelay, create_test_server_with_relay};

    #[tokio::test]
    async fn returns_summary() -> anyhow::Result<()> {
        let relay = FixedRelay::summary("Ukupno 40 EUR");
        let server = create_test_server_with_relay(relay.clone()).await?;

        let response = server
            .post("/send-to-make")
            .json(&json!({ "text": "Račun br. 12\n\n" }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Summary>().summary, "Ukupno 40 EUR");
        assert_eq!(relay.received(), vec!["Račun br. 12\n\n".to_owned()]);

        Ok(())
    }

    #[tokio::test]
    async fn missing_text_is_relayed_as_empty() -> anyhow::Result<()> {
        let relay = FixedRelay::summary("nothing to summarize");
        let server = create_test_server_with_relay(relay.clone()).await?;

        let response = server.post("/send-to-make").json(&json!({})).await;

        response.assert_status_ok();
        assert_eq!(relay.received(), vec![String::new()]);

        Ok(())
    }

    #[tokio::test]
    async fn no_summary_is_a_server_error() -> anyhow::Result<()> {
        let server = create_test_server_with_relay(FixedRelay::no_summary()).await?;

        let response = server.post("/send-to-make").json(&json!({ "text": "x" })).await;

        response.assert_status_internal_server_error();
        let body = response.json::<Value>();
        assert_eq!(body["error"], "No summary returned from webhook");
        assert_eq!(body["name"], "no_summary");

        Ok(())
    }

    #[tokio::test]
    async fn transport_failure_is_a_server_error() -> anyhow::Result<()> {
        let server = create_test_server_with_relay(FixedRelay::unreachable()).await?;

        let response = server.post("/send-to-make").json(&json!({ "text": "x" })).await;

        response.assert_status_internal_server_error();
        assert_eq!(response.json::<Value>()["error"], "Failed to send to webhook");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_relay(FixedRelay::summary("unused")).await?;

        let response = server
            .post("/send-to-make")
            .text("{not json")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());

        Ok(())
    }
}
