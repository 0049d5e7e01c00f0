//! Health check handler.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use scribe_core::ServiceHealth;
use scribe_core::ocr::OcrService;

use super::response::HealthStatus;
use crate::extract::Json;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "scribe_server::handler::monitors";

/// Reports whether the OCR engine can serve requests.
#[tracing::instrument(skip_all)]
async fn health_status(State(ocr): State<OcrService>) -> (StatusCode, Json<HealthStatus>) {
    let health = ocr.health_check().await.unwrap_or_else(|error| {
        tracing::warn!(target: TRACING_TARGET, error = %error, "health check failed");
        ServiceHealth::unhealthy(error.to_string())
    });

    let response = HealthStatus::from_health(ocr.name(), health);
    let status_code = if response.is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        engine = %response.engine,
        is_healthy = response.is_healthy,
        status_code = status_code.as_u16(),
        "health status prepared"
    );

    (status_code, Json(response))
}

/// Returns a [`Router`] with the health route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use scribe_core::mock::MockProvider;

    use super::*;
    use crate::handler::test::create_test_server_with_provider;

    #[tokio::test]
    async fn healthy_engine() -> anyhow::Result<()> {
        let (server, _) = create_test_server_with_provider(MockProvider::default()).await?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let status = response.json::<HealthStatus>();
        assert!(status.is_healthy);
        assert_eq!(status.engine, "mock");

        Ok(())
    }

    #[tokio::test]
    async fn unhealthy_engine() -> anyhow::Result<()> {
        let (server, _) =
            create_test_server_with_provider(MockProvider::failing("model missing")).await?;

        let response = server.get("/health").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let status = response.json::<HealthStatus>();
        assert!(!status.is_healthy);
        assert_eq!(status.message.as_deref(), Some("model missing"));

        Ok(())
    }
}
