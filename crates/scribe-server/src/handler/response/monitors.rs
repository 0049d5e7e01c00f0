use jiff::Timestamp;
use scribe_core::{ServiceHealth, ServiceStatus};
use serde::{Deserialize, Serialize};

/// Health of the service and its OCR engine.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Whether requests can currently be served.
    pub is_healthy: bool,
    /// Name of the OCR engine.
    pub engine: String,
    /// Engine status.
    pub status: ServiceStatus,
    /// Detail reported by the engine, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Engine check duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// When the check ran.
    pub updated_at: Timestamp,
}

impl HealthStatus {
    /// Builds a health status from an engine report.
    pub fn from_health(engine: impl Into<String>, health: ServiceHealth) -> Self {
        Self {
            is_healthy: health.is_operational(),
            engine: engine.into(),
            status: health.status,
            message: health.message,
            response_time_ms: health.response.map(|d| d.as_millis() as u64),
            updated_at: health.checked_at,
        }
    }
}
