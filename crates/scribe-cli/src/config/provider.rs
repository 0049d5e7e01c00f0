//! Service provider construction.

use anyhow::Context;
use scribe_core::ocr::OcrService;
use scribe_webhook::RelayService;
use scribe_webhook::reqwest::RelayClient;

use super::Cli;
use crate::TRACING_TARGET_SERVER_STARTUP;

/// Creates the OCR service selected at compile time.
///
/// The mock engine wins when both engine features are enabled.
#[cfg(feature = "mock")]
pub async fn create_ocr_service(cli: &Cli) -> anyhow::Result<OcrService> {
    tracing::warn!(
        target: TRACING_TARGET_SERVER_STARTUP,
        "using the mock OCR engine, recognized text is fixed"
    );

    Ok(cli.mock.clone().into_service())
}

/// Creates the OCR service selected at compile time.
///
/// Loads the PaddleOCR models once; the engine is shared by every request.
///
/// # Errors
///
/// Returns an error if a model file is missing or cannot be loaded.
#[cfg(all(feature = "paddle", not(feature = "mock")))]
pub async fn create_ocr_service(cli: &Cli) -> anyhow::Result<OcrService> {
    use scribe_paddle::PaddleProvider;

    let provider = PaddleProvider::spawn(cli.paddle.clone())
        .await
        .context("failed to load PaddleOCR models")?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        detection_model = %cli.paddle.detection_model.display(),
        recognition_model = %cli.paddle.recognition_model.display(),
        "PaddleOCR engine ready"
    );

    Ok(provider.into_service())
}

/// Creates the webhook relay service.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn create_relay_service(cli: &Cli) -> anyhow::Result<RelayService> {
    let client = RelayClient::new(cli.relay.clone()).context("failed to create relay client")?;
    Ok(client.into_service())
}
