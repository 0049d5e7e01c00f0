//! Image upload and text extraction handlers.

use axum::Router;
use axum::extract::State;
use axum::routing::post;
use scribe_core::batch::{BatchProcessor, UploadedImage};

use super::response::ExtractedText;
use crate::extract::{Json, Multipart};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for image extraction.
const TRACING_TARGET: &str = "scribe_server::handler::images";

/// Multipart field carrying the images.
const FILES_FIELD: &str = "files";

/// Extracts text from every uploaded image.
///
/// Only file parts named `files` are considered; plain text fields are ignored
/// even under that name. A part with neither a file name nor content is an
/// unselected file input and is skipped. Reading stops once
/// one image more than the batch maximum has been collected, which is enough
/// for the batch to be rejected.
#[tracing::instrument(skip_all)]
async fn process_images(
    State(batch): State<BatchProcessor>,
    mut multipart: Multipart,
) -> Result<Json<ExtractedText>> {
    let limit = batch.max_files().saturating_add(1);
    let mut images = Vec::new();
    let mut has_files_part = false;

    while let Some(field) = multipart.next_field().await.inspect_err(|err| {
        tracing::warn!(target: TRACING_TARGET, error = %err, "failed to read multipart field");
    })? {
        if field.name() != Some(FILES_FIELD) {
            tracing::debug!(target: TRACING_TARGET, name = ?field.name(), "skipping field");
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_owned) else {
            tracing::debug!(target: TRACING_TARGET, "skipping text field named files");
            continue;
        };

        has_files_part = true;
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await.inspect_err(|err| {
            tracing::warn!(
                target: TRACING_TARGET,
                filename = %filename,
                error = %err,
                "failed to read upload"
            );
        })?;

        if filename.is_empty() && data.is_empty() {
            continue;
        }

        tracing::debug!(
            target: TRACING_TARGET,
            filename = %filename,
            content_type = ?content_type,
            size = data.len(),
            "upload received"
        );

        let mut image = UploadedImage::new(filename, data);
        if let Some(content_type) = content_type {
            image = image.with_content_type(content_type);
        }
        images.push(image);

        if images.len() >= limit {
            break;
        }
    }

    if !has_files_part {
        return Err(ErrorKind::MissingFiles.into_error());
    }

    let batch_size = images.len();
    let extracted_text = batch.process(images).await?;

    tracing::info!(
        target: TRACING_TARGET,
        batch_size,
        text_len = extracted_text.len(),
        "text extracted"
    );

    Ok(Json(ExtractedText { extracted_text }))
}

/// Returns a [`Router`] with the extraction route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/process-image", post(process_images))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Bytes;
    use axum_test::multipart::{MultipartForm, Part};
    use image::{GrayImage, Luma};
    use scribe_core::ServiceHealth;
    use scribe_core::mock::{MockConfig, MockProvider};
    use scribe_core::ocr::{OcrProvider, OcrService, TextRegion};
    use scribe_webhook::RelayService;
    use serde_json::Value;

    use super::*;
    use crate::handler::test::{
        FixedRelay, create_test_server_with_provider, create_test_server_with_state, png_bytes,
    };
    use crate::middleware::RouterRecoveryExt;
    use crate::service::ServiceConfig;

    /// Engine that takes a while for every image.
    struct SlowProvider;

    #[async_trait::async_trait]
    impl OcrProvider for SlowProvider {
        async fn recognize(&self, _image: Bytes) -> scribe_core::Result<Vec<TextRegion>> {
            tokio::time::sleep(Duration::from_millis(400)).await;
            Ok(vec![TextRegion::new("slow")])
        }

        async fn health_check(&self) -> scribe_core::Result<ServiceHealth> {
            Ok(ServiceHealth::healthy())
        }
    }

    fn image_part(name: &str) -> Part {
        Part::bytes(png_bytes(16, 8))
            .file_name(name.to_owned())
            .mime_type("image/png")
    }

    fn provider(text: &str) -> MockProvider {
        MockProvider::new(MockConfig {
            mock_text: Some(text.to_owned()),
        })
    }

    #[tokio::test]
    async fn extracts_text_from_each_image() -> anyhow::Result<()> {
        let (server, provider) = create_test_server_with_provider(provider("Račun\nUkupno")).await?;

        let form = MultipartForm::new()
            .add_part("files", image_part("a.png"))
            .add_part("files", image_part("b.png"))
            .add_part("files", image_part("c.png"));

        let response = server.post("/process-image").multipart(form).await;
        response.assert_status_ok();

        let body = response.json::<ExtractedText>();
        assert_eq!(body.extracted_text, "Račun\nUkupno\n\n".repeat(3));
        assert_eq!(provider.calls(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn accepts_exactly_the_maximum() -> anyhow::Result<()> {
        let (server, provider) = create_test_server_with_provider(provider("x")).await?;

        let form = (0..10).fold(MultipartForm::new(), |form, i| {
            form.add_part("files", image_part(&format!("{i}.png")))
        });

        let response = server.post("/process-image").multipart(form).await;
        response.assert_status_ok();
        assert_eq!(response.json::<ExtractedText>().extracted_text, "x\n\n".repeat(10));
        assert_eq!(provider.calls(), 10);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_more_than_the_maximum() -> anyhow::Result<()> {
        let (server, provider) = create_test_server_with_provider(provider("x")).await?;

        let form = (0..11).fold(MultipartForm::new(), |form, i| {
            form.add_part("files", image_part(&format!("{i}.png")))
        });

        let response = server.post("/process-image").multipart(form).await;
        response.assert_status_bad_request();

        let body = response.json::<Value>();
        assert_eq!(body["error"], "You can upload a maximum of 10 images");
        assert_eq!(provider.calls(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn rejects_missing_files_part() -> anyhow::Result<()> {
        let (server, _) = create_test_server_with_provider(MockProvider::default()).await?;

        let form = MultipartForm::new().add_text("other", "value");
        let response = server.post("/process-image").multipart(form).await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], "No files part");

        Ok(())
    }

    #[tokio::test]
    async fn text_field_named_files_is_not_an_upload() -> anyhow::Result<()> {
        let (server, provider) = create_test_server_with_provider(MockProvider::default()).await?;

        let form = MultipartForm::new().add_text("files", "value");
        let response = server.post("/process-image").multipart(form).await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], "No files part");
        assert_eq!(provider.calls(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn text_fields_beside_uploads_are_ignored() -> anyhow::Result<()> {
        let (server, provider) = create_test_server_with_provider(provider("scan")).await?;

        let form = MultipartForm::new()
            .add_text("files", "value")
            .add_part("files", image_part("a.png"));
        let response = server.post("/process-image").multipart(form).await;

        response.assert_status_ok();
        assert_eq!(response.json::<ExtractedText>().extracted_text, "scan\n\n");
        assert_eq!(provider.calls(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn slow_engine_completes_under_default_recovery() -> anyhow::Result<()> {
        let state = ServiceState::new(
            &ServiceConfig::default(),
            OcrService::new(SlowProvider),
            RelayService::new(FixedRelay::summary("summary")),
        );
        let router = routes().with_default_recovery();
        let server = create_test_server_with_state(router, state).await?;

        let form = (0..4).fold(MultipartForm::new(), |form, i| {
            form.add_part("files", image_part(&format!("{i}.png")))
        });
        let response = server.post("/process-image").multipart(form).await;

        response.assert_status_ok();
        assert_eq!(response.json::<ExtractedText>().extracted_text, "slow\n\n".repeat(4));

        Ok(())
    }

    #[tokio::test]
    async fn rejects_unselected_file_input() -> anyhow::Result<()> {
        let (server, provider) = create_test_server_with_provider(MockProvider::default()).await?;

        let empty = Part::bytes(Vec::new())
            .file_name(String::new())
            .mime_type("application/octet-stream");
        let form = MultipartForm::new().add_part("files", empty);
        let response = server.post("/process-image").multipart(form).await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], "No files selected");
        assert_eq!(provider.calls(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_fails_the_batch() -> anyhow::Result<()> {
        let (server, provider) = create_test_server_with_provider(provider("x")).await?;

        let corrupt = Part::bytes(b"definitely not an image".to_vec())
            .file_name("broken.jpg")
            .mime_type("image/jpeg");
        let form = MultipartForm::new()
            .add_part("files", image_part("first.png"))
            .add_part("files", image_part("second.png"))
            .add_part("files", corrupt)
            .add_part("files", image_part("fourth.png"))
            .add_part("files", image_part("fifth.png"));

        let response = server.post("/process-image").multipart(form).await;
        response.assert_status_internal_server_error();

        let body = response.json::<Value>();
        assert_eq!(body["error"], "Error processing file: broken.jpg");
        assert_eq!(body["file"], "broken.jpg");
        assert!(body.get("extracted_text").is_none());
        assert_eq!(provider.calls(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn engine_failure_names_the_file() -> anyhow::Result<()> {
        let (server, _) =
            create_test_server_with_provider(MockProvider::failing("model crashed")).await?;

        let form = MultipartForm::new().add_part("files", image_part("scan.png"));
        let response = server.post("/process-image").multipart(form).await;

        response.assert_status_internal_server_error();
        let body = response.json::<Value>();
        assert_eq!(body["error"], "Error processing file: scan.png");
        assert_eq!(body["name"], "extraction_engine_error");

        Ok(())
    }

    #[tokio::test]
    async fn accepts_any_decodable_format() -> anyhow::Result<()> {
        let (server, _) = create_test_server_with_provider(provider("bmp text")).await?;

        let image = GrayImage::from_fn(12, 12, |x, y| Luma([((x + y) * 10) as u8]));
        let mut buffer = std::io::Cursor::new(Vec::new());
        image.write_to(&mut buffer, image::ImageFormat::Bmp)?;

        let part = Part::bytes(buffer.into_inner())
            .file_name("scan.bmp")
            .mime_type("image/bmp");
        let form = MultipartForm::new().add_part("files", part);
        let response = server.post("/process-image").multipart(form).await;

        response.assert_status_ok();
        assert_eq!(response.json::<ExtractedText>().extracted_text, "bmp text\n\n");

        Ok(())
    }
}
