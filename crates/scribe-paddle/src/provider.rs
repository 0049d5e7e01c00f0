//! Async provider backed by a dedicated engine thread.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;
use std::time::Instant;

use bytes::Bytes;
use scribe_core::ServiceHealth;
use scribe_core::ocr::{OcrProvider, OcrService, TextRegion};
use tokio::sync::{mpsc, oneshot};

use crate::{Error, PaddleConfig, PaddleEngine, Recognizer, Result, TRACING_TARGET};

/// A queued recognition request.
struct Job {
    image: Bytes,
    reply: oneshot::Sender<Result<Vec<TextRegion>>>,
}

/// OCR provider that serializes all recognition onto one worker thread.
///
/// Cloning the provider shares the same worker. The worker exits once every
/// clone has been dropped.
#[derive(Clone, Debug)]
pub struct PaddleProvider {
    jobs: mpsc::Sender<Job>,
}

impl PaddleProvider {
    /// Loads the PaddleOCR models and starts the worker thread.
    ///
    /// Returns once the models are loaded, or with the load error.
    pub async fn spawn(config: PaddleConfig) -> Result<Self> {
        let capacity = config.effective_queue_capacity();
        Self::spawn_with(capacity, move || PaddleEngine::load(&config)).await
    }

    /// Starts a worker around any recognizer.
    ///
    /// The recognizer is constructed on the worker thread by `load`.
    pub async fn spawn_with<F, R>(capacity: usize, load: F) -> Result<Self>
    where
        F: FnOnce() -> Result<R> + Send + 'static,
        R: Recognizer + 'static,
    {
        let (jobs, queue) = mpsc::channel::<Job>(capacity.max(1));
        let (ready_tx, ready_rx) = oneshot::channel::<Result<()>>();

        thread::Builder::new()
            .name("scribe-paddle".into())
            .spawn(move || match load() {
                Ok(recognizer) => {
                    let _ = ready_tx.send(Ok(()));
                    run_worker(recognizer, queue);
                }
                Err(error) => {
                    let _ = ready_tx.send(Err(error));
                }
            })
            .map_err(|_| Error::WorkerStopped)?;

        ready_rx.await.map_err(|_| Error::Panicked)??;

        tracing::info!(target: TRACING_TARGET, capacity, "engine worker started");
        Ok(Self { jobs })
    }

    /// Wraps this provider into an OCR service.
    pub fn into_service(self) -> OcrService {
        OcrService::new(self).with_name("paddle")
    }

    async fn submit(&self, image: Bytes) -> Result<Vec<TextRegion>> {
        let (reply, response) = oneshot::channel();
        self.jobs
            .send(Job { image, reply })
            .await
            .map_err(|_| Error::WorkerStopped)?;

        response.await.map_err(|_| Error::WorkerStopped)?
    }
}

/// Processes queued jobs until every sender is dropped.
fn run_worker<R: Recognizer>(mut recognizer: R, mut queue: mpsc::Receiver<Job>) {
    while let Some(Job { image, reply }) = queue.blocking_recv() {
        let started_at = Instant::now();
        let image_bytes = image.len();

        let result = catch_unwind(AssertUnwindSafe(|| -> Result<Vec<TextRegion>> {
            let decoded = image::load_from_memory(&image)?;
            recognizer.recognize(&decoded)
        }))
        .unwrap_or_else(|_| {
            tracing::error!(target: TRACING_TARGET, image_bytes, "engine panicked");
            Err(Error::Panicked)
        });

        tracing::debug!(
            target: TRACING_TARGET,
            image_bytes,
            ok = result.is_ok(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "job finished"
        );

        // The requester may have gone away; the result is simply dropped.
        let _ = reply.send(result);
    }

    tracing::info!(target: TRACING_TARGET, "engine worker stopped");
}

#[async_trait::async_trait]
impl OcrProvider for PaddleProvider {
    async fn recognize(&self, image: Bytes) -> scribe_core::Result<Vec<TextRegion>> {
        Ok(self.submit(image).await?)
    }

    async fn health_check(&self) -> scribe_core::Result<ServiceHealth> {
        if self.jobs.is_closed() {
            return Ok(ServiceHealth::unhealthy("engine worker is not running"));
        }

        Ok(ServiceHealth::healthy())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use image::{DynamicImage, GrayImage, ImageFormat};

    use super::*;

    /// Reports image width and how many calls overlapped.
    struct Probe {
        active: Arc<AtomicUsize>,
        max_active: Arc<AtomicUsize>,
    }

    impl Recognizer for Probe {
        fn recognize(&mut self, image: &DynamicImage) -> Result<Vec<TextRegion>> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(5));
            self.active.fetch_sub(1, Ordering::SeqCst);

            if image.width() == 1 {
                panic!("probe panic");
            }

            Ok(vec![TextRegion::new(format!("width {}", image.width()))])
        }
    }

    fn png(width: u32) -> Bytes {
        let mut buffer = Cursor::new(Vec::new());
        GrayImage::new(width, 4)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        Bytes::from(buffer.into_inner())
    }

    async fn probe() -> (PaddleProvider, Arc<AtomicUsize>) {
        let max_active = Arc::new(AtomicUsize::new(0));
        let probe = Probe {
            active: Arc::new(AtomicUsize::new(0)),
            max_active: max_active.clone(),
        };
        let provider = PaddleProvider::spawn_with(4, move || Ok(probe)).await.unwrap();
        (provider, max_active)
    }

    #[tokio::test]
    async fn concurrent_requests_never_overlap() {
        let (provider, max_active) = probe().await;

        let tasks: Vec<_> = (2..10)
            .map(|width| {
                let provider = provider.clone();
                tokio::spawn(async move { provider.recognize(png(width)).await })
            })
            .collect();

        for (task, width) in tasks.into_iter().zip(2..10) {
            let regions = task.await.unwrap().unwrap();
            assert_eq!(regions[0].text, format!("width {width}"));
        }
        assert_eq!(max_active.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panics_are_reported_and_worker_survives() {
        let (provider, _) = probe().await;

        let error = provider.submit(png(1)).await.unwrap_err();
        assert!(matches!(error, Error::Panicked));

        let regions = provider.recognize(png(3)).await.unwrap();
        assert_eq!(regions[0].text, "width 3");
    }

    #[tokio::test]
    async fn undecodable_bytes_are_rejected() {
        let (provider, _) = probe().await;

        let error = provider
            .recognize(Bytes::from_static(b"garbage"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), scribe_core::ErrorKind::InvalidInput);
        assert!(provider.health_check().await.unwrap().is_operational());
    }

    #[tokio::test]
    async fn load_failure_is_returned_from_spawn() {
        let result = PaddleProvider::spawn_with(1, || -> Result<Probe> {
            Err(Error::ModelLoad {
                model: "detection",
                message: "corrupt".into(),
            })
        })
        .await;

        assert!(matches!(result, Err(Error::ModelLoad { .. })));
    }

    #[tokio::test]
    async fn missing_models_fail_to_spawn() {
        let config = PaddleConfig::new("/nonexistent/det", "/nonexistent/rec", "/nonexistent/keys");
        let result = PaddleProvider::spawn(config).await;

        assert!(matches!(result, Err(Error::MissingModel { .. })));
    }
}
