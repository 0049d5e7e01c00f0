//! Application state and dependency injection.

mod config;

use scribe_core::batch::BatchProcessor;
use scribe_core::ocr::OcrService;
use scribe_webhook::RelayService;

pub use crate::service::config::ServiceConfig;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Every field is
/// cheap to clone and shared by all requests; the OCR engine behind
/// [`OcrService`] is created once at startup.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub ocr: OcrService,
    pub relay: RelayService,

    // Internal services:
    pub batch: BatchProcessor,
}

impl ServiceState {
    /// Builds application state around the shared OCR engine and relay.
    pub fn new(config: &ServiceConfig, ocr: OcrService, relay: RelayService) -> Self {
        Self {
            batch: BatchProcessor::new(ocr.clone(), config.batch),
            ocr,
            relay,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(ocr: OcrService);
impl_di!(relay: RelayService);

// Internal services:
impl_di!(batch: BatchProcessor);
