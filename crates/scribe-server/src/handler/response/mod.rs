//! Response bodies returned by handlers.

mod error_response;
mod images;
mod monitors;
mod relay;

pub use error_response::ErrorResponse;
pub use images::ExtractedText;
pub use monitors::HealthStatus;
pub use relay::Summary;
