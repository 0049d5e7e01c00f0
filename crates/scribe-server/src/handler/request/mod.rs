//! Request bodies accepted by handlers.

mod relay;

pub use relay::RelayText;
