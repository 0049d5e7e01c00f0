//! [`Error`], [`ErrorKind`] and [`Result`].

mod batch_error;
mod http_error;
mod relay_error;

pub use http_error::{Error, ErrorKind, Result};
