use std::fmt;

use bytes::Bytes;

/// A single uploaded image, owned by the request that carried it.
#[derive(Clone)]
pub struct UploadedImage {
    /// Client-supplied file name, used to report failures.
    pub filename: String,
    /// Client-supplied content type, if any.
    pub content_type: Option<String>,
    /// Raw encoded image bytes.
    pub data: Bytes,
}

impl UploadedImage {
    /// Creates a new upload from a file name and its bytes.
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Sets the content type reported by the client.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the size of the upload in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether the upload carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}
