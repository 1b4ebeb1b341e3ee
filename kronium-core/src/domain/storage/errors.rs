//! Object storage errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("File type {content_type} not supported. Please use: {allowed}")]
    UnsupportedContentType {
        content_type: String,
        allowed: String,
    },

    #[error("File size too large ({size} bytes). Maximum size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("Uploaded file is empty")]
    EmptyPayload,

    #[error("Upload failed: {message}")]
    UploadFailed { message: String },

    #[error("Storage misconfigured: {message}")]
    Configuration { message: String },
}
