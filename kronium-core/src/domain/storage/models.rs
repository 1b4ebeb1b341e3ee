//! Upload policy and object paths

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;

use super::errors::StorageError;

/// Folder that service images are written under
pub const SERVICE_IMAGE_PREFIX: &str = "service-images";

/// A stored object and where it can be fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub path: String,
    pub url: String,
}

/// Checks applied to an upload before any bytes leave the process
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_content_types: Vec<String>,
    pub max_bytes: usize,
}

impl UploadPolicy {
    pub fn new(allowed_content_types: Vec<String>, max_bytes: usize) -> Self {
        Self {
            allowed_content_types,
            max_bytes,
        }
    }

    /// Accept or reject a payload, returning the file extension to store it under
    pub fn check(&self, content_type: &str, size: usize) -> Result<&'static str, StorageError> {
        let content_type = content_type.trim().to_ascii_lowercase();
        let allowed = self
            .allowed_content_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&content_type));

        let extension = extension_for(&content_type).filter(|_| allowed).ok_or_else(|| {
            StorageError::UnsupportedContentType {
                content_type: content_type.clone(),
                allowed: self.allowed_content_types.join(", "),
            }
        })?;

        if size == 0 {
            return Err(StorageError::EmptyPayload);
        }
        if size > self.max_bytes {
            return Err(StorageError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }

        Ok(extension)
    }
}

/// File extension for the image types the console accepts
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// `service-images/{unix_millis}-{random}.{ext}`
pub fn service_image_path(now: DateTime<Utc>, extension: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    format!(
        "{}/{}-{}.{}",
        SERVICE_IMAGE_PREFIX,
        now.timestamp_millis(),
        suffix,
        extension
    )
}
