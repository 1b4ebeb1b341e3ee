//! Object storage boundary

use async_trait::async_trait;
use bytes::Bytes;

use super::errors::StorageError;
use super::models::StoredObject;

/// Blob store that hands back publicly resolvable URLs
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write `body` at `path`, replacing nothing
    async fn put(
        &self,
        path: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;

    fn public_url(&self, path: &str) -> String;
}
