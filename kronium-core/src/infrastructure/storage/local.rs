//! Filesystem object storage for development setups

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error};
use url::Url;

use super::{join_url, parse_base_url};
use crate::domain::storage::{ObjectStorage, StorageError, StoredObject};

/// Writes objects below a root directory served at `public_base_url`
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: Url,
}

impl LocalObjectStorage {
    pub fn new(root: PathBuf, public_base_url: &str) -> Result<Self, StorageError> {
        Ok(Self {
            root,
            public_base_url: parse_base_url(public_base_url)?,
        })
    }

    /// Resolve `path` under the root, refusing anything that would escape it
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::UploadFailed {
                message: format!("invalid object path: {}", path),
            });
        }
        Ok(self.root.join(relative))
    }
}

fn io_failure(target: &Path, e: std::io::Error) -> StorageError {
    error!(path = %target.display(), error = %e, "Local storage write failed");
    StorageError::UploadFailed {
        message: format!("{}: {}", target.display(), e),
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(
        &self,
        path: &str,
        body: Bytes,
        _content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_failure(parent, e))?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|e| io_failure(&target, e))?;
        file.write_all(&body)
            .await
            .map_err(|e| io_failure(&target, e))?;
        file.flush().await.map_err(|e| io_failure(&target, e))?;

        debug!(path = %target.display(), size = body.len(), "Stored object on disk");

        Ok(StoredObject {
            path: path.to_string(),
            url: self.public_url(path),
        })
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base_url, path)
    }
}
