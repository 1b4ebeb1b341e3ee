//! Object storage backends

mod local;
mod s3;

pub use local::LocalObjectStorage;
pub use s3::S3ObjectStorage;

use std::sync::Arc;
use url::Url;

use crate::config::{StorageBackend, StorageConfig};
use crate::domain::storage::{ObjectStorage, StorageError};

/// Public base URL with a guaranteed trailing slash so `join` appends
fn parse_base_url(raw: &str) -> Result<Url, StorageError> {
    let normalized = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalized).map_err(|e| StorageError::Configuration {
        message: format!("invalid public_base_url '{}': {}", raw, e),
    })
}

fn join_url(base: &Url, path: &str) -> String {
    base.join(path.trim_start_matches('/'))
        .map(String::from)
        .unwrap_or_else(|_| format!("{}{}", base, path.trim_start_matches('/')))
}

/// Build the backend selected in configuration
pub async fn create_object_storage(
    config: &StorageConfig,
) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    match config.backend {
        StorageBackend::S3 => Ok(Arc::new(S3ObjectStorage::from_config(config).await?)),
        StorageBackend::Local => Ok(Arc::new(LocalObjectStorage::new(
            config.local_root.clone(),
            &config.public_base_url,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_tolerates_slashes() {
        let base = parse_base_url("https://cdn.kronium.test/services").unwrap();
        assert_eq!(
            join_url(&base, "/service-images/1-abc.png"),
            "https://cdn.kronium.test/services/service-images/1-abc.png"
        );

        let base = parse_base_url("https://cdn.kronium.test/services/").unwrap();
        assert_eq!(
            join_url(&base, "service-images/1-abc.png"),
            "https://cdn.kronium.test/services/service-images/1-abc.png"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(StorageError::Configuration { .. })
        ));
    }
}
