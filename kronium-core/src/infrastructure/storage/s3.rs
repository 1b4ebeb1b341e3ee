//! S3-compatible object storage

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{error, info};
use url::Url;

use super::{join_url, parse_base_url};
use crate::config::StorageConfig;
use crate::domain::storage::{ObjectStorage, StorageError, StoredObject};

/// Writes objects to a bucket on AWS S3 or a compatible provider
pub struct S3ObjectStorage {
    client: S3Client,
    bucket: String,
    public_base_url: Url,
}

impl S3ObjectStorage {
    pub fn new(client: S3Client, bucket: impl Into<String>, public_base_url: &str) -> Result<Self, StorageError> {
        Ok(Self {
            client,
            bucket: bucket.into(),
            public_base_url: parse_base_url(public_base_url)?,
        })
    }

    /// Build a client from explicit keys, or from the default AWS provider chain when none are set
    pub async fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let region = Region::new(config.region.clone());

        let mut builder = match (&config.access_key_id, &config.secret_access_key) {
            (Some(key), Some(secret)) => aws_sdk_s3::Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .region(region)
                .credentials_provider(Credentials::new(key, secret, None, None, "kronium-storage")),
            _ => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        };

        if let Some(endpoint) = &config.endpoint {
            // Custom endpoints (MinIO, Supabase) address buckets by path
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self::new(
            S3Client::from_conf(builder.build()),
            config.bucket.clone(),
            &config.public_base_url,
        )
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    #[tracing::instrument(skip(self, body), fields(bucket = %self.bucket, size = body.len()))]
    async fn put(
        &self,
        path: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .cache_control("max-age=3600")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                error!(path, error = %e, "S3 upload failed");
                StorageError::UploadFailed {
                    message: e.to_string(),
                }
            })?;

        info!(path, "Stored object");

        Ok(StoredObject {
            path: path.to_string(),
            url: self.public_url(path),
        })
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base_url, path)
    }
}
