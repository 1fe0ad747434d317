//! S3-backed content store.
//!
//! Bytes live as objects in a bucket; addresses are derived by prefixing the
//! identifier rendering with `s3://{bucket}/`. The backend talks to S3
//! through an [`ObjectStore`] handle, so tests can inject an in-memory
//! implementation in place of the real service.

use crate::{Store, StoreConfig, StoreResource};
use bindery_core::ContentId;
use bindery_error::{BinderyResult, ConfigError, StorageError, StorageErrorKind};
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::ops::Range;
use std::sync::Arc;

/// S3 storage backend.
pub struct S3Store {
    object_store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl S3Store {
    /// Create a new S3 store from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the bucket is missing or the S3
    /// client cannot be constructed from the supplied settings.
    #[tracing::instrument(skip(config))]
    pub fn new(config: &StoreConfig) -> BinderyResult<Self> {
        let bucket = config
            .bucket
            .clone()
            .ok_or_else(|| ConfigError::new("bucket required for the s3 backend"))?;

        let mut builder = AmazonS3Builder::new().with_bucket_name(&bucket);

        if let Some(region) = &config.region {
            builder = builder.with_region(region);
        }
        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        if config.allow_http {
            builder = builder.with_allow_http(true);
        }
        if let Some(access_key_id) = &config.access_key_id {
            builder = builder.with_access_key_id(access_key_id);
        }
        if let Some(secret_access_key) = &config.secret_access_key {
            builder = builder.with_secret_access_key(secret_access_key);
        }

        let object_store = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build S3 client: {}", e)))?;

        tracing::info!(bucket = %bucket, "Created s3 store");
        Ok(Self::with_object_store(Arc::new(object_store), bucket))
    }

    /// Create an S3 store over an existing object store handle (for testing).
    pub fn with_object_store(object_store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            object_store,
            bucket: bucket.into(),
        }
    }

    /// The bucket this store addresses.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait::async_trait]
impl Store for S3Store {
    fn backend(&self) -> &str {
        "s3"
    }

    fn resolve(&self, id: &ContentId) -> BinderyResult<StoreResource> {
        let rendering = id.as_str();
        if rendering.starts_with("s3://") {
            return Err(ConfigError::new(format!(
                "content id `{rendering}` already carries the s3 scheme"
            ))
            .into());
        }

        let key = rendering.strip_prefix('/').unwrap_or(rendering);
        Ok(StoreResource {
            location: format!("s3://{}/{}", self.bucket, key),
            key: key.to_string(),
        })
    }

    #[tracing::instrument(skip(self, id), fields(id = %id))]
    async fn read(&self, id: &ContentId) -> BinderyResult<Option<Bytes>> {
        let resource = self.resolve(id)?;
        let path = ObjectPath::from(resource.key.as_str());

        match self.object_store.get(&path).await {
            Ok(result) => {
                let data = result.bytes().await.map_err(|e| {
                    StorageError::new(StorageErrorKind::Backend(format!(
                        "{}: {}",
                        resource.location, e
                    )))
                })?;
                tracing::debug!(
                    location = %resource.location,
                    size = data.len(),
                    "Retrieved content object"
                );
                Ok(Some(data))
            }
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(StorageError::new(StorageErrorKind::Backend(format!(
                "{}: {}",
                resource.location, e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self, id), fields(id = %id, start = range.start, end = range.end))]
    async fn read_range(&self, id: &ContentId, range: Range<u64>) -> BinderyResult<Option<Bytes>> {
        let resource = self.resolve(id)?;
        let path = ObjectPath::from(resource.key.as_str());

        match self.object_store.get_range(&path, range).await {
            Ok(data) => Ok(Some(data)),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(StorageError::new(StorageErrorKind::Backend(format!(
                "{}: {}",
                resource.location, e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self, resource, data), fields(location = %resource.location, size = data.len()))]
    async fn write(&self, resource: &StoreResource, data: &[u8]) -> BinderyResult<u64> {
        let path = ObjectPath::from(resource.key.as_str());
        let payload = Bytes::copy_from_slice(data);

        self.object_store
            .put(&path, payload.into())
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Backend(format!(
                    "{}: {}",
                    resource.location, e
                )))
            })?;

        tracing::info!(
            location = %resource.location,
            size = data.len(),
            "Stored content object"
        );
        Ok(data.len() as u64)
    }

    #[tracing::instrument(skip(self, id), fields(id = %id))]
    async fn delete(&self, id: &ContentId) -> BinderyResult<()> {
        let resource = self.resolve(id)?;
        let path = ObjectPath::from(resource.key.as_str());

        match self.object_store.delete(&path).await {
            Ok(()) => {
                tracing::info!(location = %resource.location, "Deleted content object");
                Ok(())
            }
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::Backend(format!(
                "{}: {}",
                resource.location, e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self, id), fields(id = %id))]
    async fn exists(&self, id: &ContentId) -> BinderyResult<bool> {
        let resource = self.resolve(id)?;
        let path = ObjectPath::from(resource.key.as_str());

        match self.object_store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::new(StorageErrorKind::Backend(format!(
                "{}: {}",
                resource.location, e
            )))
            .into()),
        }
    }
}
