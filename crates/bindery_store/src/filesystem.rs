//! Filesystem-based content store.
//!
//! Content is placed under a configured root directory, one file per content
//! identifier. Writes go through a temp file and rename so readers never see
//! a partial stream.

use crate::{Store, StoreResource};
use bindery_core::ContentId;
use bindery_error::{BinderyResult, ConfigError, StorageError, StorageErrorKind};
use bytes::Bytes;
use std::io::SeekFrom;
use std::ops::Range;
use std::path::{Component, Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use uuid::Uuid;

/// Filesystem storage backend.
///
/// Identifiers resolve to relative paths under the root; a single leading
/// separator in the rendering is stripped, and renderings that would escape
/// the root are refused.
pub struct FileSystemStore {
    root: PathBuf,
}

impl FileSystemStore {
    /// Create a new filesystem store rooted at `root`.
    ///
    /// Creates the root directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the root cannot be created or
    /// accessed.
    #[tracing::instrument(skip(root))]
    pub fn new(root: impl Into<PathBuf>) -> BinderyResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            ConfigError::new(format!(
                "Failed to create store root {}: {}",
                root.display(),
                e
            ))
        })?;

        tracing::info!(path = %root.display(), "Created filesystem store");
        Ok(Self { root })
    }
}

#[async_trait::async_trait]
impl Store for FileSystemStore {
    fn backend(&self) -> &str {
        "filesystem"
    }

    fn resolve(&self, id: &ContentId) -> BinderyResult<StoreResource> {
        let rendering = id.as_str();
        if rendering.starts_with("file://") {
            return Err(ConfigError::new(format!(
                "content id `{rendering}` already carries the file scheme"
            ))
            .into());
        }

        let key = rendering.strip_prefix('/').unwrap_or(rendering);
        let relative = Path::new(key);
        if relative
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(StorageError::new(StorageErrorKind::InvalidLocation(format!(
                "content id `{rendering}` escapes the store root"
            )))
            .into());
        }

        let path = self.root.join(relative);
        Ok(StoreResource {
            location: path.to_string_lossy().to_string(),
            key: key.to_string(),
        })
    }

    #[tracing::instrument(skip(self, id), fields(id = %id))]
    async fn read(&self, id: &ContentId) -> BinderyResult<Option<Bytes>> {
        let resource = self.resolve(id)?;
        let path = Path::new(&resource.location);

        match tokio::fs::read(path).await {
            Ok(data) => {
                tracing::debug!(
                    path = %path.display(),
                    size = data.len(),
                    "Retrieved content file"
                );
                Ok(Some(Bytes::from(data)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::new(StorageErrorKind::Read(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self, id), fields(id = %id, start = range.start, end = range.end))]
    async fn read_range(&self, id: &ContentId, range: Range<u64>) -> BinderyResult<Option<Bytes>> {
        let resource = self.resolve(id)?;
        let path = Path::new(&resource.location);

        let mut file = match tokio::fs::File::open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::Read(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        let len = file
            .metadata()
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Read(format!("{}: {}", path.display(), e)))
            })?
            .len();

        // Clamp to the stored length; an empty slice is a valid answer.
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return Ok(Some(Bytes::new()));
        }

        file.seek(SeekFrom::Start(start)).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Read(format!("{}: {}", path.display(), e)))
        })?;

        let mut buffer = vec![0u8; (end - start) as usize];
        file.read_exact(&mut buffer).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Read(format!("{}: {}", path.display(), e)))
        })?;

        tracing::debug!(
            path = %path.display(),
            start,
            end,
            "Retrieved content range"
        );
        Ok(Some(Bytes::from(buffer)))
    }

    #[tracing::instrument(skip(self, resource, data), fields(location = %resource.location, size = data.len()))]
    async fn write(&self, resource: &StoreResource, data: &[u8]) -> BinderyResult<u64> {
        let path = Path::new(&resource.location);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity. The temp
        // name suffixes the full file name with a fresh UUID: deriving it
        // by swapping the extension would let a dot-bearing id stage at
        // another id's stored location and rename those bytes away.
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!("{}.{}.tmp", file_name, Uuid::new_v4()));
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::Write(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            // A failed rename must not strand the staged bytes.
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::Write(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        tracing::info!(
            path = %path.display(),
            size = data.len(),
            "Stored content file"
        );
        Ok(data.len() as u64)
    }

    #[tracing::instrument(skip(self, id), fields(id = %id))]
    async fn delete(&self, id: &ContentId) -> BinderyResult<()> {
        let resource = self.resolve(id)?;
        let path = Path::new(&resource.location);

        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Deleted content file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::Delete(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self, id), fields(id = %id))]
    async fn exists(&self, id: &ContentId) -> BinderyResult<bool> {
        let resource = self.resolve(id)?;
        let path = Path::new(&resource.location);
        match tokio::fs::metadata(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::new(StorageErrorKind::Read(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}
