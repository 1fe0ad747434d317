//! Pluggable content storage backends for Bindery.
//!
//! This crate separates content (raw bytes in a filesystem, S3, or other
//! medium) from metadata (attributes on the owning domain type). A [`Store`]
//! maps opaque content identifiers to backend addresses and moves bytes; the
//! [`StoreRegistry`] picks the store for a holder type; renditions and
//! configuration live alongside.
//!
//! # Example
//!
//! ```rust
//! use bindery_core::ContentId;
//! use bindery_store::{FileSystemStore, Store};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemStore::new("/tmp/content")?;
//! let id = ContentId::generate();
//!
//! let resource = store.resolve(&id)?;
//! store.write(&resource, b"hello").await?;
//!
//! let data = store.read(&id).await?;
//! assert_eq!(data.as_deref(), Some(&b"hello"[..]));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use bindery_core::ContentId;
use bindery_error::BinderyResult;
use bytes::Bytes;
use std::ops::Range;

mod config;
mod filesystem;
mod registry;
mod rendition;
mod s3;

pub use bindery_error::{StorageError, StorageErrorKind};
pub use config::{BackendKind, StoreConfig};
pub use filesystem::FileSystemStore;
pub use registry::StoreRegistry;
pub use rendition::{Negotiation, Renderable, negotiate};
pub use s3::S3Store;

/// Trait for pluggable content storage backends.
///
/// Implementations move raw bytes between a storage medium and the caller.
/// Addresses are derived deterministically from the content identifier via
/// [`resolve`]; the resulting [`StoreResource`] is transient and never
/// persisted. An absent resource is an ordinary outcome (`Ok(None)` on reads,
/// a no-op on delete), not an error.
///
/// [`resolve`]: Store::resolve
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Backend name (e.g. "filesystem", "s3").
    fn backend(&self) -> &str;

    /// Derive the backend address for a content identifier.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the rendered identifier already
    /// carries this backend's own scheme prefix (double addressing), and a
    /// storage error when the rendering cannot form a valid address.
    fn resolve(&self, id: &ContentId) -> BinderyResult<StoreResource>;

    /// Read the full content stream.
    ///
    /// Returns `Ok(None)` when no resource exists at the resolved address.
    async fn read(&self, id: &ContentId) -> BinderyResult<Option<Bytes>>;

    /// Read part of the content stream.
    ///
    /// The range is half-open in byte offsets and is clamped to the stored
    /// length. Returns `Ok(None)` when no resource exists at the resolved
    /// address.
    async fn read_range(&self, id: &ContentId, range: Range<u64>) -> BinderyResult<Option<Bytes>>;

    /// Copy the full stream to the resolved address, returning the exact
    /// number of bytes written.
    ///
    /// The write is atomic from the caller's perspective where the medium
    /// permits; callers only update length metadata after this reports
    /// success.
    async fn write(&self, resource: &StoreResource, data: &[u8]) -> BinderyResult<u64>;

    /// Remove the resource at the resolved address; a no-op when absent.
    async fn delete(&self, id: &ContentId) -> BinderyResult<()>;

    /// Whether a resource exists at the resolved address.
    async fn exists(&self, id: &ContentId) -> BinderyResult<bool>;

    /// The rendition capability of this backend, when it has one.
    fn as_renderable(&self) -> Option<&dyn Renderable> {
        None
    }
}

/// Resolved backend address for one content identifier.
///
/// Transient: derived on demand from the identifier and the backend's
/// configuration, never stored in entity metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreResource {
    /// Full backend location (filesystem path, `s3://bucket/key` URI)
    pub location: String,
    /// Backend-relative key within the store
    pub key: String,
}
