//! Content property orchestration for Bindery.
//!
//! This crate wires the pieces together: an [`EntityDescriptor`] maps
//! property paths to the content holders inside a root entity, the store
//! registry picks the backend for each holder type, and the
//! [`ContentService`] moves bytes and metadata in lockstep, persisting the
//! root entity through the application's [`EntityRepository`] after every
//! successful mutation.
//!
//! # Example
//!
//! ```rust
//! use bindery_core::{ContentDescriptor, ContentId, PropertyPath};
//! use bindery_service::{ContentService, EntityDescriptor, EntityRepository};
//! use bindery_store::{FileSystemStore, StoreRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default, Clone)]
//! struct Manual {
//!     content_id: Option<ContentId>,
//!     content_length: u64,
//! }
//!
//! #[derive(Debug, Default, Clone)]
//! struct Product {
//!     manual: Option<Manual>,
//! }
//!
//! struct NoopProducts;
//!
//! #[async_trait::async_trait]
//! impl EntityRepository<Product> for NoopProducts {
//!     type Key = u64;
//!
//!     async fn find_one(&self, _key: &u64) -> bindery_error::BinderyResult<Option<Product>> {
//!         Ok(None)
//!     }
//!
//!     async fn save(&self, _entity: &Product) -> bindery_error::BinderyResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> bindery_error::BinderyResult<()> {
//! let descriptor = EntityDescriptor::<Product>::new().single(
//!     "manual",
//!     |p: &Product| p.manual.as_ref(),
//!     |p: &mut Product| p.manual.get_or_insert_with(Manual::default),
//!     ContentDescriptor::builder()
//!         .content_id(|m: &Manual| m.content_id.clone(), |m, id| m.content_id = id)?
//!         .content_length(|m: &Manual| m.content_length, |m, len| m.content_length = len)?
//!         .build()?,
//! )?;
//!
//! let mut stores = StoreRegistry::new();
//! stores.register::<Manual>("manuals", Arc::new(FileSystemStore::new("/tmp/content")?))?;
//!
//! let service = ContentService::new(descriptor, Arc::new(stores), Arc::new(NoopProducts));
//!
//! let mut product = Product::default();
//! let path = PropertyPath::named("manual");
//! service
//!     .set_content(&mut product, &path, b"user guide", Some("text/plain"))
//!     .await?;
//!
//! let stored = service.get_content(&product, &path).await?;
//! assert!(stored.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod entity;
mod outcome;
mod range;
mod repository;
mod service;

pub use bindery_error::{PropertyError, PropertyErrorKind, RepositoryError};
pub use entity::EntityDescriptor;
pub use outcome::{
    ContentSummary, RangedContent, Retrieval, SetOutcome, StoredContent, UnsetOutcome,
};
pub use range::ByteRange;
pub use repository::EntityRepository;
pub use service::ContentService;
