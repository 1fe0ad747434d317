//! Bindery - Content attachment for domain entities
//!
//! Bindery attaches binary content (files, blobs) to the domain entities an
//! application already persists. The entity keeps three pieces of metadata on
//! its own fields (an opaque content identifier, the stored length, and a mime
//! type); the bytes live behind a pluggable store backend; a keyword-search
//! layer maps fulltext matches back into typed identifiers.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bindery::{
//!     ContentDescriptor, ContentService, EntityDescriptor, FileSystemStore,
//!     PropertyPath, StoreRegistry,
//! };
//! use std::sync::Arc;
//!
//! let attachment = ContentDescriptor::builder()
//!     .content_id(|a: &Attachment| a.content_id.clone(), |a, id| a.content_id = id)?
//!     .content_length(|a: &Attachment| a.content_length, |a, len| a.content_length = len)?
//!     .build()?;
//!
//! let descriptor = EntityDescriptor::<Report>::new().single(
//!     "cover",
//!     |r: &Report| r.cover.as_ref(),
//!     |r: &mut Report| r.cover.get_or_insert_default(),
//!     attachment,
//! )?;
//!
//! let mut stores = StoreRegistry::new();
//! stores.register::<Attachment>("attachments", Arc::new(FileSystemStore::new("/var/content")?))?;
//!
//! let service = ContentService::new(descriptor, Arc::new(stores), repository);
//! service.set_content(&mut report, &PropertyPath::named("cover"), &bytes, Some("application/pdf")).await?;
//! ```
//!
//! # Architecture
//!
//! Bindery is organized as a workspace with focused crates:
//!
//! - `bindery_error` - Error types
//! - `bindery_core` - Content identifiers, metadata accessors, conversions, property paths
//! - `bindery_store` - Store backends (filesystem, S3), the store registry, rendition negotiation
//! - `bindery_search` - Solr query builders and the typed searcher
//! - `bindery_service` - Content orchestration over entities, stores, and the repository
//!
//! This crate (`bindery`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use bindery_error::{
    BinderyError, BinderyErrorKind, BinderyResult, ConfigError, PropertyError, PropertyErrorKind,
    RepositoryError, SearchError, SearchErrorKind, StorageError, StorageErrorKind,
};

pub use bindery_core::{
    ContentAttribute, ContentDescriptor, ContentDescriptorBuilder, ContentId, ConversionService,
    PropertyPath,
};

pub use bindery_store::{
    BackendKind, FileSystemStore, Negotiation, Renderable, S3Store, Store, StoreConfig,
    StoreRegistry, StoreResource, negotiate,
};

pub use bindery_search::{
    SearchDocument, SearchTransport, Searcher, SolrClient, TransportFailure, query,
};

pub use bindery_service::{
    ByteRange, ContentService, ContentSummary, EntityDescriptor, EntityRepository, RangedContent,
    Retrieval, SetOutcome, StoredContent, UnsetOutcome,
};
