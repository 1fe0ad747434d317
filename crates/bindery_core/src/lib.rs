//! Core content types for the Bindery content framework.
//!
//! This crate provides the vocabulary shared by every Bindery component:
//! content identifiers, the per-holder metadata accessors that read and write
//! content attributes on domain types, the conversion registry that maps
//! identifiers across representations, and property paths that address a
//! content holder inside an entity.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod convert;
mod id;
mod metadata;
mod path;

pub use convert::ConversionService;
pub use id::ContentId;
pub use metadata::{ContentAttribute, ContentDescriptor, ContentDescriptorBuilder};
pub use path::PropertyPath;
