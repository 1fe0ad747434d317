//! Error types for the Bindery content framework.
//!
//! This crate provides the foundation error types used throughout the Bindery
//! ecosystem.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Two conditions deliberately do **not** appear here: "no content" travels as
//! an `Option`/outcome value through the core, and a failed rendition
//! negotiation is an ordinary outcome variant. Only genuine faults are errors.
//!
//! # Examples
//!
//! ```
//! use bindery_error::{BinderyResult, ConfigError};
//!
//! fn resolve_store() -> BinderyResult<()> {
//!     Err(ConfigError::new("no store registered for type `Document`"))?
//! }
//!
//! match resolve_store() {
//!     Ok(_) => println!("resolved"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod property;
mod repository;
mod search;
mod storage;

pub use config::ConfigError;
pub use error::{BinderyError, BinderyErrorKind, BinderyResult};
pub use property::{PropertyError, PropertyErrorKind};
pub use repository::RepositoryError;
pub use search::{SearchError, SearchErrorKind};
pub use storage::{StorageError, StorageErrorKind};
