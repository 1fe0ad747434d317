//! Top-level error wrapper types.

use crate::{ConfigError, PropertyError, RepositoryError, SearchError, StorageError};

/// Union of the error families raised across the bindery crates.
///
/// # Examples
///
/// ```
/// use bindery_error::{BinderyError, StorageError, StorageErrorKind};
///
/// let storage_err = StorageError::new(StorageErrorKind::Read("io failure".into()));
/// let err: BinderyError = storage_err.into();
/// assert!(format!("{}", err).contains("Storage Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum BinderyErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Content property navigation error
    #[from(PropertyError)]
    Property(PropertyError),
    /// Entity repository error
    #[from(RepositoryError)]
    Repository(RepositoryError),
    /// Fulltext search error
    #[from(SearchError)]
    Search(SearchError),
    /// Storage backend error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Bindery error with kind discrimination.
///
/// # Examples
///
/// ```
/// use bindery_error::{BinderyResult, ConfigError};
///
/// fn might_fail() -> BinderyResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Bindery Error: {}", _0)]
pub struct BinderyError(Box<BinderyErrorKind>);

impl BinderyError {
    /// Create a new error from a kind.
    pub fn new(kind: BinderyErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BinderyErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to BinderyErrorKind
impl<T> From<T> for BinderyError
where
    T: Into<BinderyErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for bindery operations.
///
/// # Examples
///
/// ```
/// use bindery_error::{BinderyResult, RepositoryError};
///
/// fn load_entity() -> BinderyResult<String> {
///     Err(RepositoryError::new("row not found"))?
/// }
/// ```
pub type BinderyResult<T> = std::result::Result<T, BinderyError>;
