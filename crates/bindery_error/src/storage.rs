//! Storage error types.

/// Kinds of storage errors.
///
/// Backend-specific transport failures (std::io, object_store) are
/// normalized into these kinds at the backend boundary so upstream layers
/// never need backend-specific handling. An absent resource is *not* an
/// error kind; reads report absence as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create a storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write content
    #[display("Failed to write content: {}", _0)]
    Write(String),
    /// Failed to read content
    #[display("Failed to read content: {}", _0)]
    Read(String),
    /// Failed to delete content
    #[display("Failed to delete content: {}", _0)]
    Delete(String),
    /// Object store transport failure
    #[display("Object store failure: {}", _0)]
    Backend(String),
    /// A content id resolved to an unusable storage location
    #[display("Invalid storage location: {}", _0)]
    InvalidLocation(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use bindery_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Read("permission denied".to_string()));
/// assert!(format!("{}", err).contains("read"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
