//! Entity repository error types.

/// Error raised by an entity repository while loading or saving metadata.
///
/// Repositories are supplied by the caller, so the failure surface is opaque
/// to this library; the message carries whatever the backing implementation
/// reported.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Repository Error: {} at line {} in {}", message, line, file)]
pub struct RepositoryError {
    /// Description of what went wrong
    pub message: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RepositoryError {
    /// Create a new repository error with automatic location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
