//! Configuration error types.

/// Configuration error with source location.
///
/// Covers the "not configured" class of faults: a store lookup with no
/// registration, a duplicate or missing metadata accessor, an invalid
/// backend configuration, or a content id that collides with a backend's
/// addressing scheme. These are fatal for the request that hit them and map
/// to a client/config condition at the boundary, never a server crash.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use bindery_error::ConfigError;
    ///
    /// let err = ConfigError::new("duplicate registration for attribute `ContentId`");
    /// assert!(err.message.contains("duplicate"));
    /// ```
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
