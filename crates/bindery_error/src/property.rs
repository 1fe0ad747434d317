//! Content property navigation error types.

/// Kinds of property navigation errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PropertyErrorKind {
    /// The entity descriptor has no property under this name
    #[display("Unknown content property: {}", _0)]
    UnknownProperty(String),
    /// A single-resource operation addressed a collection root without an
    /// element selector; the boundary maps this to method-not-allowed
    #[display("Property `{}` is a collection and requires an element selector", _0)]
    SelectorRequired(String),
    /// The empty path was used but the entity itself holds no content
    #[display("Entity type does not hold content directly")]
    NoEntityContent,
    /// A property path rendering could not be parsed
    #[display("Invalid property path: {}", _0)]
    InvalidPath(String),
}

/// Property navigation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Property Error: {} at line {} in {}", kind, line, file)]
pub struct PropertyError {
    /// The kind of error that occurred
    pub kind: PropertyErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PropertyError {
    /// Create a new property error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PropertyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
