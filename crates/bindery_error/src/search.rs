//! Fulltext search error types.

/// Kinds of search errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SearchErrorKind {
    /// Transport-level failure talking to the search backend; callers see one
    /// uniform kind whether the connection or the query itself failed
    #[display("Search backend failure: {}", _0)]
    Backend(String),
    /// The backend answered but the response body could not be interpreted
    #[display("Malformed search response: {}", _0)]
    Response(String),
    /// A document identifier could not be converted to the requested key type
    #[display("Identifier conversion failed: {}", _0)]
    Conversion(String),
}

/// Search error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Search Error: {} at line {} in {}", kind, line, file)]
pub struct SearchError {
    /// The kind of error that occurred
    pub kind: SearchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SearchError {
    /// Create a new search error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SearchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
