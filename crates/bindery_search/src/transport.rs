//! Search transport collaborator.

/// One document in a search result.
///
/// Results preserve the order the backend returned them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDocument {
    /// Rendering of the document's identifier field
    pub id: String,
}

impl SearchDocument {
    /// Creates a document from an identifier rendering.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Opaque transport-level failure raised by a search backend.
///
/// The searcher re-signals every transport failure uniformly regardless of
/// the underlying cause; the one distinction a backend may record is that it
/// was reached and answered, but with an envelope it could not interpret.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("{}", message)]
pub struct TransportFailure {
    /// Description of what went wrong
    pub message: String,
    /// Whether the backend answered with a malformed response envelope
    pub malformed_response: bool,
}

impl TransportFailure {
    /// Creates a new transport failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            malformed_response: false,
        }
    }

    /// Creates a failure for a backend that answered with an envelope that
    /// could not be interpreted.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            malformed_response: true,
        }
    }
}

/// Trait for pluggable search backends.
///
/// Implementations run a query restricted to the given result fields and
/// return matching documents in backend order.
#[async_trait::async_trait]
pub trait SearchTransport: Send + Sync {
    /// Run a query, returning matching documents.
    async fn query(
        &self,
        query: &str,
        fields: &[&str],
    ) -> Result<Vec<SearchDocument>, TransportFailure>;
}
