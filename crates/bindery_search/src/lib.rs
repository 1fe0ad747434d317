//! Solr-backed keyword search for Bindery.
//!
//! Fulltext queries are built as Solr query strings, sent through an opaque
//! [`SearchTransport`] collaborator, and the resulting document identifiers
//! are mapped back into the entity's declared id type through the conversion
//! registry. The transport is a seam: production uses [`SolrClient`], tests
//! inject a fake.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod query;

mod searcher;
mod solr;
mod transport;

pub use bindery_error::{SearchError, SearchErrorKind};
pub use searcher::Searcher;
pub use solr::SolrClient;
pub use transport::{SearchDocument, SearchTransport, TransportFailure};
