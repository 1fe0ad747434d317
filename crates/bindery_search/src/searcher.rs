//! Typed search orchestration.

use crate::{SearchTransport, query};
use bindery_core::ConversionService;
use bindery_error::{BinderyError, BinderyResult, ConfigError, SearchError, SearchErrorKind};
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Name of the identifier field requested from the backend.
const ID_FIELD: &str = "id";

/// Keyword search returning identifiers of type `T`.
///
/// Each operation builds a query string, asks the transport for matching
/// documents restricted to the id field, and maps every document id through
/// the conversion registry into `T`, preserving backend order. Transport
/// failures surface uniformly as [`SearchErrorKind::Backend`] whatever the
/// underlying cause, except a backend that answered with a malformed
/// envelope, which is [`SearchErrorKind::Response`]; an id the registry
/// cannot convert is [`SearchErrorKind::Conversion`].
pub struct Searcher<T> {
    transport: Arc<dyn SearchTransport>,
    conversions: Arc<ConversionService>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Searcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            conversions: self.conversions.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Any> Searcher<T> {
    /// Creates a searcher over a transport and conversion registry.
    pub fn new(transport: Arc<dyn SearchTransport>, conversions: Arc<ConversionService>) -> Self {
        Self {
            transport,
            conversions,
            _marker: PhantomData,
        }
    }

    /// Find documents containing the keyword.
    pub async fn find_keyword(&self, term: &str) -> BinderyResult<Vec<T>> {
        self.run(query::keyword(term)).await
    }

    /// Find documents containing all of the keywords.
    pub async fn find_all_keywords(&self, terms: &[&str]) -> BinderyResult<Vec<T>> {
        self.run(query::all_keywords(terms)).await
    }

    /// Find documents containing any of the keywords.
    pub async fn find_any_keywords(&self, terms: &[&str]) -> BinderyResult<Vec<T>> {
        self.run(query::any_keywords(terms)).await
    }

    /// Find documents with the keywords within `proximity` words of each
    /// other.
    pub async fn find_keywords_near(
        &self,
        proximity: u32,
        terms: &[&str],
    ) -> BinderyResult<Vec<T>> {
        self.run(query::keywords_near(proximity, terms)).await
    }

    /// Find documents containing a keyword with the given prefix.
    pub async fn find_keyword_starts_with(&self, term: &str) -> BinderyResult<Vec<T>> {
        self.run(query::starts_with(term)).await
    }

    /// Find documents containing a keyword with the given prefix and suffix.
    pub async fn find_keyword_starts_with_and_ends_with(
        &self,
        prefix: &str,
        suffix: &str,
    ) -> BinderyResult<Vec<T>> {
        self.run(query::starts_with_ends_with(prefix, suffix)).await
    }

    /// Find documents containing all of the keywords, each boosted by its
    /// paired weight.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the term and weight counts differ.
    pub async fn find_all_keywords_with_weights(
        &self,
        terms: &[&str],
        weights: &[f64],
    ) -> BinderyResult<Vec<T>> {
        if terms.len() != weights.len() {
            return Err(ConfigError::new(format!(
                "terms ({}) and weights ({}) must have the same length",
                terms.len(),
                weights.len()
            ))
            .into());
        }
        self.run(query::all_keywords_weighted(terms, weights)).await
    }

    #[instrument(skip(self, query), fields(q = %query))]
    async fn run(&self, query: String) -> BinderyResult<Vec<T>> {
        let documents = self
            .transport
            .query(&query, &[ID_FIELD])
            .await
            .map_err(|failure| {
                if failure.malformed_response {
                    SearchError::new(SearchErrorKind::Response(failure.to_string()))
                } else {
                    SearchError::new(SearchErrorKind::Backend(failure.to_string()))
                }
            })?;

        debug!(count = documents.len(), "Converting search results");

        documents
            .into_iter()
            .map(|document| {
                self.conversions.parse::<T>(&document.id).ok_or_else(|| {
                    BinderyError::from(SearchError::new(SearchErrorKind::Conversion(format!(
                        "cannot convert document id `{}` into {}",
                        document.id,
                        std::any::type_name::<T>()
                    ))))
                })
            })
            .collect()
    }
}
