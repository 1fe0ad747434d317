//! Tests for typed search orchestration over a recording transport.

use bindery_core::ConversionService;
use bindery_error::{BinderyErrorKind, SearchErrorKind};
use bindery_search::{SearchDocument, SearchTransport, Searcher, TransportFailure};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingTransport {
    queries: Mutex<Vec<(String, Vec<String>)>>,
    documents: Vec<SearchDocument>,
    failure: Option<TransportFailure>,
}

impl RecordingTransport {
    fn returning(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            documents: ids.iter().map(|id| SearchDocument::new(*id)).collect(),
            ..Self::default()
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(TransportFailure::new(message)),
            ..Self::default()
        })
    }

    fn answering_malformed(message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(TransportFailure::malformed(message)),
            ..Self::default()
        })
    }

    fn recorded(&self) -> Vec<(String, Vec<String>)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchTransport for RecordingTransport {
    async fn query(
        &self,
        query: &str,
        fields: &[&str],
    ) -> Result<Vec<SearchDocument>, TransportFailure> {
        self.queries.lock().unwrap().push((
            query.to_string(),
            fields.iter().map(|field| field.to_string()).collect(),
        ));
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(self.documents.clone()),
        }
    }
}

fn searcher(transport: &Arc<RecordingTransport>) -> Searcher<i64> {
    Searcher::new(transport.clone(), Arc::new(ConversionService::default()))
}

#[tokio::test]
async fn test_find_keyword() {
    let transport = RecordingTransport::returning(&["1"]);
    let results = searcher(&transport).find_keyword("something").await.unwrap();

    assert_eq!(results, vec![1]);
    assert_eq!(
        transport.recorded(),
        vec![("something".to_string(), vec!["id".to_string()])]
    );
}

#[tokio::test]
async fn test_find_all_keywords() {
    let transport = RecordingTransport::returning(&[]);
    searcher(&transport)
        .find_all_keywords(&["something", "else"])
        .await
        .unwrap();

    assert_eq!(transport.recorded()[0].0, "something AND else");
}

#[tokio::test]
async fn test_find_any_keywords() {
    let transport = RecordingTransport::returning(&[]);
    searcher(&transport)
        .find_any_keywords(&["something", "else", "bobbins"])
        .await
        .unwrap();

    assert_eq!(transport.recorded()[0].0, "something OR else OR bobbins");
}

#[tokio::test]
async fn test_find_keywords_near() {
    let transport = RecordingTransport::returning(&[]);
    searcher(&transport)
        .find_keywords_near(4, &["foo", "bar"])
        .await
        .unwrap();

    assert_eq!(transport.recorded()[0].0, "\"foo bar\"~4");
}

#[tokio::test]
async fn test_find_keyword_starts_with() {
    let transport = RecordingTransport::returning(&[]);
    searcher(&transport)
        .find_keyword_starts_with("something")
        .await
        .unwrap();

    assert_eq!(transport.recorded()[0].0, "something*");
}

#[tokio::test]
async fn test_find_keyword_starts_with_and_ends_with() {
    let transport = RecordingTransport::returning(&[]);
    searcher(&transport)
        .find_keyword_starts_with_and_ends_with("something", "else")
        .await
        .unwrap();

    assert_eq!(transport.recorded()[0].0, "something*else");
}

#[tokio::test]
async fn test_find_all_keywords_with_weights() {
    let transport = RecordingTransport::returning(&[]);
    searcher(&transport)
        .find_all_keywords_with_weights(&["foo", "bar"], &[1.59, 200.0])
        .await
        .unwrap();

    assert_eq!(transport.recorded()[0].0, "(foo)^1.59 AND (bar)^200.0");
}

#[tokio::test]
async fn test_results_convert_in_backend_order() {
    let transport = RecordingTransport::returning(&["3", "1", "2"]);
    let results = searcher(&transport).find_keyword("anything").await.unwrap();

    assert_eq!(results, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_connect_failure_surfaces_as_backend() {
    let transport = RecordingTransport::failing("Request failed: connection refused");
    let err = searcher(&transport)
        .find_keyword("something")
        .await
        .unwrap_err();

    match err.kind() {
        BinderyErrorKind::Search(e) => assert!(matches!(e.kind, SearchErrorKind::Backend(_))),
        other => panic!("unexpected error kind: {other}"),
    }
}

#[tokio::test]
async fn test_decode_failure_surfaces_as_backend() {
    // A different underlying cause lands on the same uniform kind
    let transport = RecordingTransport::failing("Failed to read response: EOF");
    let err = searcher(&transport)
        .find_all_keywords(&["something", "else"])
        .await
        .unwrap_err();

    match err.kind() {
        BinderyErrorKind::Search(e) => assert!(matches!(e.kind, SearchErrorKind::Backend(_))),
        other => panic!("unexpected error kind: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_envelope_surfaces_as_response() {
    // The backend was reached and answered, but not with the envelope.
    let transport =
        RecordingTransport::answering_malformed("Failed to parse response: missing field");
    let err = searcher(&transport)
        .find_keyword("something")
        .await
        .unwrap_err();

    match err.kind() {
        BinderyErrorKind::Search(e) => assert!(matches!(e.kind, SearchErrorKind::Response(_))),
        other => panic!("unexpected error kind: {other}"),
    }
}

#[tokio::test]
async fn test_unconvertible_id_surfaces_as_conversion() {
    let transport = RecordingTransport::returning(&["not-a-number"]);
    let err = searcher(&transport)
        .find_keyword("something")
        .await
        .unwrap_err();

    match err.kind() {
        BinderyErrorKind::Search(e) => assert!(matches!(e.kind, SearchErrorKind::Conversion(_))),
        other => panic!("unexpected error kind: {other}"),
    }
}

#[tokio::test]
async fn test_weight_count_mismatch_is_rejected_before_transport() {
    let transport = RecordingTransport::returning(&[]);
    let err = searcher(&transport)
        .find_all_keywords_with_weights(&["foo", "bar"], &[1.0])
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), BinderyErrorKind::Config(_)));
    assert!(transport.recorded().is_empty());
}
