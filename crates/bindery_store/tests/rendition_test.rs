//! Tests for rendition negotiation.

use bindery_core::ContentId;
use bindery_error::BinderyResult;
use bindery_store::{Negotiation, Renderable, Store, StoreResource, negotiate};
use bytes::Bytes;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory store whose rendition capability uppercases text.
#[derive(Default)]
struct RenderingStore {
    objects: Mutex<HashMap<String, Bytes>>,
    renders: bool,
    rendition_calls: AtomicUsize,
}

impl RenderingStore {
    fn renderable() -> Self {
        Self {
            renders: true,
            ..Self::default()
        }
    }

    async fn put(&self, id: &ContentId, data: &[u8]) {
        let resource = self.resolve(id).unwrap();
        self.write(&resource, data).await.unwrap();
    }
}

#[async_trait::async_trait]
impl Store for RenderingStore {
    fn backend(&self) -> &str {
        "memory"
    }

    fn resolve(&self, id: &ContentId) -> BinderyResult<StoreResource> {
        Ok(StoreResource {
            location: format!("mem://{}", id),
            key: id.to_string(),
        })
    }

    async fn read(&self, id: &ContentId) -> BinderyResult<Option<Bytes>> {
        Ok(self.objects.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn read_range(&self, id: &ContentId, range: Range<u64>) -> BinderyResult<Option<Bytes>> {
        Ok(self.objects.lock().unwrap().get(id.as_str()).map(|data| {
            let start = (range.start as usize).min(data.len());
            let end = (range.end as usize).min(data.len());
            data.slice(start..end)
        }))
    }

    async fn write(&self, resource: &StoreResource, data: &[u8]) -> BinderyResult<u64> {
        self.objects
            .lock()
            .unwrap()
            .insert(resource.key.clone(), Bytes::copy_from_slice(data));
        Ok(data.len() as u64)
    }

    async fn delete(&self, id: &ContentId) -> BinderyResult<()> {
        self.objects.lock().unwrap().remove(id.as_str());
        Ok(())
    }

    async fn exists(&self, id: &ContentId) -> BinderyResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(id.as_str()))
    }

    fn as_renderable(&self) -> Option<&dyn Renderable> {
        if self.renders { Some(self) } else { None }
    }
}

#[async_trait::async_trait]
impl Renderable for RenderingStore {
    async fn rendition(
        &self,
        id: &ContentId,
        _stored_mime: Option<&str>,
        requested: &str,
    ) -> BinderyResult<Option<Bytes>> {
        self.rendition_calls.fetch_add(1, Ordering::SeqCst);
        if requested != "text/uppercase" {
            return Ok(None);
        }
        Ok(self
            .objects
            .lock()
            .unwrap()
            .get(id.as_str())
            .map(|data| Bytes::from(data.to_ascii_uppercase())))
    }
}

#[tokio::test]
async fn test_no_request_passes_raw_stream() {
    let store = RenderingStore::renderable();
    let id = ContentId::generate();
    store.put(&id, b"hello").await;

    let outcome = negotiate(&store, &id, Some("text/plain"), None)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Negotiation::Content {
            data: Bytes::from_static(b"hello"),
            content_type: Some("text/plain".to_string()),
        }
    );
    assert_eq!(store.rendition_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_wildcard_passes_raw_stream() {
    let store = RenderingStore::renderable();
    let id = ContentId::generate();
    store.put(&id, b"hello").await;

    let outcome = negotiate(&store, &id, Some("text/plain"), Some("*/*"))
        .await
        .unwrap();
    assert!(matches!(outcome, Negotiation::Content { .. }));
    assert_eq!(store.rendition_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_exact_match_passes_raw_stream() {
    let store = RenderingStore::renderable();
    let id = ContentId::generate();
    store.put(&id, b"hello").await;

    let outcome = negotiate(&store, &id, Some("text/plain"), Some("text/plain"))
        .await
        .unwrap();
    assert!(matches!(outcome, Negotiation::Content { .. }));
    assert_eq!(store.rendition_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_absent_resource_is_no_content() {
    let store = RenderingStore::renderable();
    let id = ContentId::generate();

    let outcome = negotiate(&store, &id, None, None).await.unwrap();
    assert_eq!(outcome, Negotiation::NoContent);
}

#[tokio::test]
async fn test_mismatch_consults_the_renderer() {
    let store = RenderingStore::renderable();
    let id = ContentId::generate();
    store.put(&id, b"hello").await;

    let outcome = negotiate(&store, &id, Some("text/plain"), Some("text/uppercase"))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Negotiation::Content {
            data: Bytes::from_static(b"HELLO"),
            content_type: Some("text/uppercase".to_string()),
        }
    );
    assert_eq!(store.rendition_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_declined_rendition_is_not_acceptable() {
    let store = RenderingStore::renderable();
    let id = ContentId::generate();
    store.put(&id, b"hello").await;

    let outcome = negotiate(&store, &id, Some("text/plain"), Some("image/png"))
        .await
        .unwrap();
    assert_eq!(outcome, Negotiation::NotAcceptable);
}

#[tokio::test]
async fn test_incapable_backend_is_not_acceptable_without_probing() {
    let store = RenderingStore::default();
    let id = ContentId::generate();
    store.put(&id, b"hello").await;

    let outcome = negotiate(&store, &id, Some("text/plain"), Some("image/png"))
        .await
        .unwrap();
    assert_eq!(outcome, Negotiation::NotAcceptable);
    assert_eq!(store.rendition_calls.load(Ordering::SeqCst), 0);
}
