//! Workspace scenarios running the full stack through the facade:
//! entity descriptors, store registry, real backends, and a repository
//! that actually retains what it is handed.

use async_trait::async_trait;
use bindery::{
    BinderyResult, ByteRange, ContentDescriptor, ContentId, ContentService, EntityDescriptor,
    EntityRepository, FileSystemStore, PropertyPath, S3Store, Store, StoreRegistry, UnsetOutcome,
};
use object_store::memory::InMemory;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default, Clone)]
struct Attachment {
    content_id: Option<ContentId>,
    content_length: u64,
    mime_type: Option<String>,
}

#[derive(Debug, Default, Clone)]
struct Claim {
    id: u64,
    form: Option<Attachment>,
    receipts: Vec<Attachment>,
}

fn attachment_descriptor() -> ContentDescriptor<Attachment> {
    ContentDescriptor::builder()
        .content_id(
            |a: &Attachment| a.content_id.clone(),
            |a, id| a.content_id = id,
        )
        .unwrap()
        .content_length(
            |a: &Attachment| a.content_length,
            |a, len| a.content_length = len,
        )
        .unwrap()
        .mime_type(|a: &Attachment| a.mime_type.clone(), |a, m| a.mime_type = m)
        .unwrap()
        .build()
        .unwrap()
}

fn claim_descriptor() -> EntityDescriptor<Claim> {
    EntityDescriptor::new()
        .single(
            "form",
            |c: &Claim| c.form.as_ref(),
            |c: &mut Claim| c.form.get_or_insert_with(Attachment::default),
            attachment_descriptor(),
        )
        .unwrap()
        .collection(
            "receipts",
            |c: &Claim| &c.receipts,
            |c: &mut Claim| &mut c.receipts,
            attachment_descriptor(),
        )
        .unwrap()
}

/// Retains saved claims keyed by their id.
#[derive(Debug, Default)]
struct InMemoryClaims {
    rows: Mutex<HashMap<u64, Claim>>,
}

#[async_trait]
impl EntityRepository<Claim> for InMemoryClaims {
    type Key = u64;

    async fn find_one(&self, key: &u64) -> BinderyResult<Option<Claim>> {
        Ok(self.rows.lock().unwrap().get(key).cloned())
    }

    async fn save(&self, entity: &Claim) -> BinderyResult<()> {
        self.rows.lock().unwrap().insert(entity.id, entity.clone());
        Ok(())
    }
}

struct Harness {
    service: ContentService<Claim, InMemoryClaims>,
    repository: Arc<InMemoryClaims>,
    store: Arc<dyn Store>,
    _dir: Option<tempfile::TempDir>,
}

fn filesystem_harness() -> Harness {
    let dir = tempfile::TempDir::new().unwrap();
    let store: Arc<dyn Store> = Arc::new(FileSystemStore::new(dir.path()).unwrap());
    harness(store, Some(dir))
}

fn s3_harness() -> Harness {
    let store: Arc<dyn Store> =
        Arc::new(S3Store::with_object_store(Arc::new(InMemory::new()), "claims"));
    harness(store, None)
}

fn harness(store: Arc<dyn Store>, dir: Option<tempfile::TempDir>) -> Harness {
    let mut registry = StoreRegistry::new();
    registry
        .register::<Attachment>("attachments", store.clone())
        .unwrap();
    let repository = Arc::new(InMemoryClaims::default());
    Harness {
        service: ContentService::new(
            claim_descriptor(),
            Arc::new(registry),
            repository.clone(),
        ),
        repository,
        store,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_put_then_get_round_trips_through_the_filesystem() {
    let harness = filesystem_harness();
    let mut claim = Claim {
        id: 7,
        ..Claim::default()
    };
    let path = PropertyPath::named("form");

    let outcome = harness
        .service
        .set_content(
            &mut claim,
            &path,
            b"Hello New Spring Content World!",
            Some("text/plain"),
        )
        .await
        .unwrap()
        .unwrap();
    assert!(outcome.created);
    assert_eq!(outcome.bytes_written, 31);

    let stored = harness
        .service
        .get_content(&claim, &path)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(&stored.data[..], b"Hello New Spring Content World!");
    assert_eq!(stored.content_length, 31);
    assert_eq!(stored.content_type.as_deref(), Some("text/plain"));

    let form = claim.form.as_ref().unwrap();
    assert_eq!(form.content_length, 31);
    assert_eq!(form.mime_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_put_then_get_round_trips_through_s3() {
    let harness = s3_harness();
    let mut claim = Claim {
        id: 7,
        ..Claim::default()
    };
    let path = PropertyPath::named("form");

    let outcome = harness
        .service
        .set_content(
            &mut claim,
            &path,
            b"Hello New Spring Content World!",
            Some("text/plain"),
        )
        .await
        .unwrap()
        .unwrap();
    assert!(outcome.created);

    // The backend addresses the bytes under the bucket-prefixed location.
    let resource = harness.store.resolve(&outcome.content_id).unwrap();
    assert!(resource.location.starts_with("s3://claims/"));

    let stored = harness
        .service
        .get_content(&claim, &path)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(&stored.data[..], b"Hello New Spring Content World!");
    assert_eq!(stored.content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_range_read_serves_partial_content() {
    let harness = filesystem_harness();
    let mut claim = Claim {
        id: 11,
        ..Claim::default()
    };
    let path = PropertyPath::named("form");

    harness
        .service
        .set_content(
            &mut claim,
            &path,
            b"Hello Spring Content World!",
            Some("text/plain"),
        )
        .await
        .unwrap();

    let range = ByteRange::parse("bytes=6-19").unwrap();
    let partial = harness
        .service
        .get_content_range(&claim, &path, &range)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(&partial.data[..], b"Spring Content");
    assert_eq!((partial.start, partial.end), (6, 19));
    assert_eq!(partial.total, 27);
}

#[tokio::test]
async fn test_unsetting_one_child_leaves_the_collection_intact() {
    let harness = filesystem_harness();
    let mut claim = Claim {
        id: 13,
        ..Claim::default()
    };
    let receipts = PropertyPath::named("receipts");

    harness
        .service
        .set_content(&mut claim, &receipts, b"Hello", Some("text/plain"))
        .await
        .unwrap();
    let second = harness
        .service
        .set_content(
            &mut claim,
            &receipts,
            b"Spring Content World!",
            Some("text/plain"),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(claim.receipts.len(), 2);

    let element = PropertyPath::element("receipts", second.content_id.clone());
    let outcome = harness.service.unset_content(&mut claim, &element).await.unwrap();
    assert_eq!(outcome, UnsetOutcome::Removed);

    // The child stays in the collection with cleared metadata, and the
    // backend no longer holds its bytes.
    assert_eq!(claim.receipts.len(), 2);
    assert!(claim.receipts[1].content_id.is_none());
    assert_eq!(claim.receipts[1].content_length, 0);
    assert!(harness.store.read(&second.content_id).await.unwrap().is_none());

    let first = claim.receipts[0].content_id.clone().unwrap();
    let data = harness.store.read(&first).await.unwrap().unwrap();
    assert_eq!(&data[..], b"Hello");
}

#[tokio::test]
async fn test_mutations_land_in_the_repository() {
    let harness = filesystem_harness();
    let mut claim = Claim {
        id: 17,
        ..Claim::default()
    };
    let path = PropertyPath::named("form");

    harness
        .service
        .set_content(&mut claim, &path, b"draft", Some("text/plain"))
        .await
        .unwrap();

    let reloaded = harness.repository.find_one(&17).await.unwrap().unwrap();
    let form = reloaded.form.unwrap();
    assert_eq!(form.content_length, 5);
    assert_eq!(form.content_id, claim.form.as_ref().unwrap().content_id);

    harness.service.unset_content(&mut claim, &path).await.unwrap();
    let reloaded = harness.repository.find_one(&17).await.unwrap().unwrap();
    assert!(reloaded.form.unwrap().content_id.is_none());
}
