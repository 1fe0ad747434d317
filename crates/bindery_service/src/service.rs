//! Content orchestration over entities, stores, and the repository.

use crate::entity::EntityDescriptor;
use crate::outcome::{
    ContentSummary, RangedContent, Retrieval, SetOutcome, StoredContent, UnsetOutcome,
};
use crate::range::ByteRange;
use crate::repository::EntityRepository;
use bindery_core::PropertyPath;
use bindery_error::BinderyResult;
use bindery_store::{Negotiation, StoreRegistry, negotiate};
use std::sync::Arc;

/// Orchestrates content transfer for one root entity type.
///
/// Every operation follows the same shape: navigate the property path
/// through the [`EntityDescriptor`], resolve the store from the holder's own
/// type, move bytes, then mutate metadata through the accessors. A write
/// persists the root entity through the repository exactly once, after the
/// metadata was updated. Reads of holders without a content id never touch
/// the backend.
///
/// The service holds no locks and no mutable state; two concurrent writes
/// against the same holder race at the storage medium, last writer wins.
pub struct ContentService<E, R> {
    descriptor: Arc<EntityDescriptor<E>>,
    stores: Arc<StoreRegistry>,
    repository: Arc<R>,
}

impl<E, R> Clone for ContentService<E, R> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Arc::clone(&self.descriptor),
            stores: Arc::clone(&self.stores),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<E, R> std::fmt::Debug for ContentService<E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentService")
            .field("descriptor", &self.descriptor)
            .field("stores", &self.stores)
            .finish()
    }
}

impl<E, R> ContentService<E, R>
where
    E: Send + Sync + 'static,
    R: EntityRepository<E>,
{
    /// Creates a service over a descriptor, a store registry, and the
    /// application's repository.
    pub fn new(descriptor: EntityDescriptor<E>, stores: Arc<StoreRegistry>, repository: Arc<R>) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            stores,
            repository,
        }
    }

    /// Reads the content stream of the addressed holder.
    ///
    /// Returns `Ok(None)` when the addressed holder is absent, carries no
    /// content id, or the backend holds no resource under the id. An absent
    /// content id performs no backend call at all.
    ///
    /// # Errors
    ///
    /// Fails on navigation errors, a missing store registration, or a
    /// normalized backend failure.
    pub async fn get_content(
        &self,
        entity: &E,
        path: &PropertyPath,
    ) -> BinderyResult<Option<StoredContent>> {
        let handle = self.descriptor.handle(path)?;
        let Some(summary) = handle.read(entity, path.selector())? else {
            return Ok(None);
        };
        let Some(id) = summary.content_id else {
            return Ok(None);
        };
        let store = self
            .stores
            .resolve_by_type(handle.holder_type(), handle.holder_type_name())?;
        let Some(data) = store.read(&id).await? else {
            return Ok(None);
        };
        Ok(Some(StoredContent {
            content_length: data.len() as u64,
            content_type: summary.mime_type,
            data,
        }))
    }

    /// Reads the addressed holder's content negotiated against a requested
    /// mime type.
    ///
    /// A missing request, a `*/*` wildcard, or an exact match with the
    /// stored mime passes the raw stream through; on a mismatch the store's
    /// rendition capability decides, and a backend without one yields
    /// [`Retrieval::NotAcceptable`].
    ///
    /// # Errors
    ///
    /// Fails on navigation errors, a missing store registration, or a
    /// normalized backend failure.
    pub async fn get_content_accepting(
        &self,
        entity: &E,
        path: &PropertyPath,
        accept: Option<&str>,
    ) -> BinderyResult<Retrieval> {
        let handle = self.descriptor.handle(path)?;
        let Some(summary) = handle.read(entity, path.selector())? else {
            return Ok(Retrieval::NoContent);
        };
        let Some(id) = summary.content_id else {
            return Ok(Retrieval::NoContent);
        };
        let store = self
            .stores
            .resolve_by_type(handle.holder_type(), handle.holder_type_name())?;
        match negotiate(store.as_ref(), &id, summary.mime_type.as_deref(), accept).await? {
            Negotiation::Content { data, content_type } => Ok(Retrieval::Content(StoredContent {
                content_length: data.len() as u64,
                content_type,
                data,
            })),
            Negotiation::NotAcceptable => Ok(Retrieval::NotAcceptable),
            Negotiation::NoContent => Ok(Retrieval::NoContent),
        }
    }

    /// Reads part of the addressed holder's content.
    ///
    /// The range is resolved against the holder's stored length, clamping
    /// the end to the final byte. Returns `Ok(None)` when the holder is
    /// absent, carries no content, the range selects no stored bytes, or
    /// the backend holds no resource.
    ///
    /// # Errors
    ///
    /// Fails on navigation errors, a missing store registration, or a
    /// normalized backend failure.
    pub async fn get_content_range(
        &self,
        entity: &E,
        path: &PropertyPath,
        range: &ByteRange,
    ) -> BinderyResult<Option<RangedContent>> {
        let handle = self.descriptor.handle(path)?;
        let Some(summary) = handle.read(entity, path.selector())? else {
            return Ok(None);
        };
        let Some(id) = summary.content_id else {
            return Ok(None);
        };
        let total = summary.content_length;
        let Some((start, end)) = range.to_bounds(total) else {
            return Ok(None);
        };
        let store = self
            .stores
            .resolve_by_type(handle.holder_type(), handle.holder_type_name())?;
        let Some(data) = store.read_range(&id, start..end + 1).await? else {
            return Ok(None);
        };
        Ok(Some(RangedContent {
            data,
            start,
            end,
            total,
            content_type: summary.mime_type,
        }))
    }

    /// Writes a content stream to the addressed holder.
    ///
    /// Navigation materializes an absent single holder and appends a fresh
    /// collection element when the path carries no selector. The holder's
    /// identifier is fixed before the transfer, reusing an existing id; the
    /// length accessor receives the exact count the backend reported, the
    /// mime accessor the declared type when one was given, and the root
    /// entity is persisted exactly once afterwards.
    ///
    /// Returns `Ok(None)` when a selector addressed a holder that does not
    /// exist; nothing is written or persisted in that case.
    ///
    /// # Errors
    ///
    /// Fails on navigation errors, a missing store registration, a
    /// normalized backend failure, or a repository failure. A failed byte
    /// write updates no metadata and persists nothing; a repository failure
    /// after a successful write does not roll the bytes back.
    #[tracing::instrument(skip(self, entity, data), fields(path = %path, size = data.len()))]
    pub async fn set_content(
        &self,
        entity: &mut E,
        path: &PropertyPath,
        data: &[u8],
        declared_mime: Option<&str>,
    ) -> BinderyResult<Option<SetOutcome>> {
        let handle = self.descriptor.handle(path)?;
        let Some(target) = handle.prepare_set(entity, path.selector())? else {
            return Ok(None);
        };
        let store = self
            .stores
            .resolve_by_type(handle.holder_type(), handle.holder_type_name())?;
        let resource = store.resolve(&target.content_id)?;
        let written = store.write(&resource, data).await?;
        handle.record_set(entity, &target.content_id, written, declared_mime);
        self.repository.save(entity).await?;
        tracing::info!(
            id = %target.content_id,
            bytes = written,
            created = target.was_new,
            "Stored content"
        );
        Ok(Some(SetOutcome {
            created: target.was_new,
            content_id: target.content_id,
            bytes_written: written,
        }))
    }

    /// Removes the addressed holder's content.
    ///
    /// A holder without a content id reports [`UnsetOutcome::NoContent`] and
    /// performs no backend call. Otherwise the resource is deleted, the
    /// identifier, length, and mime are cleared through the accessors, and
    /// the root entity is persisted exactly once. A collection element stays
    /// in the collection with cleared metadata.
    ///
    /// # Errors
    ///
    /// Fails on navigation errors, a missing store registration, a
    /// normalized backend failure, or a repository failure.
    #[tracing::instrument(skip(self, entity), fields(path = %path))]
    pub async fn unset_content(
        &self,
        entity: &mut E,
        path: &PropertyPath,
    ) -> BinderyResult<UnsetOutcome> {
        let handle = self.descriptor.handle(path)?;
        let Some(summary) = handle.read(entity, path.selector())? else {
            return Ok(UnsetOutcome::NoContent);
        };
        let Some(id) = summary.content_id else {
            return Ok(UnsetOutcome::NoContent);
        };
        let store = self
            .stores
            .resolve_by_type(handle.holder_type(), handle.holder_type_name())?;
        store.delete(&id).await?;
        handle.clear(entity, &id);
        self.repository.save(entity).await?;
        tracing::info!(id = %id, "Removed content");
        Ok(UnsetOutcome::Removed)
    }

    /// Metadata of every holder under a property, without touching the
    /// storage backend.
    ///
    /// The enumeration surface for collection roots; a single property
    /// yields zero or one summary, the empty name the entity-level holder.
    ///
    /// # Errors
    ///
    /// Fails when no property is registered under the name.
    pub fn content_summaries(&self, entity: &E, property: &str) -> BinderyResult<Vec<ContentSummary>> {
        let handle = self.descriptor.handle(&PropertyPath::named(property))?;
        Ok(handle.enumerate(entity))
    }
}
