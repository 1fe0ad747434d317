//! Persistence collaborator for root entities.

use async_trait::async_trait;
use bindery_error::BinderyResult;

/// Repository persisting root entities, supplied by the application.
///
/// The orchestration layer calls [`save`] exactly once after each successful
/// content mutation, always after the holder's metadata was updated, and
/// never manages transactions itself. [`find_one`] is the lookup a boundary
/// layer uses to load the root entity before handing it to the service.
///
/// [`save`]: EntityRepository::save
/// [`find_one`]: EntityRepository::find_one
#[async_trait]
pub trait EntityRepository<E>: Send + Sync {
    /// Key type identifying a root entity.
    type Key;

    /// Loads the entity stored under the key, or `None` when absent.
    async fn find_one(&self, key: &Self::Key) -> BinderyResult<Option<E>>;

    /// Persists the entity.
    async fn save(&self, entity: &E) -> BinderyResult<()>;
}
