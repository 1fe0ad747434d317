//! Rendition negotiation between stored and requested mime types.

use crate::Store;
use bindery_core::ContentId;
use bindery_error::BinderyResult;
use bytes::Bytes;

/// Capability to derive alternate renderings of stored content.
///
/// Backends that can transform stored bytes into other representations
/// (thumbnails, text extraction, format conversion) expose this through
/// [`Store::as_renderable`]; backends without the capability are never
/// consulted.
#[async_trait::async_trait]
pub trait Renderable: Send + Sync {
    /// Produce the stored content transformed into the requested mime type,
    /// or `None` when the transformation is not offered.
    async fn rendition(
        &self,
        id: &ContentId,
        stored_mime: Option<&str>,
        requested: &str,
    ) -> BinderyResult<Option<Bytes>>;
}

/// Outcome of a negotiated retrieval.
#[derive(Debug, Clone, PartialEq)]
pub enum Negotiation {
    /// A stream was produced, tagged with the mime type it is rendered in
    Content {
        /// The bytes of the (possibly transformed) stream
        data: Bytes,
        /// Mime type of the returned stream
        content_type: Option<String>,
    },
    /// The requested representation cannot be produced
    NotAcceptable,
    /// No resource exists under the identifier
    NoContent,
}

/// Negotiate a retrieval against a requested mime type.
///
/// A missing request, a `*/*` wildcard, or an exact match with the stored
/// mime passes the raw stream through under the stored mime. On a mismatch
/// the store's rendition capability is consulted when present, and the
/// result is tagged with the requested mime; a declined rendition or a
/// backend without the capability is [`Negotiation::NotAcceptable`], an
/// ordinary outcome rather than an error.
pub async fn negotiate(
    store: &dyn Store,
    id: &ContentId,
    stored_mime: Option<&str>,
    requested: Option<&str>,
) -> BinderyResult<Negotiation> {
    let mismatch = match requested {
        None => None,
        Some(r) if r.contains("*/*") || Some(r) == stored_mime => None,
        Some(r) => Some(r),
    };

    let Some(requested) = mismatch else {
        return match store.read(id).await? {
            Some(data) => Ok(Negotiation::Content {
                data,
                content_type: stored_mime.map(str::to_string),
            }),
            None => Ok(Negotiation::NoContent),
        };
    };

    match store.as_renderable() {
        Some(renderer) => match renderer.rendition(id, stored_mime, requested).await? {
            Some(data) => {
                tracing::debug!(id = %id, requested, "Produced rendition");
                Ok(Negotiation::Content {
                    data,
                    content_type: Some(requested.to_string()),
                })
            }
            None => Ok(Negotiation::NotAcceptable),
        },
        None => Ok(Negotiation::NotAcceptable),
    }
}
