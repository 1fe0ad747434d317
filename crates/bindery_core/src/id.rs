//! Content identifier type.

use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier linking a content holder to stored bytes.
///
/// The canonical rendering is the string a backend uses to derive its storage
/// address. Freshly synthesized identifiers are UUIDs, but callers must not
/// assume any structure: identifiers read back from existing metadata are
/// reused verbatim.
///
/// # Examples
///
/// ```
/// use bindery_core::ContentId;
///
/// let id = ContentId::new("a4b7cc93-6d7a-4f7f-b1d4-e4b717a09f63");
/// assert_eq!(id.as_str(), "a4b7cc93-6d7a-4f7f-b1d4-e4b717a09f63");
///
/// let fresh = ContentId::generate();
/// assert_ne!(fresh, id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{}", _0)]
pub struct ContentId(String);

impl ContentId {
    /// Wraps an externally supplied rendering.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesizes a fresh identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The canonical storage-string rendering.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ContentId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<Uuid> for ContentId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}
