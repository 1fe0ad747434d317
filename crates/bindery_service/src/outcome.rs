//! Outcome types handed to the boundary layer.
//!
//! The orchestration core does not speak HTTP, but every outcome here has a
//! fixed status-code equivalent a boundary layer maps to: retrieved content
//! is 200, a fresh write is 201 and an overwrite 200, a range read is 206,
//! absent content or an absent addressed holder is 404, a collection root
//! addressed without a selector is 405, an exhausted rendition negotiation
//! is 406, and a missing store or property registration is 400.

use bindery_core::ContentId;
use bytes::Bytes;

/// A retrieved content stream with the metadata served alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredContent {
    /// The stored bytes
    pub data: Bytes,
    /// Mime type the stream is rendered in
    pub content_type: Option<String>,
    /// Length of `data` in bytes
    pub content_length: u64,
}

/// Outcome of a retrieval negotiated against a requested mime type.
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval {
    /// A stream was produced in an acceptable representation
    Content(StoredContent),
    /// The requested representation cannot be produced (boundary: 406)
    NotAcceptable,
    /// The addressed holder has no content (boundary: 404)
    NoContent,
}

/// A partial content stream (boundary: 206).
#[derive(Debug, Clone, PartialEq)]
pub struct RangedContent {
    /// The bytes within the resolved range
    pub data: Bytes,
    /// First byte offset served, inclusive
    pub start: u64,
    /// Last byte offset served, inclusive
    pub end: u64,
    /// Total stored length the range was resolved against
    pub total: u64,
    /// Mime type of the stored content
    pub content_type: Option<String>,
}

/// Metadata snapshot of one content holder, read without touching the
/// storage backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSummary {
    /// Identifier of the stored content, absent when none was set
    pub content_id: Option<ContentId>,
    /// Stored length in bytes, 0 when untracked or absent
    pub content_length: u64,
    /// Stored mime type, when the holder tracks one
    pub mime_type: Option<String>,
}

/// Outcome of a successful content write.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOutcome {
    /// Whether the holder had no content before the write began
    /// (boundary: 201 when true, 200 when false)
    pub created: bool,
    /// Identifier the bytes are stored under
    pub content_id: ContentId,
    /// Exact number of bytes the backend reported written
    pub bytes_written: u64,
}

/// Outcome of a content removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsetOutcome {
    /// Bytes were deleted and the holder's metadata cleared
    Removed,
    /// The addressed holder had no content; nothing was touched
    /// (boundary: 404)
    NoContent,
}
