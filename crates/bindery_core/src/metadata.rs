//! Content attribute accessors for domain types.
//!
//! A domain type that carries content keeps three pieces of metadata on its
//! own fields: the content identifier, the stored length, and the mime type.
//! A [`ContentDescriptor`] is built once per holder type and records how to
//! read and write each attribute, so the rest of the framework can work with
//! any domain type without knowing its shape.

use crate::ContentId;
use bindery_error::{BinderyResult, ConfigError};

/// The content attributes a holder type can expose.
///
/// # Examples
///
/// ```
/// use bindery_core::ContentAttribute;
///
/// assert_eq!(format!("{}", ContentAttribute::MimeType), "MimeType");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
pub enum ContentAttribute {
    /// Identifier linking the holder to stored bytes
    ContentId,
    /// Length in bytes of the stored content
    ContentLength,
    /// Mime type of the stored content
    MimeType,
}

type IdAccessors<H> = (fn(&H) -> Option<ContentId>, fn(&mut H, Option<ContentId>));
type LengthAccessors<H> = (fn(&H) -> u64, fn(&mut H, u64));
type MimeAccessors<H> = (fn(&H) -> Option<String>, fn(&mut H, Option<String>));

/// Attribute accessors for one content-holding type.
///
/// Reads and writes go through the registered accessor pairs and mutate the
/// holder in place only; persisting the mutated entity is the orchestration
/// layer's job. The content id accessors are mandatory, length and mime are
/// optional, and [`ContentDescriptor::has`] reports what the holder supports.
///
/// # Examples
///
/// ```
/// use bindery_core::{ContentDescriptor, ContentId};
///
/// #[derive(Default)]
/// struct Document {
///     content_id: Option<ContentId>,
///     content_len: u64,
/// }
///
/// let descriptor = ContentDescriptor::<Document>::builder()
///     .content_id(|d| d.content_id.clone(), |d, id| d.content_id = id)?
///     .content_length(|d| d.content_len, |d, len| d.content_len = len)?
///     .build()?;
///
/// let mut doc = Document::default();
/// descriptor.set_content_id(&mut doc, Some(ContentId::new("abc")));
/// assert_eq!(descriptor.content_id(&doc), Some(ContentId::new("abc")));
/// # Ok::<(), bindery_error::BinderyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ContentDescriptor<H> {
    id: IdAccessors<H>,
    length: Option<LengthAccessors<H>>,
    mime: Option<MimeAccessors<H>>,
}

impl<H> ContentDescriptor<H> {
    /// Creates a new descriptor builder.
    pub fn builder() -> ContentDescriptorBuilder<H> {
        ContentDescriptorBuilder::default()
    }

    /// Whether the holder type exposes the given attribute.
    pub fn has(&self, attribute: ContentAttribute) -> bool {
        match attribute {
            ContentAttribute::ContentId => true,
            ContentAttribute::ContentLength => self.length.is_some(),
            ContentAttribute::MimeType => self.mime.is_some(),
        }
    }

    /// Reads the content identifier.
    pub fn content_id(&self, holder: &H) -> Option<ContentId> {
        (self.id.0)(holder)
    }

    /// Writes the content identifier.
    pub fn set_content_id(&self, holder: &mut H, id: Option<ContentId>) {
        (self.id.1)(holder, id)
    }

    /// Reads the content length, or 0 when the holder does not track one.
    pub fn content_length(&self, holder: &H) -> u64 {
        match &self.length {
            Some((get, _)) => get(holder),
            None => 0,
        }
    }

    /// Writes the content length; a no-op when the holder does not track one.
    pub fn set_content_length(&self, holder: &mut H, length: u64) {
        if let Some((_, set)) = &self.length {
            set(holder, length);
        }
    }

    /// Reads the mime type, or `None` when the holder does not track one.
    pub fn mime_type(&self, holder: &H) -> Option<String> {
        match &self.mime {
            Some((get, _)) => get(holder),
            None => None,
        }
    }

    /// Writes the mime type; a no-op when the holder does not track one.
    pub fn set_mime_type(&self, holder: &mut H, mime: Option<String>) {
        if let Some((_, set)) = &self.mime {
            set(holder, mime);
        }
    }
}

/// Builder for [`ContentDescriptor`].
///
/// Each attribute accepts exactly one accessor pair; a second registration
/// for the same attribute fails immediately, and [`build`] fails when no
/// content id pair was registered.
///
/// [`build`]: ContentDescriptorBuilder::build
#[derive(Debug)]
pub struct ContentDescriptorBuilder<H> {
    id: Option<IdAccessors<H>>,
    length: Option<LengthAccessors<H>>,
    mime: Option<MimeAccessors<H>>,
}

impl<H> Default for ContentDescriptorBuilder<H> {
    fn default() -> Self {
        Self {
            id: None,
            length: None,
            mime: None,
        }
    }
}

impl<H> ContentDescriptorBuilder<H> {
    /// Registers the content id accessor pair.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a content id pair is already
    /// registered.
    pub fn content_id(
        mut self,
        get: fn(&H) -> Option<ContentId>,
        set: fn(&mut H, Option<ContentId>),
    ) -> BinderyResult<Self> {
        if self.id.is_some() {
            return Err(ConfigError::new(duplicate(ContentAttribute::ContentId)))?;
        }
        self.id = Some((get, set));
        Ok(self)
    }

    /// Registers the content length accessor pair.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a content length pair is already
    /// registered.
    pub fn content_length(
        mut self,
        get: fn(&H) -> u64,
        set: fn(&mut H, u64),
    ) -> BinderyResult<Self> {
        if self.length.is_some() {
            return Err(ConfigError::new(duplicate(ContentAttribute::ContentLength)))?;
        }
        self.length = Some((get, set));
        Ok(self)
    }

    /// Registers the mime type accessor pair.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a mime type pair is already
    /// registered.
    pub fn mime_type(
        mut self,
        get: fn(&H) -> Option<String>,
        set: fn(&mut H, Option<String>),
    ) -> BinderyResult<Self> {
        if self.mime.is_some() {
            return Err(ConfigError::new(duplicate(ContentAttribute::MimeType)))?;
        }
        self.mime = Some((get, set));
        Ok(self)
    }

    /// Builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no content id accessor pair was
    /// registered.
    pub fn build(self) -> BinderyResult<ContentDescriptor<H>> {
        let id = self.id.ok_or_else(|| {
            ConfigError::new("no content id accessor registered for holder type")
        })?;
        Ok(ContentDescriptor {
            id,
            length: self.length,
            mime: self.mime,
        })
    }
}

fn duplicate(attribute: ContentAttribute) -> String {
    format!("content attribute `{attribute}` registered more than once")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Doc {
        content_id: Option<ContentId>,
        content_len: u64,
        mime_type: Option<String>,
    }

    fn full_descriptor() -> ContentDescriptor<Doc> {
        ContentDescriptor::builder()
            .content_id(|d: &Doc| d.content_id.clone(), |d, id| d.content_id = id)
            .unwrap()
            .content_length(|d: &Doc| d.content_len, |d, len| d.content_len = len)
            .unwrap()
            .mime_type(|d: &Doc| d.mime_type.clone(), |d, m| d.mime_type = m)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn accessors_round_trip_through_the_holder() {
        let descriptor = full_descriptor();
        let mut doc = Doc::default();

        descriptor.set_content_id(&mut doc, Some(ContentId::new("id-1")));
        descriptor.set_content_length(&mut doc, 42);
        descriptor.set_mime_type(&mut doc, Some("text/plain".into()));

        assert_eq!(descriptor.content_id(&doc), Some(ContentId::new("id-1")));
        assert_eq!(descriptor.content_length(&doc), 42);
        assert_eq!(descriptor.mime_type(&doc), Some("text/plain".into()));
    }

    #[test]
    fn duplicate_attribute_registration_fails() {
        let result = ContentDescriptor::<Doc>::builder()
            .content_id(|d: &Doc| d.content_id.clone(), |d, id| d.content_id = id)
            .unwrap()
            .content_id(|d: &Doc| d.content_id.clone(), |d, id| d.content_id = id);
        assert!(result.is_err());
    }

    #[test]
    fn missing_content_id_registration_fails() {
        let result = ContentDescriptor::<Doc>::builder()
            .content_length(|d: &Doc| d.content_len, |d, len| d.content_len = len)
            .unwrap()
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn optional_attributes_report_support() {
        let descriptor = ContentDescriptor::<Doc>::builder()
            .content_id(|d: &Doc| d.content_id.clone(), |d, id| d.content_id = id)
            .unwrap()
            .build()
            .unwrap();

        assert!(descriptor.has(ContentAttribute::ContentId));
        assert!(!descriptor.has(ContentAttribute::ContentLength));
        assert!(!descriptor.has(ContentAttribute::MimeType));

        // Unsupported attributes read as empty and ignore writes.
        let mut doc = Doc::default();
        descriptor.set_content_length(&mut doc, 99);
        assert_eq!(descriptor.content_length(&doc), 0);
        assert_eq!(doc.content_len, 0);
    }
}
