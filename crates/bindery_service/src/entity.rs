//! Entity descriptors mapping property paths to content holders.
//!
//! An [`EntityDescriptor`] is built once per root entity type and records how
//! to reach every content holder inside it: the entity itself, a named single
//! property, or an element of a collection property addressed by content id.
//! Navigation, identifier assignment, and metadata mutation all go through
//! the descriptor, so the orchestration layer never touches entity fields
//! directly and store resolution can start from the holder's own type.

use crate::outcome::ContentSummary;
use bindery_core::{ContentDescriptor, ContentId, PropertyPath};
use bindery_error::{BinderyResult, ConfigError, PropertyError, PropertyErrorKind};
use std::any::TypeId;
use std::collections::HashMap;

/// Target of a content write, fixed before any bytes move.
pub(crate) struct SetTarget {
    /// Whether the holder had no content id when the write began
    pub(crate) was_new: bool,
    /// Identifier the bytes will be stored under
    pub(crate) content_id: ContentId,
}

/// Navigation and mutation operations for one registered content property.
///
/// The write path is split in two so no entity borrow is held across the
/// byte transfer: [`prepare_set`] navigates and applies the identifier
/// policy, [`record_set`] writes the length and mime afterwards.
///
/// [`prepare_set`]: PropertyAccess::prepare_set
/// [`record_set`]: PropertyAccess::record_set
pub(crate) trait PropertyAccess<E>: Send + Sync {
    /// Runtime type of the content holder, for store resolution.
    fn holder_type(&self) -> TypeId;

    /// Holder type name, used to name the type in resolution errors.
    fn holder_type_name(&self) -> &'static str;

    /// Reads the metadata of the addressed holder.
    ///
    /// `Ok(None)` when the addressed holder is absent or the selector does
    /// not match. A collection root without a selector does not address a
    /// single holder and fails with `SelectorRequired`.
    fn read(
        &self,
        entity: &E,
        selector: Option<&ContentId>,
    ) -> Result<Option<ContentSummary>, PropertyError>;

    /// Metadata of every holder under this property.
    fn enumerate(&self, entity: &E) -> Vec<ContentSummary>;

    /// Navigates to the holder a write will land on, materializing it where
    /// the path demands, and applies the identifier policy: the new-content
    /// flag is captured first, then an identifier is assigned only when the
    /// holder carries none.
    ///
    /// `Ok(None)` when a selector addressed a holder that does not exist.
    fn prepare_set(
        &self,
        entity: &mut E,
        selector: Option<&ContentId>,
    ) -> Result<Option<SetTarget>, PropertyError>;

    /// Records a successful byte write on the holder carrying the id: the
    /// exact written count through the length accessor, and the declared
    /// mime when one was given.
    fn record_set(&self, entity: &mut E, id: &ContentId, length: u64, declared_mime: Option<&str>);

    /// Clears identifier, length, and mime on the holder carrying the id.
    /// A collection element stays in the collection with cleared metadata.
    fn clear(&self, entity: &mut E, id: &ContentId);
}

/// The entity itself as a content holder, addressed by the empty path.
struct EntityContent<E> {
    descriptor: ContentDescriptor<E>,
}

impl<E: 'static> PropertyAccess<E> for EntityContent<E> {
    fn holder_type(&self) -> TypeId {
        TypeId::of::<E>()
    }

    fn holder_type_name(&self) -> &'static str {
        std::any::type_name::<E>()
    }

    fn read(
        &self,
        entity: &E,
        selector: Option<&ContentId>,
    ) -> Result<Option<ContentSummary>, PropertyError> {
        Ok(select(summarize(&self.descriptor, entity), selector))
    }

    fn enumerate(&self, entity: &E) -> Vec<ContentSummary> {
        vec![summarize(&self.descriptor, entity)]
    }

    fn prepare_set(
        &self,
        entity: &mut E,
        selector: Option<&ContentId>,
    ) -> Result<Option<SetTarget>, PropertyError> {
        let current = self.descriptor.content_id(entity);
        if !selector_admits(selector, current.as_ref()) {
            return Ok(None);
        }
        Ok(Some(assign_id(&self.descriptor, entity, current)))
    }

    fn record_set(&self, entity: &mut E, id: &ContentId, length: u64, declared_mime: Option<&str>) {
        if self.descriptor.content_id(entity).as_ref() == Some(id) {
            record(&self.descriptor, entity, length, declared_mime);
        }
    }

    fn clear(&self, entity: &mut E, id: &ContentId) {
        if self.descriptor.content_id(entity).as_ref() == Some(id) {
            clear_meta(&self.descriptor, entity);
        }
    }
}

/// A named property holding at most one content holder.
struct SingleProperty<E, H> {
    get: fn(&E) -> Option<&H>,
    ensure: fn(&mut E) -> &mut H,
    descriptor: ContentDescriptor<H>,
}

impl<E, H: 'static> PropertyAccess<E> for SingleProperty<E, H> {
    fn holder_type(&self) -> TypeId {
        TypeId::of::<H>()
    }

    fn holder_type_name(&self) -> &'static str {
        std::any::type_name::<H>()
    }

    fn read(
        &self,
        entity: &E,
        selector: Option<&ContentId>,
    ) -> Result<Option<ContentSummary>, PropertyError> {
        Ok((self.get)(entity)
            .map(|holder| summarize(&self.descriptor, holder))
            .and_then(|summary| select(summary, selector)))
    }

    fn enumerate(&self, entity: &E) -> Vec<ContentSummary> {
        (self.get)(entity)
            .map(|holder| summarize(&self.descriptor, holder))
            .into_iter()
            .collect()
    }

    fn prepare_set(
        &self,
        entity: &mut E,
        selector: Option<&ContentId>,
    ) -> Result<Option<SetTarget>, PropertyError> {
        if let Some(selector) = selector {
            // An addressed update must land on the holder already carrying
            // the id; materializing a fresh holder for it would be wrong.
            let matches = (self.get)(entity)
                .is_some_and(|holder| self.descriptor.content_id(holder).as_ref() == Some(selector));
            if !matches {
                return Ok(None);
            }
        }
        let holder = (self.ensure)(entity);
        let current = self.descriptor.content_id(holder);
        Ok(Some(assign_id(&self.descriptor, holder, current)))
    }

    fn record_set(&self, entity: &mut E, id: &ContentId, length: u64, declared_mime: Option<&str>) {
        let holder = (self.ensure)(entity);
        if self.descriptor.content_id(holder).as_ref() == Some(id) {
            record(&self.descriptor, holder, length, declared_mime);
        }
    }

    fn clear(&self, entity: &mut E, id: &ContentId) {
        let holder = (self.ensure)(entity);
        if self.descriptor.content_id(holder).as_ref() == Some(id) {
            clear_meta(&self.descriptor, holder);
        }
    }
}

/// A named property holding a collection of content holders.
struct CollectionProperty<E, H> {
    name: String,
    get: fn(&E) -> &Vec<H>,
    get_mut: fn(&mut E) -> &mut Vec<H>,
    descriptor: ContentDescriptor<H>,
}

impl<E, H: Default + 'static> PropertyAccess<E> for CollectionProperty<E, H> {
    fn holder_type(&self) -> TypeId {
        TypeId::of::<H>()
    }

    fn holder_type_name(&self) -> &'static str {
        std::any::type_name::<H>()
    }

    fn read(
        &self,
        entity: &E,
        selector: Option<&ContentId>,
    ) -> Result<Option<ContentSummary>, PropertyError> {
        let Some(selector) = selector else {
            return Err(PropertyError::new(PropertyErrorKind::SelectorRequired(
                self.name.clone(),
            )));
        };
        Ok((self.get)(entity)
            .iter()
            .find(|holder| self.descriptor.content_id(holder).as_ref() == Some(selector))
            .map(|holder| summarize(&self.descriptor, holder)))
    }

    fn enumerate(&self, entity: &E) -> Vec<ContentSummary> {
        (self.get)(entity)
            .iter()
            .map(|holder| summarize(&self.descriptor, holder))
            .collect()
    }

    fn prepare_set(
        &self,
        entity: &mut E,
        selector: Option<&ContentId>,
    ) -> Result<Option<SetTarget>, PropertyError> {
        let holders = (self.get_mut)(entity);
        let Some(selector) = selector else {
            // No selector appends a fresh holder.
            let mut holder = H::default();
            let id = ContentId::generate();
            self.descriptor.set_content_id(&mut holder, Some(id.clone()));
            holders.push(holder);
            return Ok(Some(SetTarget {
                was_new: true,
                content_id: id,
            }));
        };
        let found = holders
            .iter()
            .any(|holder| self.descriptor.content_id(holder).as_ref() == Some(selector));
        Ok(found.then(|| SetTarget {
            was_new: false,
            content_id: selector.clone(),
        }))
    }

    fn record_set(&self, entity: &mut E, id: &ContentId, length: u64, declared_mime: Option<&str>) {
        if let Some(holder) = (self.get_mut)(entity)
            .iter_mut()
            .find(|holder| self.descriptor.content_id(holder).as_ref() == Some(id))
        {
            record(&self.descriptor, holder, length, declared_mime);
        }
    }

    fn clear(&self, entity: &mut E, id: &ContentId) {
        if let Some(holder) = (self.get_mut)(entity)
            .iter_mut()
            .find(|holder| self.descriptor.content_id(holder).as_ref() == Some(id))
        {
            clear_meta(&self.descriptor, holder);
        }
    }
}

/// Map of content properties for one root entity type.
///
/// Built once at configuration time and read-only afterwards, like the store
/// registry. Property registration is by value in builder style, and every
/// accessor is a plain function pointer so descriptors stay cheap to share.
///
/// # Examples
///
/// ```
/// use bindery_core::ContentDescriptor;
/// use bindery_service::EntityDescriptor;
///
/// #[derive(Default)]
/// struct Attachment {
///     content_id: Option<bindery_core::ContentId>,
/// }
///
/// struct Report {
///     cover: Option<Attachment>,
///     pages: Vec<Attachment>,
/// }
///
/// fn attachment() -> bindery_error::BinderyResult<ContentDescriptor<Attachment>> {
///     ContentDescriptor::builder()
///         .content_id(|a: &Attachment| a.content_id.clone(), |a, id| a.content_id = id)?
///         .build()
/// }
///
/// # fn example() -> bindery_error::BinderyResult<()> {
/// let descriptor = EntityDescriptor::<Report>::new()
///     .single(
///         "cover",
///         |r: &Report| r.cover.as_ref(),
///         |r: &mut Report| r.cover.get_or_insert_with(Attachment::default),
///         attachment()?,
///     )?
///     .collection(
///         "pages",
///         |r: &Report| &r.pages,
///         |r: &mut Report| &mut r.pages,
///         attachment()?,
///     )?;
///
/// assert!(descriptor.property_names().count() == 2);
/// # Ok(())
/// # }
/// ```
pub struct EntityDescriptor<E> {
    entity: Option<Box<dyn PropertyAccess<E>>>,
    properties: HashMap<String, Box<dyn PropertyAccess<E>>>,
}

impl<E: 'static> EntityDescriptor<E> {
    /// Creates a descriptor with no registered content properties.
    pub fn new() -> Self {
        Self {
            entity: None,
            properties: HashMap::new(),
        }
    }

    /// Registers the entity itself as a content holder, addressed by the
    /// empty property path.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when entity-level content is already
    /// registered.
    pub fn entity_content(mut self, descriptor: ContentDescriptor<E>) -> BinderyResult<Self> {
        if self.entity.is_some() {
            return Err(ConfigError::new(
                "entity-level content registered more than once",
            ))?;
        }
        self.entity = Some(Box::new(EntityContent { descriptor }));
        Ok(self)
    }

    /// Registers a single content property.
    ///
    /// `get` reads the holder when present; `ensure` materializes it for
    /// creating-on-write semantics and returns it mutably.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the name is empty or already
    /// registered.
    pub fn single<H: 'static>(
        mut self,
        name: impl Into<String>,
        get: fn(&E) -> Option<&H>,
        ensure: fn(&mut E) -> &mut H,
        descriptor: ContentDescriptor<H>,
    ) -> BinderyResult<Self> {
        let name = name.into();
        self.claim(&name)?;
        self.properties.insert(
            name,
            Box::new(SingleProperty {
                get,
                ensure,
                descriptor,
            }),
        );
        Ok(self)
    }

    /// Registers a collection content property. Elements are addressed by
    /// content id; a write without a selector appends a defaulted element.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the name is empty or already
    /// registered.
    pub fn collection<H: Default + 'static>(
        mut self,
        name: impl Into<String>,
        get: fn(&E) -> &Vec<H>,
        get_mut: fn(&mut E) -> &mut Vec<H>,
        descriptor: ContentDescriptor<H>,
    ) -> BinderyResult<Self> {
        let name = name.into();
        self.claim(&name)?;
        self.properties.insert(
            name.clone(),
            Box::new(CollectionProperty {
                name,
                get,
                get_mut,
                descriptor,
            }),
        );
        Ok(self)
    }

    /// Names of the registered content properties.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Whether the entity itself is registered as a content holder.
    pub fn has_entity_content(&self) -> bool {
        self.entity.is_some()
    }

    pub(crate) fn handle(&self, path: &PropertyPath) -> Result<&dyn PropertyAccess<E>, PropertyError> {
        if path.is_entity() {
            return self
                .entity
                .as_deref()
                .ok_or_else(|| PropertyError::new(PropertyErrorKind::NoEntityContent));
        }
        let handle = self.properties.get(path.property()).ok_or_else(|| {
            PropertyError::new(PropertyErrorKind::UnknownProperty(
                path.property().to_string(),
            ))
        })?;
        Ok(handle.as_ref())
    }

    fn claim(&self, name: &str) -> BinderyResult<()> {
        if name.is_empty() {
            return Err(ConfigError::new("content property name cannot be empty"))?;
        }
        if self.properties.contains_key(name) {
            return Err(ConfigError::new(format!(
                "content property `{name}` registered more than once"
            )))?;
        }
        Ok(())
    }
}

impl<E: 'static> Default for EntityDescriptor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EntityDescriptor<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("entity_content", &self.entity.is_some())
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn summarize<H>(descriptor: &ContentDescriptor<H>, holder: &H) -> ContentSummary {
    ContentSummary {
        content_id: descriptor.content_id(holder),
        content_length: descriptor.content_length(holder),
        mime_type: descriptor.mime_type(holder),
    }
}

fn select(summary: ContentSummary, selector: Option<&ContentId>) -> Option<ContentSummary> {
    match selector {
        None => Some(summary),
        Some(id) if summary.content_id.as_ref() == Some(id) => Some(summary),
        Some(_) => None,
    }
}

fn selector_admits(selector: Option<&ContentId>, current: Option<&ContentId>) -> bool {
    match selector {
        None => true,
        Some(id) => current == Some(id),
    }
}

fn assign_id<H>(
    descriptor: &ContentDescriptor<H>,
    holder: &mut H,
    current: Option<ContentId>,
) -> SetTarget {
    let was_new = current.is_none();
    let content_id = match current {
        Some(id) => id,
        None => {
            let id = ContentId::generate();
            descriptor.set_content_id(holder, Some(id.clone()));
            id
        }
    };
    SetTarget {
        was_new,
        content_id,
    }
}

fn record<H>(
    descriptor: &ContentDescriptor<H>,
    holder: &mut H,
    length: u64,
    declared_mime: Option<&str>,
) {
    descriptor.set_content_length(holder, length);
    if let Some(mime) = declared_mime {
        descriptor.set_mime_type(holder, Some(mime.to_string()));
    }
}

fn clear_meta<H>(descriptor: &ContentDescriptor<H>, holder: &mut H) {
    descriptor.set_content_id(holder, None);
    descriptor.set_content_length(holder, 0);
    descriptor.set_mime_type(holder, None);
}
