//! Property paths addressing a content holder inside an entity.

use crate::ContentId;
use bindery_error::{PropertyError, PropertyErrorKind};
use std::str::FromStr;

/// Address of a content holder within an entity.
///
/// The empty path addresses the entity itself as the holder. A bare property
/// name addresses a named content property; a second segment selects one
/// element of a collection property by its content id.
///
/// # Examples
///
/// ```
/// use bindery_core::PropertyPath;
///
/// let root: PropertyPath = "".parse()?;
/// assert!(root.is_entity());
///
/// let child: PropertyPath = "child".parse()?;
/// assert_eq!(child.property(), "child");
/// assert!(child.selector().is_none());
///
/// let element: PropertyPath = "children.a4b7".parse()?;
/// assert_eq!(element.property(), "children");
/// assert_eq!(element.selector().map(|id| id.as_str()), Some("a4b7"));
/// # Ok::<(), bindery_error::PropertyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    property: String,
    selector: Option<ContentId>,
}

impl PropertyPath {
    /// Path addressing the entity itself as the content holder.
    pub fn entity() -> Self {
        Self {
            property: String::new(),
            selector: None,
        }
    }

    /// Path addressing a named content property.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            property: name.into(),
            selector: None,
        }
    }

    /// Path addressing one element of a collection property by content id.
    pub fn element(name: impl Into<String>, selector: ContentId) -> Self {
        Self {
            property: name.into(),
            selector: Some(selector),
        }
    }

    /// Whether this path addresses the entity itself.
    pub fn is_entity(&self) -> bool {
        self.property.is_empty()
    }

    /// The property name, empty for the entity-level path.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The element selector, when one was given.
    pub fn selector(&self) -> Option<&ContentId> {
        self.selector.as_ref()
    }
}

impl FromStr for PropertyPath {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::entity());
        }
        let segments: Vec<&str> = s.split('.').collect();
        if segments.len() > 2 || segments.iter().any(|segment| segment.is_empty()) {
            return Err(PropertyError::new(PropertyErrorKind::InvalidPath(
                s.to_string(),
            )));
        }
        Ok(Self {
            property: segments[0].to_string(),
            selector: segments.get(1).map(|id| ContentId::new(*id)),
        })
    }
}

impl std::fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.selector {
            Some(selector) => write!(f, "{}.{}", self.property, selector),
            None => write!(f, "{}", self.property),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rendering_addresses_the_entity() {
        let path: PropertyPath = "".parse().unwrap();
        assert!(path.is_entity());
        assert_eq!(path, PropertyPath::entity());
    }

    #[test]
    fn rendering_round_trips() {
        for rendering in ["child", "children.42", "files.a4b7cc93"] {
            let path: PropertyPath = rendering.parse().unwrap();
            assert_eq!(path.to_string(), rendering);
        }
    }

    #[test]
    fn malformed_renderings_are_rejected() {
        for rendering in [".", "a.", ".b", "a..b", "a.b.c"] {
            assert!(rendering.parse::<PropertyPath>().is_err(), "{rendering}");
        }
    }
}
