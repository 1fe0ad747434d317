//! Conversion registry between identifier types and their text renderings.

use crate::ContentId;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use uuid::Uuid;

type ToTextFn = Box<dyn Fn(&dyn Any) -> Option<String> + Send + Sync>;
type ParseFn = Box<dyn Fn(&str) -> Option<Box<dyn Any>> + Send + Sync>;

struct Converter {
    to_text: ToTextFn,
    parse: ParseFn,
}

/// Open registry mapping Rust types to text renderings and back.
///
/// Search results carry document identifiers as text; the searcher maps them
/// through this registry into whatever identifier type the entity declares.
/// The default registry covers `String`, `i32`, `i64`, `u64`, [`Uuid`], and
/// [`ContentId`]; deployments register additional types as needed.
///
/// # Examples
///
/// ```
/// use bindery_core::ConversionService;
///
/// let conversions = ConversionService::default();
/// assert_eq!(conversions.parse::<i64>("42"), Some(42));
/// assert_eq!(conversions.to_text(&42i64), Some("42".to_string()));
/// assert_eq!(conversions.parse::<i64>("not a number"), None);
/// ```
pub struct ConversionService {
    converters: HashMap<TypeId, Converter>,
}

impl ConversionService {
    /// Creates a registry with no conversions registered.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Registers a conversion pair for `T`, replacing any existing pair.
    pub fn register<T: Any>(&mut self, to_text: fn(&T) -> String, parse: fn(&str) -> Option<T>) {
        let converter = Converter {
            to_text: Box::new(move |value: &dyn Any| {
                value.downcast_ref::<T>().map(to_text)
            }),
            parse: Box::new(move |text: &str| {
                parse(text).map(|value| Box::new(value) as Box<dyn Any>)
            }),
        };
        self.converters.insert(TypeId::of::<T>(), converter);
    }

    /// Whether a conversion pair is registered for `T`.
    pub fn supports<T: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    /// Renders `value` as text, or `None` when `T` is not registered.
    pub fn to_text<T: Any>(&self, value: &T) -> Option<String> {
        self.converters
            .get(&TypeId::of::<T>())
            .and_then(|converter| (converter.to_text)(value))
    }

    /// Parses `text` into a `T`, or `None` when `T` is not registered or the
    /// text does not parse.
    pub fn parse<T: Any>(&self, text: &str) -> Option<T> {
        self.converters
            .get(&TypeId::of::<T>())
            .and_then(|converter| (converter.parse)(text))
            .and_then(|boxed| boxed.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }
}

impl Default for ConversionService {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register::<String>(|s| s.clone(), |text| Some(text.to_string()));
        registry.register::<i32>(|n| n.to_string(), |text| text.parse().ok());
        registry.register::<i64>(|n| n.to_string(), |text| text.parse().ok());
        registry.register::<u64>(|n| n.to_string(), |text| text.parse().ok());
        registry.register::<Uuid>(|u| u.to_string(), |text| Uuid::parse_str(text).ok());
        registry.register::<ContentId>(|id| id.to_string(), |text| Some(ContentId::new(text)));
        registry
    }
}

impl std::fmt::Debug for ConversionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionService")
            .field("registered", &self.converters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_common_id_types() {
        let conversions = ConversionService::default();
        assert!(conversions.supports::<String>());
        assert!(conversions.supports::<i32>());
        assert!(conversions.supports::<i64>());
        assert!(conversions.supports::<u64>());
        assert!(conversions.supports::<Uuid>());
        assert!(conversions.supports::<ContentId>());
        assert!(!conversions.supports::<f64>());
    }

    #[test]
    fn parses_and_renders_integers() {
        let conversions = ConversionService::default();
        assert_eq!(conversions.parse::<i32>("12345"), Some(12345));
        assert_eq!(conversions.to_text(&12345i32), Some("12345".to_string()));
        assert_eq!(conversions.parse::<i32>("12.5"), None);
    }

    #[test]
    fn custom_registrations_extend_the_registry() {
        #[derive(Debug, PartialEq)]
        struct Isbn(String);

        let mut conversions = ConversionService::empty();
        conversions.register::<Isbn>(
            |isbn| isbn.0.clone(),
            |text| text.starts_with("978").then(|| Isbn(text.to_string())),
        );

        assert_eq!(
            conversions.parse::<Isbn>("9781234567890"),
            Some(Isbn("9781234567890".to_string()))
        );
        assert_eq!(conversions.parse::<Isbn>("123"), None);
    }

    #[test]
    fn unregistered_types_return_none() {
        let conversions = ConversionService::empty();
        assert_eq!(conversions.parse::<i64>("42"), None);
        assert_eq!(conversions.to_text(&42i64), None);
    }
}
