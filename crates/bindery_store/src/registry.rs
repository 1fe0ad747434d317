//! Store registration and lookup.

use crate::Store;
use bindery_error::{BinderyResult, ConfigError};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

struct Registration {
    type_name: &'static str,
    store: Arc<dyn Store>,
}

/// Registry mapping content holder types and store names to backends.
///
/// Populated once at configuration time and read-only afterwards. Each
/// registration binds one backend to one holder type and one name; lookups
/// walk from the type that holds the content, independent of which aggregate
/// root contains it. A missing registration is a configuration error naming
/// the type, never a silently absent value.
///
/// # Examples
///
/// ```
/// use bindery_store::{FileSystemStore, StoreRegistry};
/// use std::sync::Arc;
///
/// struct Document;
///
/// # fn example() -> bindery_error::BinderyResult<()> {
/// let mut registry = StoreRegistry::new();
/// let store = Arc::new(FileSystemStore::new("/tmp/content")?);
/// registry.register::<Document>("files", store)?;
///
/// let by_type = registry.resolve::<Document>()?;
/// let by_name = registry.resolve_named("files")?;
/// assert_eq!(by_type.backend(), by_name.backend());
/// # Ok(())
/// # }
/// ```
pub struct StoreRegistry {
    by_type: HashMap<TypeId, Registration>,
    by_name: HashMap<String, Arc<dyn Store>>,
}

impl StoreRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            by_type: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Binds a backend to the holder type `H` under the given store name.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the holder type or the name is
    /// already bound.
    pub fn register<H: 'static>(
        &mut self,
        name: impl Into<String>,
        store: Arc<dyn Store>,
    ) -> BinderyResult<()> {
        let name = name.into();
        let type_name = std::any::type_name::<H>();

        if self.by_type.contains_key(&TypeId::of::<H>()) {
            return Err(ConfigError::new(format!(
                "store already registered for holder type {type_name}"
            ))
            .into());
        }
        if self.by_name.contains_key(&name) {
            return Err(ConfigError::new(format!(
                "store already registered under name `{name}`"
            ))
            .into());
        }

        tracing::debug!(holder = type_name, name = %name, backend = store.backend(), "Registered store");
        self.by_type.insert(
            TypeId::of::<H>(),
            Registration {
                type_name,
                store: store.clone(),
            },
        );
        self.by_name.insert(name, store);
        Ok(())
    }

    /// Looks up the backend bound to the holder type `H`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the type when no store is
    /// registered for it.
    pub fn resolve<H: 'static>(&self) -> BinderyResult<Arc<dyn Store>> {
        self.resolve_by_type(TypeId::of::<H>(), std::any::type_name::<H>())
    }

    /// Looks up a backend by the holder's runtime type id.
    ///
    /// The `type_name` is only used to name the type in the error.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no store is registered for the
    /// type.
    pub fn resolve_by_type(
        &self,
        holder: TypeId,
        type_name: &str,
    ) -> BinderyResult<Arc<dyn Store>> {
        self.by_type
            .get(&holder)
            .map(|registration| registration.store.clone())
            .ok_or_else(|| {
                ConfigError::new(format!("no store registered for holder type {type_name}")).into()
            })
    }

    /// Looks up a backend by store name.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no store is registered under the
    /// name.
    pub fn resolve_named(&self, name: &str) -> BinderyResult<Arc<dyn Store>> {
        self.by_name.get(name).cloned().ok_or_else(|| {
            ConfigError::new(format!("no store registered under name `{name}`")).into()
        })
    }

    /// The names of all registered stores.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let types: Vec<&str> = self
            .by_type
            .values()
            .map(|registration| registration.type_name)
            .collect();
        f.debug_struct("StoreRegistry")
            .field("types", &types)
            .field("names", &self.by_name.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileSystemStore;

    struct Document;
    struct Attachment;

    fn filesystem_store(dir: &tempfile::TempDir) -> Arc<dyn Store> {
        Arc::new(FileSystemStore::new(dir.path()).unwrap())
    }

    #[test]
    fn registrations_resolve_by_type_and_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut registry = StoreRegistry::new();
        registry
            .register::<Document>("files", filesystem_store(&dir))
            .unwrap();

        assert!(registry.resolve::<Document>().is_ok());
        assert!(registry.resolve_named("files").is_ok());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["files"]);
    }

    #[test]
    fn duplicate_type_registration_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut registry = StoreRegistry::new();
        registry
            .register::<Document>("files", filesystem_store(&dir))
            .unwrap();

        let result = registry.register::<Document>("other", filesystem_store(&dir));
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_name_registration_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut registry = StoreRegistry::new();
        registry
            .register::<Document>("files", filesystem_store(&dir))
            .unwrap();

        let result = registry.register::<Attachment>("files", filesystem_store(&dir));
        assert!(result.is_err());
    }

    #[test]
    fn missing_registration_names_the_type() {
        let registry = StoreRegistry::new();

        let err = registry
            .resolve::<Document>()
            .err()
            .expect("resolving an unregistered type must fail");
        assert!(format!("{err}").contains("Document"));

        assert!(registry.resolve_named("files").is_err());
    }
}
