//! Store backend configuration.
//!
//! Backend selection is config-driven: a [`StoreConfig`] names the backend
//! kind and its settings, validates them before any I/O, and constructs the
//! matching [`Store`]. Configuration loads from TOML files with user files
//! layered over defaults.

use crate::{FileSystemStore, S3Store, Store};
use bindery_error::{BinderyError, BinderyResult, ConfigError};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Storage backend kinds.
///
/// # Examples
///
/// ```
/// use bindery_store::BackendKind;
///
/// let kind: BackendKind = "s3".parse()?;
/// assert_eq!(kind, BackendKind::S3);
/// assert_eq!(format!("{kind}"), "s3");
/// # Ok::<(), strum::ParseError>(())
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local filesystem storage
    Filesystem,
    /// S3-compatible object storage
    S3,
}

/// Configuration for one content store.
///
/// # Example
///
/// ```toml
/// backend = "s3"
/// bucket = "content"
/// region = "us-east-1"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Which backend to construct
    pub backend: BackendKind,

    /// Root directory (filesystem backend)
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Bucket name (s3 backend)
    #[serde(default)]
    pub bucket: Option<String>,

    /// Region (s3 backend)
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint, e.g. MinIO (s3 backend)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Access key id (s3 backend)
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Secret access key (s3 backend)
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Allow plain-http endpoints (s3 backend)
    #[serde(default)]
    pub allow_http: bool,
}

impl StoreConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> BinderyResult<Self> {
        debug!("Loading store configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                BinderyError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                BinderyError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration from standard locations.
    ///
    /// Configuration sources in order of precedence (later sources override
    /// earlier):
    /// 1. User config in home directory (~/.config/bindery/bindery.toml)
    /// 2. User config in current directory (./bindery.toml)
    ///
    /// # Errors
    ///
    /// Returns an error when no source supplies a complete configuration.
    #[instrument]
    pub fn load() -> BinderyResult<Self> {
        debug!("Loading store configuration with precedence: current dir > home dir");

        let mut builder = Config::builder();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/bindery/bindery.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("bindery").required(false));

        builder
            .build()
            .map_err(|e| {
                BinderyError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                BinderyError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Check that the settings required by the selected backend are present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the missing setting.
    pub fn validate(&self) -> BinderyResult<()> {
        match self.backend {
            BackendKind::Filesystem => {
                if self.root.is_none() {
                    return Err(
                        ConfigError::new("root required for the filesystem backend").into(),
                    );
                }
            }
            BackendKind::S3 => {
                if self.bucket.is_none() {
                    return Err(ConfigError::new("bucket required for the s3 backend").into());
                }
            }
        }
        Ok(())
    }

    /// Construct the configured backend.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when validation fails or the backend
    /// cannot be constructed.
    #[instrument(skip(self), fields(backend = %self.backend))]
    pub fn build_store(&self) -> BinderyResult<Arc<dyn Store>> {
        self.validate()?;

        match self.backend {
            BackendKind::Filesystem => {
                let root = self.root.clone().ok_or_else(|| {
                    BinderyError::from(ConfigError::new(
                        "root required for the filesystem backend",
                    ))
                })?;
                Ok(Arc::new(FileSystemStore::new(root)?))
            }
            BackendKind::S3 => Ok(Arc::new(S3Store::new(self)?)),
        }
    }
}
