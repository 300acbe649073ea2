//! Application configuration.
//!
//! Loaded from a TOML file; every key is optional.
//!
//! # Example Configuration File
//!
//! ```toml
//! collection = "todos"
//!
//! [list]
//! rollback_on_failure = false
//!
//! [logging]
//! filter = "info,todolist=debug"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use todolist_store::store::{StoreConfig, DEFAULT_COLLECTION};

use crate::list::ListConfig;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or has the wrong shape.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialization(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document collection holding task records.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Task list behavior.
    #[serde(default)]
    pub list: ListConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            list: ListConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = AppConfig::from_file("todolist.toml")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(Into::into)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Store settings derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default().with_collection(self.collection.clone())
    }

    /// Installs the default log subscriber using `logging.filter` as the
    /// fallback when `RUST_LOG` is unset.
    ///
    /// Returns `false` if a global subscriber was already installed.
    #[cfg(feature = "logging")]
    pub fn init_logging(&self) -> bool {
        crate::logging::init_logging(&self.logging.filter)
    }
}
