//! Runtime configuration for the object model.
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! [dispatch]
//! table_key = "member"          # or "prototype-name"
//! trace_misses = false
//!
//! [prototypes]
//! host_object_name = "HostObject"
//! ```
//!
//! Every section and key is optional.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Key used to query a prototype's name tables during a chain walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableKey {
    /// The member key being read or invoked.
    Member,
    /// The display name of the prototype level being searched, whatever
    /// member was asked for. Kept for hosts that depend on it.
    PrototypeName,
}

impl Default for TableKey {
    fn default() -> Self {
        TableKey::Member
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub table_key: TableKey,
    /// Log every dispatch miss at trace level.
    pub trace_misses: bool,
}

/// Read once by `PrototypeRegistry::with_config` when the well-known
/// prototypes are created.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrototypeConfig {
    /// Display name of the prototype serving otherwise unclassified host values.
    pub host_object_name: String,
}

impl Default for PrototypeConfig {
    fn default() -> Self {
        PrototypeConfig {
            host_object_name: "HostObject".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub dispatch: DispatchConfig,
    pub prototypes: PrototypeConfig,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        debug!("loaded runtime config: {:?}", config);
        Ok(config)
    }
}
