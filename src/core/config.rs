//! Configuration system.
//!
//! TOML-based configuration with typed sections. Every section falls back to
//! its defaults when absent, so an empty file (or no file) is a valid setup.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be loaded from configuration
///
/// # Example
///
/// ```ignore
/// use serde::Deserialize;
/// use listkeep::core::config::Configurable;
///
/// #[derive(Debug, Deserialize, Default)]
/// pub struct BackupConfig {
///     pub enabled: bool,
/// }
///
/// impl Configurable for BackupConfig {
///     const PREFIX: &'static str = "backup";
/// }
/// ```
pub trait Configurable: DeserializeOwned + Default {
    /// Configuration section prefix (corresponds to TOML section name)
    const PREFIX: &'static str;
}

// ============================================================================
// Configuration Store
// ============================================================================

/// File read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "listkeep.toml";

/// Configuration storage with TOML support
pub struct ConfigStore {
    data: toml::Value,
    path: Option<PathBuf>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigStore {
    /// Create an empty configuration store
    pub fn empty() -> Self {
        Self {
            data: toml::Value::Table(Default::default()),
            path: None,
        }
    }

    /// Create a configuration store from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let data: toml::Value =
            toml::from_str(content).map_err(|e| anyhow!("Failed to parse TOML: {}", e))?;
        Ok(Self { data, path: None })
    }

    /// Create a configuration store from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let data: toml::Value = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse TOML in '{}': {}", path.display(), e))?;

        Ok(Self {
            data,
            path: Some(path.to_path_buf()),
        })
    }

    /// Load `base` when it exists, then merge `overlay` over it.
    ///
    /// A missing `base` is not an error; a missing `overlay` is.
    pub fn layered(base: impl AsRef<Path>, overlay: Option<&Path>) -> Result<Self> {
        let base = base.as_ref();
        let mut store = if base.exists() {
            Self::from_file(base)?
        } else {
            Self::empty()
        };

        if let Some(overlay) = overlay {
            store.merge(&Self::from_file(overlay)?);
        }
        Ok(store)
    }

    /// Get a typed configuration section
    ///
    /// If the section doesn't exist, returns the default value.
    pub fn get<C: Configurable>(&self) -> Result<C> {
        let section = self
            .data
            .get(C::PREFIX)
            .cloned()
            .unwrap_or(toml::Value::Table(Default::default()));

        debug!("Loading config section: {}", C::PREFIX);

        section
            .try_into()
            .map_err(|e| anyhow!("Failed to deserialize config section '{}': {}", C::PREFIX, e))
    }

    /// Check if a configuration section exists
    pub fn has_section(&self, prefix: &str) -> bool {
        self.data.get(prefix).is_some()
    }

    /// Most specific file this configuration was read from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Merge another configuration into this one
    ///
    /// Values from `other` will override values in `self`.
    pub fn merge(&mut self, other: &ConfigStore) {
        merge_toml_values(&mut self.data, &other.data);
        if other.path.is_some() {
            self.path = other.path.clone();
        }
    }
}

/// Recursively merge TOML values
fn merge_toml_values(base: &mut toml::Value, other: &toml::Value) {
    match (base, other) {
        (toml::Value::Table(base_table), toml::Value::Table(other_table)) => {
            for (key, value) in other_table {
                if let Some(base_value) = base_table.get_mut(key) {
                    merge_toml_values(base_value, value);
                } else {
                    base_table.insert(key.clone(), value.clone());
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}

// ============================================================================
// Configuration Sections
// ============================================================================

/// Listener settings for the two backends
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address of the to-do backend
    pub todos_addr: SocketAddr,
    /// Bind address of the notes backend
    pub notes_addr: SocketAddr,
    /// Start the to-do list with the two demo records
    pub seed_todos: bool,
    /// Period of the metrics log line, 0 disables it
    pub metrics_log_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            todos_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            notes_addr: SocketAddr::from(([127, 0, 0, 1], 4000)),
            seed_todos: true,
            metrics_log_interval_secs: 60,
        }
    }
}

impl ServerConfig {
    pub fn metrics_log_interval(&self) -> Option<Duration> {
        (self.metrics_log_interval_secs > 0)
            .then(|| Duration::from_secs(self.metrics_log_interval_secs))
    }
}

impl Configurable for ServerConfig {
    const PREFIX: &'static str = "server";
}

/// Where the CLI front ends find the backends
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub todos_url: String,
    pub notes_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            todos_url: "http://localhost:3000/todos".to_string(),
            notes_url: "http://localhost:4000/notes".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Configurable for ClientConfig {
    const PREFIX: &'static str = "client";
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    pub format: LogFormat,
    /// Directory for daily rolling log files; stderr when absent
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            directory: None,
            file_prefix: "listkeep.log".to_string(),
        }
    }
}

impl Configurable for LogConfig {
    const PREFIX: &'static str = "log";
}
