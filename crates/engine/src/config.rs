//! Vault configuration
//!
//! A small TOML file at the root of the data directory. Missing files are
//! replaced with a commented default on open; unknown keys are rejected so
//! typos fail loudly instead of being silently ignored.

use serde::{Deserialize, Serialize};
use sitevault_core::{Error, Result};
use sitevault_storage::RetentionPolicy;
use std::path::Path;

/// File name of the config inside the data directory
pub const CONFIG_FILE_NAME: &str = "sitevault.toml";

/// Tunable vault behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct VaultConfig {
    /// Checkpoints retained per document, newest kept. Zero keeps all.
    pub max_checkpoints: usize,
    /// Default number of history entries returned
    pub history_limit: usize,
    /// Warn when a single operation exceeds this many milliseconds
    pub slow_op_ms: Option<u64>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        VaultConfig {
            max_checkpoints: 50,
            history_limit: 20,
            slow_op_ms: None,
        }
    }
}

impl VaultConfig {
    /// The retention policy this config implies
    pub fn retention(&self) -> RetentionPolicy {
        if self.max_checkpoints == 0 {
            RetentionPolicy::keep_all()
        } else {
            RetentionPolicy::keep_last(self.max_checkpoints)
        }
    }

    /// Load from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| Error::corrupt(path.display().to_string(), e))
    }

    /// Write `default_toml` to `path` if no file exists, then load it
    pub fn write_default_if_missing(path: &Path) -> Result<Self> {
        if !path.exists() {
            std::fs::write(path, default_toml())?;
        }
        Self::from_file(path)
    }

    /// Serialize this config to `path`
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let text =
            toml::to_string_pretty(self).map_err(|e| Error::corrupt(path.display().to_string(), e))?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// The commented default config written on first open
pub fn default_toml() -> &'static str {
    "\
# sitevault configuration

# Checkpoints retained per document (newest kept). 0 = keep all.
max_checkpoints = 50

# Default number of history entries returned.
history_limit = 20

# Warn when a single operation exceeds this many milliseconds.
# Absent = no warning.
#slow_op_ms = 250
"
}
