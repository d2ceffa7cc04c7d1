//! Configuration file handling.
//!
//! This module loads `.doc_schema.json` configuration files. Every section is
//! optional; a missing file means all defaults.
//!
//! ```json
//! {
//!   "introspection": { "max_depth": 32 },
//!   "default_format": "yaml"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::schema::DEFAULT_MAX_DEPTH;

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".doc_schema.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Type introspection settings
    pub introspection: IntrospectionConfig,

    /// Render format used by `schema-doc` when `--format` is not given
    pub default_format: Option<String>,
}

/// Settings for the type introspection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectionConfig {
    /// Record nesting depth at which introspection stops descending
    pub max_depth: usize,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConfigFile {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The JSON is invalid
    /// - `introspection.max_depth` is below 1
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            Box::new(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            )) as Box<dyn Error>
        })?;

        let config: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid JSON in {}: {}", path.display(), e),
            )) as Box<dyn Error>
        })?;

        if config.introspection.max_depth < 1 {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Invalid config in {}: introspection.max_depth must be at least 1",
                    path.display()
                ),
            )));
        }

        Ok(config)
    }
}
