//! config
//!
//! Project settings file (`toolshed.toml`).
//!
//! # Design
//!
//! The settings file doubles as the project-root marker: the context resolves
//! the project root by walking up from the working directory to the nearest
//! directory containing `toolshed.toml`. Contents are deliberately small:
//! a `[tools]` table pinning tool versions.
//!
//! ```toml
//! [tools]
//! gradle = "8.5"
//! mvn = "3.9.6"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the project settings file / project-root marker.
pub const SETTINGS_FILE: &str = "toolshed.toml";

/// Errors from settings load/save.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Project settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Pinned tool versions, keyed by tool name.
    #[serde(default)]
    tools: BTreeMap<String, String>,
}

impl Settings {
    /// Load settings from `<dir>/toolshed.toml`.
    ///
    /// A missing file yields the empty default; a malformed file is an error.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(SETTINGS_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default())
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Save settings to `<dir>/toolshed.toml`.
    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        let path = dir.join(SETTINGS_FILE);
        let raw = toml::to_string_pretty(self)?;
        fs::write(&path, raw).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Pinned version for `tool`, if any.
    pub fn tool_version(&self, tool: &str) -> Option<&str> {
        self.tools.get(tool).map(String::as_str)
    }

    /// Pin a tool version.
    pub fn set_tool_version(&mut self, tool: &str, version: &str) {
        self.tools.insert(tool.to_string(), version.to_string());
    }
}
