//! Traversal limits
//!
//! The limits are fixed for the lifetime of a filesystem context. Defaults
//! match the classic 256-entry working-directory stack and 256-byte
//! canonical path buffer; a context can be built with other values loaded
//! from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default maximum nesting depth of a traversal
pub const DEFAULT_MAX_RECURSION: usize = 256;

/// Default maximum length of a canonical path, terminator included
pub const DEFAULT_PATH_MAX: usize = 256;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config: {0}")]
    Io(String),

    /// The configuration text is not valid JSON for this schema
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Filesystem context configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VfsConfig {
    /// Number of slots in a traversal record; index 0 is the root
    pub max_recursion: usize,
    /// Bound on the canonical path produced by `realpath`
    pub path_max: usize,
}

impl VfsConfig {
    /// Parses a configuration from JSON
    ///
    /// Missing fields take their default values.
    ///
    /// ```
    /// use vfs_types::VfsConfig;
    ///
    /// let config = VfsConfig::from_json(r#"{ "max_recursion": 16 }"#).unwrap();
    /// assert_eq!(config.max_recursion, 16);
    /// assert_eq!(config.path_max, 256);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: VfsConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&text)
    }

    /// Checks that every limit is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_recursion == 0 {
            return Err(ConfigError::Invalid(
                "max_recursion must leave room for the root".to_string(),
            ));
        }
        if self.path_max == 0 {
            return Err(ConfigError::Invalid("path_max must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl Default for VfsConfig {
    fn default() -> Self {
        Self {
            max_recursion: DEFAULT_MAX_RECURSION,
            path_max: DEFAULT_PATH_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_limits() {
        let config = VfsConfig::default();
        assert_eq!(config.max_recursion, 256);
        assert_eq!(config.path_max, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = VfsConfig::from_json(r#"{ "path_max": 1024 }"#).unwrap();
        assert_eq!(config.max_recursion, DEFAULT_MAX_RECURSION);
        assert_eq!(config.path_max, 1024);
    }

    #[test]
    fn test_from_json_rejects_zero_depth() {
        let result = VfsConfig::from_json(r#"{ "max_recursion": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let result = VfsConfig::from_json("max_recursion = 4");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_recursion": 8, "path_max": 64 }}"#).unwrap();

        let config = VfsConfig::load(file.path()).unwrap();
        assert_eq!(config.max_recursion, 8);
        assert_eq!(config.path_max, 64);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = VfsConfig::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
