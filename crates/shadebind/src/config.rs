// SPDX-License-Identifier: MIT OR Apache-2.0
//! Binding configuration.
//!
//! Settings are stored as RON and read once when the C surface initialises:
//! - Log filter and whether to echo to stderr
//! - Whether the default shaders are created
//! - Strict mode, which raises swallowed errors from debug to warn

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "SHADEBIND_CONFIG";

/// Error when loading or saving a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid RON for [`BindingConfig`]
    #[error("config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Config could not be serialized
    #[error("config serialization error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Runtime settings for the binding layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set
    pub log_filter: String,
    /// Echo log events to stderr
    pub log_to_stderr: bool,
    /// Create the surface, light, background and empty shaders on initialise
    pub create_default_shaders: bool,
    /// Log swallowed errors at warn instead of debug
    pub strict: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            log_filter: "shadebind=info".to_string(),
            log_to_stderr: false,
            create_default_shaders: true,
            strict: false,
        }
    }
}

impl BindingConfig {
    /// Parse a config from RON
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Serialize the config as RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Save the config to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], falling back to defaults.
    ///
    /// Logging is not up yet when this runs, so a bad file is returned as
    /// the second element for the caller to report.
    pub fn from_env() -> (Self, Option<ConfigError>) {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => match Self::load(Path::new(&path)) {
                Ok(config) => (config, None),
                Err(err) => (Self::default(), Some(err)),
            },
            None => (Self::default(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BindingConfig::default();
        assert_eq!(config.log_filter, "shadebind=info");
        assert!(config.create_default_shaders);
        assert!(!config.strict);
    }

    #[test]
    fn test_serialization() {
        let config = BindingConfig {
            strict: true,
            ..BindingConfig::default()
        };
        let ron_str = config.to_ron().unwrap();
        let loaded = BindingConfig::from_ron(&ron_str).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = BindingConfig::from_ron("(strict: true)").unwrap();
        assert!(config.strict);
        assert!(config.create_default_shaders);
        assert_eq!(config.log_filter, "shadebind=info");
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            BindingConfig::from_ron("(strict: maybe)"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = BindingConfig::load(Path::new("/nonexistent/shadebind.ron"));
        assert!(matches!(err, Err(ConfigError::Io(_))));
    }
}
