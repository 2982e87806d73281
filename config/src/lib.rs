//! Configuration loading for binsteps.
//!
//! Settings live in `~/.binsteps/config.toml`:
//!
//! ```toml
//! [explain]
//! api_key = "..."            # optional; GEMINI_API_KEY overrides
//! model = "gemini-2.5-flash" # optional
//! ```
//!
//! The file only configures the optional explanation feature; the arithmetic
//! engine itself needs no configuration. A missing file is not an error -
//! it simply means explanations are disabled unless the environment provides
//! a key. Malformed TOML is an error, never a silent default.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

const CONFIG_DIR: &str = ".binsteps";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub explain: ExplainSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplainSection {
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl Config {
    /// Load configuration from the default path, applying the environment
    /// override for the API key. Returns the default (empty) configuration
    /// when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) if path.is_file() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        if let Ok(key) = std::env::var(API_KEY_ENV_VAR)
            && !key.trim().is_empty()
        {
            config.explain.api_key = Some(key);
        }
        Ok(config)
    }

    /// Load and parse a specific file. Does not apply environment overrides.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// The API key for the explanation provider, if any source supplied one.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.explain
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// The configured model, if any.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.explain.model.as_deref()
    }
}

/// Path to the configuration file (`~/.binsteps/config.toml`), if the home
/// directory can be determined.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}
