//! Site configuration.
//!
//! Parsed from a `cms.toml` file with serde. Every section and field has a
//! default, so a missing or partial file still yields a working config.

use std::path::Path;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,
}

/// Site-wide settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL format suffix appended to page routes and stripped from stored
    /// links (e.g. `.html`).
    pub url_suffix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url_suffix: ".html".to_owned(),
        }
    }
}

/// Error loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("cannot read config file {path}")]
    Io {
        /// Path of the file.
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// File is not valid TOML for the expected shape.
    #[error("cannot parse config file {path}")]
    Parse {
        /// Path of the file.
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
