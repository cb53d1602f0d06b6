//! Configuration management for Souk.
//!
//! Loads configuration from ${SOUK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::paths;

/// Default API endpoint, used when neither SOUK_BASE_URL nor the config
/// file provides one.
pub const DEFAULT_BASE_URL: &str = "http://192.168.1.110:8080";

/// Default message language.
pub const DEFAULT_LANGUAGE: &str = "fr";

/// Manually configured device position for profile completion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LocationConfig> for Coordinates {
    fn from(value: LocationConfig) -> Self {
        Coordinates {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API base URL. Overridden by the SOUK_BASE_URL environment variable.
    pub base_url: Option<String>,
    /// Message language ("fr" or "ar").
    pub language: String,
    /// Position submitted with the profile-completion request.
    pub location: Option<LocationConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            language: DEFAULT_LANGUAGE.to_string(),
            location: None,
        }
    }
}

impl Config {
    /// Loads the configuration from ${SOUK_HOME}/config.toml.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads the configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Resolves the API base URL with precedence: env > config > default.
    ///
    /// Trailing slashes are trimmed so endpoint paths can be appended as-is.
    pub fn resolve_base_url(&self) -> Result<String> {
        if let Ok(env_url) = std::env::var("SOUK_BASE_URL") {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(trimmed.trim_end_matches('/').to_string());
            }
        }

        if let Some(config_url) = self.base_url.as_deref() {
            let trimmed = config_url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(trimmed.trim_end_matches('/').to_string());
            }
        }

        Ok(DEFAULT_BASE_URL.to_string())
    }

    /// Returns the configured position, if any.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.map(Coordinates::from)
    }
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid base URL: {url}"))?;
    Ok(())
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Writes the default config template if no config file exists yet.
///
/// Returns true if the file was created.
pub fn ensure_config_file() -> Result<bool> {
    let path = paths::config_path();
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(&path, default_config_template())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
