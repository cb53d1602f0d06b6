//! Path resolution for Souk configuration and data directories.
//!
//! SOUK_HOME resolution order:
//! 1. SOUK_HOME environment variable (if set)
//! 2. ~/.config/souk (default)

use std::path::PathBuf;

/// Returns the Souk home directory.
///
/// Checks SOUK_HOME env var first, falls back to ~/.config/souk
pub fn souk_home() -> PathBuf {
    if let Ok(home) = std::env::var("SOUK_HOME") {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .map(|h| h.join(".config").join("souk"))
        .expect("Could not determine home directory")
}

/// Returns the path to the config.toml file.
pub fn config_path() -> PathBuf {
    souk_home().join("config.toml")
}

/// Returns the path to the stored-token file.
pub fn auth_path() -> PathBuf {
    souk_home().join("auth.json")
}

/// Returns the directory log files are written to.
pub fn logs_dir() -> PathBuf {
    souk_home().join("logs")
}
