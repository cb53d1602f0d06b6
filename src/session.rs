//! Session token storage.
//!
//! The token is an opaque string stored in `${SOUK_HOME}/auth.json` with
//! restricted permissions (0600). At most one token exists at a time and
//! its presence is the sole signal of authentication state.
//!
//! Reads fail open: a missing, unreadable or malformed file reads as "no
//! token", dropping the app back to the unauthenticated state instead of
//! refusing to start.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::paths;

/// On-disk shape of the stored token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    /// The session token, under its fixed entry name.
    #[serde(rename = "authToken")]
    auth_token: String,
    /// When the token was written (diagnostic only, never interpreted).
    saved_at: String,
}

/// Storage for the single session token.
///
/// Injected into whatever issues authenticated requests so tests can
/// substitute [`MemoryTokenStore`].
pub trait TokenStore: Send + Sync {
    /// Persists the token, replacing any previous one.
    fn write(&self, token: &str) -> Result<()>;

    /// Returns the stored token. Storage errors read as absent.
    fn read(&self) -> Option<String>;

    /// Removes the stored token. Returns true if one was present.
    fn clear(&self) -> Result<bool>;
}

/// Token store backed by `auth.json` under the app home directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Opens the store at the default `${SOUK_HOME}/auth.json` location.
    pub fn open_default() -> Self {
        Self {
            path: paths::auth_path(),
        }
    }

    /// Opens the store at a specific path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn write_contents(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn write(&self, token: &str) -> Result<()> {
        let stored = StoredToken {
            auth_token: token.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        };
        let contents =
            serde_json::to_string_pretty(&stored).context("Failed to serialize token")?;
        self.write_contents(&contents)
    }

    fn read(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "token file unreadable");
                return None;
            }
        };

        match serde_json::from_str::<StoredToken>(&contents) {
            Ok(stored) => Some(stored.auth_token),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "token file malformed");
                None
            }
        }
    }

    fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        let had_token = self.read().is_some();
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(had_token)
    }
}

/// In-memory token store for tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: std::sync::Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a token.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: std::sync::Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn write(&self, token: &str) -> Result<()> {
        *self.token.lock().expect("token lock") = Some(token.to_string());
        Ok(())
    }

    fn read(&self) -> Option<String> {
        self.token.lock().expect("token lock").clone()
    }

    fn clear(&self) -> Result<bool> {
        Ok(self.token.lock().expect("token lock").take().is_some())
    }
}
