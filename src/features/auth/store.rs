//! Persistent session store: one durable slot holding the raw session token
//! string. The store knows nothing about users or auth state; the machine
//! reads it once at construction and writes it only on fulfilled logins and
//! on logout.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::warn;

const SESSION_FILE: &str = "session-token";

/// Durable token slot injected into the state machine.
///
/// Persistence is best-effort: a failed write leaves the in-memory session
/// valid, so implementations report problems through logging rather than
/// failing the auth operation that triggered them.
pub trait SessionStore {
    /// Returns the stored token, if any.
    fn get(&self) -> Option<String>;
    /// Stores `token`, replacing any previous value.
    fn set(&mut self, token: &str);
    /// Removes the stored token.
    fn clear(&mut self);
}

/// File-backed store surviving process restarts.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default token path.
    ///
    /// Checks the `VERIDOC_HOME` env var first, falls back to
    /// `~/.config/veridoc`.
    pub fn default_path() -> PathBuf {
        if let Ok(home) = std::env::var("VERIDOC_HOME") {
            return PathBuf::from(home).join(SESSION_FILE);
        }

        dirs::home_dir()
            .map(|home| home.join(".config").join("veridoc").join(SESSION_FILE))
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE))
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn set(&mut self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!("failed to create {}: {err}", parent.display());
                return;
            }
        }

        // Atomic write (temp file + rename) to prevent a torn token.
        let tmp_path = self.path.with_extension("tmp");
        if let Err(err) = fs::write(&tmp_path, token) {
            warn!("failed to write {}: {err}", tmp_path.display());
            return;
        }
        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            warn!("failed to persist {}: {err}", self.path.display());
        }
    }

    fn clear(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!("failed to clear {}: {err}", self.path.display()),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    token: Option<String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token.clone()
    }

    fn set(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn clear(&mut self) {
        self.token = None;
    }
}
