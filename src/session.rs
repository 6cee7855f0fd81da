//! Bearer-token storage.
//!
//! DESIGN
//! ======
//! The token is the only state that outlives a call. It sits behind the
//! [`SessionStore`] trait so the client can run against memory in tests, a
//! file on disk in the CLI, or anything else a host application provides.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail from the caller's point of view: an unreadable store is
//! logged and treated as "no token". Writes return [`SessionError`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::AUTH_TOKEN_KEY;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait SessionStore: Send + Sync {
    /// Current bearer token, if any.
    fn token(&self) -> Option<String>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set_token(&self, token: &str) -> Result<(), SessionError>;

    /// Forget the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn clear_token(&self) -> Result<(), SessionError>;
}

// =============================================================================
// IN-MEMORY
// =============================================================================

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.slot().clone()
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        *self.slot() = Some(token.to_owned());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }
}

// =============================================================================
// FILE-BACKED
// =============================================================================

/// Token kept in a small JSON object file under [`AUTH_TOKEN_KEY`].
///
/// Other keys in the file are preserved across writes.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(SessionError::Io { path: self.path.clone(), source }),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| SessionError::Corrupt { path: self.path.clone(), source })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SessionError::Io { path: parent.to_path_buf(), source })?;
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|source| SessionError::Corrupt { path: self.path.clone(), source })?;
        std::fs::write(&self.path, raw).map_err(|source| SessionError::Io { path: self.path.clone(), source })
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        let _guard = self.guard();
        match self.read_entries() {
            Ok(mut entries) => entries.remove(AUTH_TOKEN_KEY),
            Err(e) => {
                tracing::warn!(error = %e, "session store unreadable; continuing without token");
                None
            }
        }
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        let _guard = self.guard();
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(AUTH_TOKEN_KEY.to_owned(), token.to_owned());
        self.write_entries(&entries)
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        let _guard = self.guard();
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(SessionError::Corrupt { .. }) => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        if entries.remove(AUTH_TOKEN_KEY).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
