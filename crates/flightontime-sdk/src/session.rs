//! Session token storage and the gate consulted before protected views.
//!
//! The gate is advisory: it only decides what the client renders. The
//! backend authorises every protected request on its own.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SdkError;

const APP_DIR: &str = "flightontime";
const SESSION_FILE: &str = "session.json";

/// Persistent key-value slot holding at most one session token.
pub trait SessionStore {
    /// Read the stored token, if any.
    fn load(&self) -> Result<Option<String>, SdkError>;
    /// Replace the stored token.
    fn save(&self, token: &str) -> Result<(), SdkError>;
    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SdkError>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Volatile store, used by tests and one-shot commands.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>, SdkError> {
        Ok(self.token.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, token: &str) -> Result<(), SdkError> {
        *self.token.lock().map_err(poisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SdkError> {
        *self.token.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> SdkError {
    SdkError::Config("session store lock poisoned".into())
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// Store backed by a JSON file, surviving restarts until cleared.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Use `path` as the session file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/flightontime/session.json`.
    pub fn default_location() -> Result<Self, SdkError> {
        let dir = dirs::config_dir()
            .ok_or_else(|| SdkError::Config("could not determine config directory".into()))?
            .join(APP_DIR);
        Ok(Self::new(dir.join(SESSION_FILE)))
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>, SdkError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let stored: StoredSession = serde_json::from_str(&content)?;
                Ok(Some(stored.token))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), SdkError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&StoredSession {
            token: token.to_string(),
        })?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SdkError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionGate
// ---------------------------------------------------------------------------

/// Answers "is someone logged in?" for the view router.
#[derive(Debug, Default)]
pub struct SessionGate<S> {
    store: S,
}

impl<S: SessionStore> SessionGate<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// `true` if a non-empty token is stored.
    ///
    /// An unreadable store counts as no session.
    pub fn has_session(&self) -> bool {
        self.token().is_some()
    }

    /// The stored token, if any.
    pub fn token(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read session store");
                None
            }
        }
    }

    /// Store a token obtained from a successful login.
    pub fn set_session(&self, token: &str) -> Result<(), SdkError> {
        if token.trim().is_empty() {
            return Err(SdkError::Auth("refusing to store an empty token".into()));
        }
        self.store.save(token)
    }

    /// Forget the current session (logout).
    pub fn clear_session(&self) -> Result<(), SdkError> {
        self.store.clear()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
