//! Persisted session: key/value storage backends and the session contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API client reads the bearer token from here on every request, the auth
//! service writes it on login/registration, and [`SessionStore::teardown`] is
//! the one routine that clears it again.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::net::types::{Role, Session};

/// Raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Serialized full session returned by login.
pub const SESSION_KEY: &str = "user-current";
/// Role of the logged-in account.
pub const ROLE_KEY: &str = "role";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key/value store with browser `localStorage` semantics.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the removal.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// BACKENDS
// =============================================================================

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}

/// Storage persisted as a single JSON object in a file.
///
/// Every write rewrites the whole file; a missing or unreadable file reads as
/// empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file unreadable; treating as empty");
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(items)?;
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // The file holds a bearer token: owner read/write only.
        #[cfg(unix)]
        std::os::unix::fs::OpenOptionsExt::mode(&mut options, 0o600);
        let mut file = options.open(&self.path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(raw.as_bytes())?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_all().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.read_all();
        items.insert(key.to_owned(), value.to_owned());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.read_all();
        if items.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&items)
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Typed view over a [`Storage`] backend holding the persisted session.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.storage.get_item(ROLE_KEY)?.parse().ok()
    }

    /// Store the token and the serialized session (login).
    ///
    /// # Errors
    ///
    /// Returns an error if either key cannot be written.
    pub fn persist_session(&self, session: &Session) -> Result<(), StorageError> {
        let blob = serde_json::to_string(session)?;
        self.storage.set_item(TOKEN_KEY, &session.token)?;
        self.storage.set_item(SESSION_KEY, &blob)
    }

    /// Store only the token (registration).
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be written.
    pub fn persist_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    /// # Errors
    ///
    /// Returns an error if the key cannot be written.
    pub fn persist_role(&self, role: Role) -> Result<(), StorageError> {
        self.storage.set_item(ROLE_KEY, role.as_str())
    }

    /// Load the persisted session blob.
    ///
    /// An expired session is torn down and reads as `None`; an undecodable
    /// blob also reads as `None` but is left in place.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        let raw = self.storage.get_item(SESSION_KEY)?;
        let session = match serde_json::from_str::<Session>(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "persisted session is not decodable");
                return None;
            }
        };
        if session.is_expired_at(time::OffsetDateTime::now_utc()) {
            tracing::info!("persisted session expired; clearing");
            self.teardown();
            return None;
        }
        Some(session)
    }

    /// Clear every session key. Failures are logged; the remaining keys are
    /// still attempted.
    pub fn teardown(&self) {
        for key in [TOKEN_KEY, SESSION_KEY, ROLE_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                tracing::error!(key, error = %e, "failed to clear session key");
            }
        }
    }
}
