//! Session credential management.
//!
//! The `SessionStore` owns the bearer token for the lifetime of the process
//! and mirrors every change into a durable `TokenStorage`, so a token
//! survives restarts until it is explicitly cleared.

mod error;
mod storage;

pub use error::SessionError;
pub use storage::{FileStorage, MemoryStorage, TokenStorage};

use log::*;
use std::sync::{Mutex, PoisonError};

/// Holds the current access token and its persistent backing.
///
pub struct SessionStore {
    token: Mutex<Option<String>>,
    storage: Box<dyn TokenStorage>,
}

impl SessionStore {
    /// Returns a new store primed with whatever token the storage holds. An
    /// unreadable entry is treated as no session at all.
    ///
    pub fn open(storage: impl TokenStorage + 'static) -> Self {
        let token = match storage.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Ignoring unreadable stored session: {}", e);
                None
            }
        };
        debug!(
            "Opened session store ({}).",
            if token.is_some() {
                "authenticated"
            } else {
                "unauthenticated"
            }
        );
        SessionStore {
            token: Mutex::new(token),
            storage: Box::new(storage),
        }
    }

    /// Returns a store that forgets its token when the process exits.
    ///
    pub fn in_memory() -> Self {
        SessionStore::open(MemoryStorage::new())
    }

    /// Returns the current token, if any.
    ///
    pub fn get(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replaces the current token. The in-memory value is updated even when
    /// persisting it fails; the failure is still returned.
    ///
    pub fn set(&self, token: &str) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        self.storage.store(token)
    }

    /// Drops the current token and its persisted copy.
    ///
    pub fn clear(&self) {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Err(e) = self.storage.erase() {
            warn!("Failed to remove stored session: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::Fake;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn scratch_file() -> PathBuf {
        let dir: Uuid = UUIDv4.fake();
        std::env::temp_dir()
            .join(format!("items-tui-{}", dir))
            .join("session.yml")
    }

    #[test]
    fn starts_empty() {
        let session = SessionStore::in_memory();
        assert_eq!(session.get(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn starts_with_stored_token() {
        let session = SessionStore::open(MemoryStorage::with_token("stored"));
        assert_eq!(session.get(), Some("stored".to_string()));
        assert!(session.is_authenticated());
    }

    #[test]
    fn set_and_clear() {
        let session = SessionStore::in_memory();
        session.set("abc").unwrap();
        assert_eq!(session.get(), Some("abc".to_string()));
        session.clear();
        assert_eq!(session.get(), None);
    }

    #[test]
    fn set_rejects_empty_token() {
        let session = SessionStore::in_memory();
        assert!(matches!(session.set(""), Err(SessionError::EmptyToken)));
        assert_eq!(session.get(), None);
    }

    #[test]
    fn get_has_no_side_effect() {
        let session = SessionStore::open(MemoryStorage::with_token("abc"));
        for _ in 0..3 {
            assert_eq!(session.get(), Some("abc".to_string()));
        }
    }

    #[test]
    fn token_survives_reopen() {
        let path = scratch_file();
        let token: Uuid = UUIDv4.fake();
        {
            let session = SessionStore::open(FileStorage::new(&path));
            session.set(&token.to_string()).unwrap();
        }
        let reopened = SessionStore::open(FileStorage::new(&path));
        assert_eq!(reopened.get(), Some(token.to_string()));
    }

    #[test]
    fn clear_survives_reopen() {
        let path = scratch_file();
        {
            let session = SessionStore::open(FileStorage::new(&path));
            session.set("abc").unwrap();
            session.clear();
        }
        assert!(!path.exists());
        assert_eq!(SessionStore::open(FileStorage::new(&path)).get(), None);
    }

    #[test]
    fn unreadable_storage_opens_unauthenticated() {
        let path = scratch_file();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert_eq!(SessionStore::open(FileStorage::new(&path)).get(), None);
    }
}
