//! Durable backings for the session credential.

use super::SessionError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

/// Somewhere a single access token can be kept between runs.
///
pub trait TokenStorage: Send + Sync {
    /// Return the stored token, if any.
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Replace the stored token.
    fn store(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token entirely.
    fn erase(&self) -> Result<(), SessionError>;
}

/// On-disk layout of `session.yml`.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    access_token: String,
}

/// Keeps the token in a YAML file that only exists while authenticated.
///
pub struct FileStorage {
    file_path: PathBuf,
}

impl FileStorage {
    /// Returns a new instance backed by the file at the given path.
    ///
    pub fn new(file_path: &Path) -> Self {
        FileStorage {
            file_path: file_path.to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl TokenStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, SessionError> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let contents =
            fs::read_to_string(&self.file_path).map_err(|e| SessionError::ReadFailed {
                path: self.file_path.clone(),
                source: e,
            })?;
        let data: FileSpec = serde_yaml::from_str(&contents)
            .map_err(|e| SessionError::DeserializationFailed(e.to_string()))?;
        Ok(Some(data.access_token).filter(|token| !token.is_empty()))
    }

    fn store(&self, token: &str) -> Result<(), SessionError> {
        let data = FileSpec {
            access_token: token.to_owned(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| SessionError::SerializationFailed(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| SessionError::WriteFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let write_failed = |e: std::io::Error| SessionError::WriteFailed {
            path: self.file_path.clone(),
            source: e,
        };
        let mut file = fs::File::create(&self.file_path).map_err(write_failed)?;
        write!(file, "{}", content).map_err(write_failed)?;
        file.flush().map_err(write_failed)?;
        Ok(())
    }

    fn erase(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::WriteFailed {
                path: self.file_path.clone(),
                source: e,
            }),
        }
    }
}

/// Keeps the token in memory only. Used by tests and throwaway sessions.
///
#[derive(Default)]
pub struct MemoryStorage {
    token: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Returns an instance that already holds the given token.
    ///
    #[cfg(test)]
    pub fn with_token(token: &str) -> Self {
        MemoryStorage {
            token: Mutex::new(Some(token.to_owned())),
        }
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn erase(&self) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
