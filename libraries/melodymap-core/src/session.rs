//! Session store seam
//!
//! The dashboard holds at most one bearer token. Everything that needs it
//! receives an `Arc<dyn SessionStore>` so the backend can be swapped for an
//! in-memory store in tests or a file on disk in the terminal host.

use crate::error::{Result, SessionError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Name of the single key holding the bearer token.
pub const SESSION_TOKEN_KEY: &str = "access_token";

/// Key-value access to the current session token.
///
/// There is no expiry tracking. Writers in separate processes are not
/// coordinated: the last write wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get the stored token, if any
    async fn get(&self) -> Result<Option<String>>;

    /// Store a token, replacing any previous one
    async fn set(&self, token: &str) -> Result<()>;

    /// Remove the stored token
    async fn clear(&self) -> Result<()>;

    /// Whether a token is currently stored
    async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.get().await?.is_some())
    }
}

/// Session store kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Result<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn set(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionDocument {
    access_token: String,
}

/// Session store persisted as a small JSON document on disk.
///
/// A missing file means no session. Writes go to a sibling temp file that
/// is renamed over the target, so readers never observe a half-written
/// document.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Create a store backed by `path`. The file is not touched until the
    /// first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the session document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> Result<Option<String>> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let document: SessionDocument = serde_json::from_slice(&contents)?;
        if document.access_token.is_empty() {
            return Ok(None);
        }
        Ok(Some(document.access_token))
    }

    async fn set(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let document = SessionDocument {
            access_token: token.to_string(),
        };
        let bytes = serde_json::to_vec_pretty(&document)?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), "Session token stored");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session token cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
