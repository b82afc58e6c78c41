//! Scoped file primitives.

use super::scope::{StorageRoots, StorageScope};
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// File-per-key blob storage across the three scopes.
///
/// Internal lookups treat an absent file as a normal miss, never an error;
/// only the untyped [`FileStore::read`] surfaces absence as a failure.
#[derive(Clone)]
pub struct FileStore {
    roots: Arc<StorageRoots>,
}

impl FileStore {
    pub(crate) fn new(roots: Arc<StorageRoots>) -> Self {
        Self { roots }
    }

    fn path_for(&self, key: &str, scope: StorageScope) -> PathBuf {
        self.roots.dir(scope).join(key)
    }

    /// Path of the file for `key` if it exists, `None` otherwise.
    async fn lookup(&self, key: &str, scope: StorageScope) -> Result<Option<PathBuf>> {
        let path = self.path_for(key, scope);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some(path)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists(&self, key: &str, scope: StorageScope) -> Result<bool> {
        Ok(self.lookup(key, scope).await?.is_some())
    }

    /// Existence check against an explicit directory instead of a scope root.
    pub async fn exists_in(dir: &Path, key: &str) -> Result<bool> {
        match tokio::fs::metadata(dir.join(key)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the file as text. An absent file is a fatal
    /// [`Error::FileNotFound`], unlike every other lookup in this store.
    pub async fn read(&self, key: &str, scope: StorageScope) -> Result<String> {
        match self.lookup(key, scope).await? {
            Some(path) => Ok(tokio::fs::read_to_string(&path).await?),
            None => Err(Error::FileNotFound { key: key.to_string(), scope }),
        }
    }

    /// Reads and deserializes the file as JSON. An absent file yields
    /// `T::default()`; a present but malformed file propagates the
    /// deserialization error.
    pub async fn read_json<T>(&self, key: &str, scope: StorageScope) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.lookup(key, scope).await? {
            Some(path) => {
                let text = tokio::fs::read_to_string(&path).await?;
                Ok(serde_json::from_str(&text)?)
            }
            None => Ok(T::default()),
        }
    }

    /// Creates or replaces the file with `body` (whole-file write, always
    /// replace). Returns whether the file exists post-write.
    pub async fn write(&self, key: &str, body: &str, scope: StorageScope) -> Result<bool> {
        let path = self.path_for(key, scope);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, body).await?;
        debug!(%key, %scope, bytes = body.len(), "wrote file");
        self.exists(key, scope).await
    }

    /// Serializes `value` as JSON and writes it via [`FileStore::write`].
    pub async fn write_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        scope: StorageScope,
    ) -> Result<bool> {
        let text = serde_json::to_string(value)?;
        self.write(key, &text, scope).await
    }

    /// Deletes the file if present. Returns whether the file is now absent,
    /// so a delete of a nonexistent key is an idempotent success.
    pub async fn delete(&self, key: &str, scope: StorageScope) -> Result<bool> {
        if let Some(path) = self.lookup(key, scope).await? {
            tokio::fs::remove_file(&path).await?;
            debug!(%key, %scope, "deleted file");
        }
        Ok(!self.exists(key, scope).await?)
    }

    /// Writes without waiting for completion. The task is detached: there is
    /// no handle to await or cancel, failures are logged and otherwise
    /// unobservable, and the effect may be lost if the process exits first.
    pub fn write_detached(&self, key: &str, body: &str, scope: StorageScope) {
        let store = self.clone();
        let key = key.to_string();
        let body = body.to_string();
        tokio::spawn(async move {
            if let Err(error) = store.write(&key, &body, scope).await {
                warn!(%key, %scope, %error, "detached file write failed");
            }
        });
    }

    /// JSON variant of [`FileStore::write_detached`]. Serialization failures
    /// are swallowed with a log line like any other detached failure.
    pub fn write_json_detached<T: Serialize>(&self, key: &str, value: &T, scope: StorageScope) {
        match serde_json::to_string(value) {
            Ok(text) => self.write_detached(key, &text, scope),
            Err(error) => warn!(%key, %scope, %error, "detached file write failed to serialize"),
        }
    }

    /// Deletes without waiting for completion; same detached semantics as
    /// [`FileStore::write_detached`].
    pub fn delete_detached(&self, key: &str, scope: StorageScope) {
        let store = self.clone();
        let key = key.to_string();
        tokio::spawn(async move {
            if let Err(error) = store.delete(&key, scope).await {
                warn!(%key, %scope, %error, "detached file delete failed");
            }
        });
    }
}
