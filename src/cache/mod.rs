//! Preview-mode response cache.
//!
//! While the host runs in a design-time preview context, GET response bodies
//! are cached as one raw-text file per [`CacheKey`] in the Local storage
//! scope, so design-time rendering needs no live network. No metadata
//! (timestamp, headers, status) is stored alongside a body, nothing expires,
//! and entries persist until deleted or the scope is cleared externally.
//! POST responses never pass through here.

mod key;

pub use key::CacheKey;

use crate::storage::{StorageHelper, StorageScope};
use crate::Result;
use tracing::debug;

/// Read/write helper for the preview-mode GET cache.
pub struct PreviewCache {
    storage: StorageHelper,
}

impl PreviewCache {
    pub fn new(storage: StorageHelper) -> Self {
        Self { storage }
    }

    /// Returns the cached body for `key`, or `None` on a miss.
    pub async fn lookup(&self, key: &CacheKey) -> Result<Option<String>> {
        if !self.storage.file_exists(key.as_str(), StorageScope::Local).await? {
            debug!(%key, "preview cache miss");
            return Ok(None);
        }
        let body = self.storage.read_file(key.as_str(), StorageScope::Local).await?;
        debug!(%key, "preview cache hit");
        Ok(Some(body))
    }

    /// Persists `body` under `key` without waiting for completion; failures
    /// are not surfaced to the caller.
    pub fn store_detached(&self, key: &CacheKey, body: &str) {
        self.storage.write_file_detached(key.as_str(), body, StorageScope::Local);
    }
}
