//! Scoped persistent storage: key/value settings and file blobs.
//!
//! Three independent scopes back everything here:
//!
//! | Scope | Files | Settings |
//! |-------|-------|----------|
//! | [`StorageScope::Local`] | yes | yes |
//! | [`StorageScope::Roaming`] | yes | yes |
//! | [`StorageScope::Temporary`] | yes | no |
//!
//! The asymmetry is encoded in the types: file operations take
//! [`StorageScope`], settings operations take [`SettingsScope`], which has no
//! Temporary variant. Each scope's root directory is supplied explicitly via
//! [`StorageRoots`].
//!
//! Absent keys are a normal outcome throughout. The only operation that
//! raises on absence is the untyped [`StorageHelper::read_file`]; the typed
//! [`StorageHelper::read_file_json`] yields the type's default instead, and
//! [`StorageHelper::get_setting`] collapses both absence and read failures
//! into the caller-supplied default.

mod files;
mod scope;
mod settings;

pub use files::FileStore;
pub use scope::{SettingsScope, StorageRoots, StorageScope};
pub use settings::SettingsStore;

use crate::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Facade over the scoped settings tables and file stores.
///
/// Cheap to clone; clones share the same roots.
#[derive(Clone)]
pub struct StorageHelper {
    files: FileStore,
    settings: SettingsStore,
}

impl StorageHelper {
    pub fn new(roots: StorageRoots) -> Self {
        let roots = Arc::new(roots);
        Self {
            files: FileStore::new(roots.clone()),
            settings: SettingsStore::new(roots),
        }
    }

    // Settings (Local/Roaming only, enforced by `SettingsScope`).

    pub async fn setting_exists(&self, key: &str, scope: SettingsScope) -> bool {
        self.settings.exists(key, scope).await
    }

    /// Returns `default` when `key` is absent or the read fails in any way.
    pub async fn get_setting<T: DeserializeOwned>(
        &self,
        key: &str,
        default: T,
        scope: SettingsScope,
    ) -> T {
        self.settings.get(key, default, scope).await
    }

    pub async fn set_setting<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        scope: SettingsScope,
    ) -> Result<()> {
        self.settings.set(key, value, scope).await
    }

    pub async fn delete_setting(&self, key: &str, scope: SettingsScope) -> Result<()> {
        self.settings.delete(key, scope).await
    }

    // Files (all three scopes).

    pub async fn file_exists(&self, key: &str, scope: StorageScope) -> Result<bool> {
        self.files.exists(key, scope).await
    }

    /// Existence check against an explicit directory instead of a scope root.
    pub async fn file_exists_in(dir: &Path, key: &str) -> Result<bool> {
        FileStore::exists_in(dir, key).await
    }

    /// Reads the file as text; absent files raise
    /// [`Error::FileNotFound`](crate::Error::FileNotFound).
    pub async fn read_file(&self, key: &str, scope: StorageScope) -> Result<String> {
        self.files.read(key, scope).await
    }

    /// Reads the file as JSON; absent files yield `T::default()`.
    pub async fn read_file_json<T>(&self, key: &str, scope: StorageScope) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.files.read_json(key, scope).await
    }

    /// Creates or replaces the file; returns whether it exists post-write.
    pub async fn write_file(&self, key: &str, body: &str, scope: StorageScope) -> Result<bool> {
        self.files.write(key, body, scope).await
    }

    /// Serializes `value` as JSON, then creates or replaces the file.
    pub async fn write_file_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        scope: StorageScope,
    ) -> Result<bool> {
        self.files.write_json(key, value, scope).await
    }

    /// Deletes if present; returns whether the file is now absent.
    pub async fn delete_file(&self, key: &str, scope: StorageScope) -> Result<bool> {
        self.files.delete(key, scope).await
    }

    // Fire-and-forget variants: same effect, no handle, failures logged only.

    pub fn write_file_detached(&self, key: &str, body: &str, scope: StorageScope) {
        self.files.write_detached(key, body, scope)
    }

    pub fn write_file_json_detached<T: Serialize>(&self, key: &str, value: &T, scope: StorageScope) {
        self.files.write_json_detached(key, value, scope)
    }

    pub fn delete_file_detached(&self, key: &str, scope: StorageScope) {
        self.files.delete_detached(key, scope)
    }
}
