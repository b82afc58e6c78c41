//! Per-scope persistent key/value settings.
//!
//! Each capable scope keeps one JSON table file in its root. The table is
//! loaded and rewritten whole on mutation; concurrent writers are
//! last-write-wins, matching the file store.

use super::scope::{SettingsScope, StorageRoots};
use crate::Result;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const SETTINGS_FILE: &str = "settings.json";

/// Key/value settings tables for the Local and Roaming scopes.
#[derive(Clone)]
pub struct SettingsStore {
    roots: Arc<StorageRoots>,
}

impl SettingsStore {
    pub(crate) fn new(roots: Arc<StorageRoots>) -> Self {
        Self { roots }
    }

    fn table_path(&self, scope: SettingsScope) -> PathBuf {
        self.roots.dir(scope.into()).join(SETTINGS_FILE)
    }

    /// Loads the table for `scope`; a missing file is an empty table.
    async fn load(&self, scope: SettingsScope) -> Result<Map<String, Value>> {
        match tokio::fs::read_to_string(self.table_path(scope)).await {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, scope: SettingsScope, table: &Map<String, Value>) -> Result<()> {
        let path = self.table_path(scope);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, serde_json::to_string(table)?).await?;
        Ok(())
    }

    /// Typed lookup that keeps absence and failure distinguishable.
    async fn try_get<T: DeserializeOwned>(
        &self,
        key: &str,
        scope: SettingsScope,
    ) -> Result<Option<T>> {
        let table = self.load(scope).await?;
        match table.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Whether `key` is present in the scope's table. Read failures count as
    /// absent.
    pub async fn exists(&self, key: &str, scope: SettingsScope) -> bool {
        match self.load(scope).await {
            Ok(table) => table.contains_key(key),
            Err(error) => {
                warn!(%key, %scope, %error, "settings table unreadable, treating key as absent");
                false
            }
        }
    }

    /// Returns the value for `key`, or `default` when the key is absent or
    /// the lookup fails for any reason. Absence is the normal path; failures
    /// (unreadable table, incompatible value) are logged before being
    /// collapsed into the same default.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, default: T, scope: SettingsScope) -> T {
        match self.try_get(key, scope).await {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(error) => {
                warn!(%key, %scope, %error, "settings read failed, returning default");
                default
            }
        }
    }

    /// Stores `value` under `key`, overwriting any previous value. First
    /// writes create the table.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, scope: SettingsScope) -> Result<()> {
        let mut table = self.load(scope).await?;
        table.insert(key.to_string(), serde_json::to_value(value)?);
        self.save(scope, &table).await
    }

    /// Removes `key` from the scope's table; a no-op when absent.
    pub async fn delete(&self, key: &str, scope: SettingsScope) -> Result<()> {
        let mut table = self.load(scope).await?;
        if table.remove(key).is_some() {
            self.save(scope, &table).await?;
        }
        Ok(())
    }
}
