//! Storage scopes and their root directories.

use std::path::{Path, PathBuf};

/// One of the three independent persistent-storage namespaces.
///
/// Each scope maps to its own root directory; scopes never share keys.
/// Temporary-scope files are expected to be purged by the host platform,
/// not by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    Local,
    Roaming,
    Temporary,
}

impl StorageScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageScope::Local => "local",
            StorageScope::Roaming => "roaming",
            StorageScope::Temporary => "temporary",
        }
    }
}

impl std::fmt::Display for StorageScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope accepted by settings operations.
///
/// Only Local and Roaming carry a key/value settings table, so the Temporary
/// variant is simply not representable here; "settings on Temporary" is a
/// compile error rather than a runtime one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsScope {
    Local,
    Roaming,
}

impl From<SettingsScope> for StorageScope {
    fn from(scope: SettingsScope) -> Self {
        match scope {
            SettingsScope::Local => StorageScope::Local,
            SettingsScope::Roaming => StorageScope::Roaming,
        }
    }
}

impl std::fmt::Display for SettingsScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        StorageScope::from(*self).fmt(f)
    }
}

/// Root directories backing the three scopes.
///
/// Roots are explicit rather than derived from an ambient application-data
/// location, so tests and embedders can point each scope anywhere.
#[derive(Debug, Clone)]
pub struct StorageRoots {
    local: PathBuf,
    roaming: PathBuf,
    temporary: PathBuf,
}

impl StorageRoots {
    pub fn new(
        local: impl Into<PathBuf>,
        roaming: impl Into<PathBuf>,
        temporary: impl Into<PathBuf>,
    ) -> Self {
        Self {
            local: local.into(),
            roaming: roaming.into(),
            temporary: temporary.into(),
        }
    }

    /// Three sibling directories (`local`, `roaming`, `temporary`) under `base`.
    pub fn under(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self::new(base.join("local"), base.join("roaming"), base.join("temporary"))
    }

    pub fn dir(&self, scope: StorageScope) -> &Path {
        match scope {
            StorageScope::Local => &self.local,
            StorageScope::Roaming => &self.roaming,
            StorageScope::Temporary => &self.temporary,
        }
    }
}
