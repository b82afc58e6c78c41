use crate::cache::PreviewCache;
use crate::client::core::{PreviewMode, RestClient};
use crate::storage::StorageHelper;
use crate::{Error, Result};
use std::sync::Arc;

/// Builder for [`RestClient`].
///
/// Keep this surface small: storage for the preview cache, the preview-mode
/// source, and an optional HTTP client override for tests.
pub struct RestClientBuilder {
    storage: Option<StorageHelper>,
    preview: PreviewMode,
    http: Option<reqwest::Client>,
}

impl RestClientBuilder {
    pub fn new() -> Self {
        Self {
            storage: None,
            preview: PreviewMode::Fixed(false),
            http: None,
        }
    }

    /// Storage backing the preview cache. Required.
    pub fn storage(mut self, storage: StorageHelper) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Fix preview mode for the lifetime of the client. Defaults to off.
    pub fn preview_mode(mut self, enabled: bool) -> Self {
        self.preview = PreviewMode::Fixed(enabled);
        self
    }

    /// Probe evaluated once per call, for hosts whose design-time state is
    /// not known at construction. The probe is read-only from this crate's
    /// perspective.
    pub fn preview_probe(mut self, probe: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.preview = PreviewMode::Probe(Arc::new(probe));
        self
    }

    /// Override the HTTP client, primarily for injecting preconfigured
    /// transports in tests.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> Result<RestClient> {
        let storage = self
            .storage
            .ok_or_else(|| Error::Configuration("storage helper is required".into()))?;
        let http = self.http.unwrap_or_default();
        Ok(RestClient::new(http, PreviewCache::new(storage), self.preview))
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
