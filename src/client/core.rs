//! Typed GET/POST with preview-mode response caching.

use crate::cache::{CacheKey, PreviewCache};
use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Whether the client is running in a design-time preview context.
///
/// Either fixed at construction or probed per call; this crate only reads
/// the value, it never flips it.
pub(crate) enum PreviewMode {
    Fixed(bool),
    Probe(Arc<dyn Fn() -> bool + Send + Sync>),
}

impl PreviewMode {
    fn is_enabled(&self) -> bool {
        match self {
            PreviewMode::Fixed(enabled) => *enabled,
            PreviewMode::Probe(probe) => probe(),
        }
    }
}

/// Minimal REST client: typed JSON GET/POST, with GET responses served from
/// and persisted to the preview cache while in preview mode.
///
/// No retries, no status-code classification: transport failures propagate
/// unmodified, and even a 404 body is deserialized as if successful.
pub struct RestClient {
    http: reqwest::Client,
    cache: PreviewCache,
    preview: PreviewMode,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient").finish_non_exhaustive()
    }
}

impl RestClient {
    pub(crate) fn new(http: reqwest::Client, cache: PreviewCache, preview: PreviewMode) -> Self {
        Self { http, cache, preview }
    }

    pub fn builder() -> super::builder::RestClientBuilder {
        super::builder::RestClientBuilder::new()
    }

    /// Performs a GET and deserializes the JSON response body as `T`.
    ///
    /// In preview mode a cached body for the same URL is returned without
    /// touching the network, and on a miss the live body is persisted
    /// (detached, before deserialization is attempted) for future hits. The
    /// cache key covers the URL only; method and headers do not participate.
    pub async fn get<T: DeserializeOwned>(
        &self,
        uri: &str,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<T> {
        let key = CacheKey::for_url(uri);
        let preview = self.preview.is_enabled();

        if preview {
            if let Some(body) = self.cache.lookup(&key).await? {
                return Ok(serde_json::from_str(&body)?);
            }
        }

        debug!(%uri, "live GET");
        let response = self
            .http
            .get(uri)
            .headers(collect_headers(headers)?)
            .send()
            .await?;
        let body = response.text().await?;
        let body = body.trim();

        if preview {
            self.cache.store_detached(&key, body);
        }

        Ok(serde_json::from_str(body)?)
    }

    /// Performs a POST with `parameters` joined into a form body in the
    /// order given (see [`format_post_parameters`]); an absent mapping sends
    /// an empty body. The JSON response is deserialized as `T`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        uri: &str,
        headers: Option<&HashMap<String, String>>,
        parameters: Option<&[(String, String)]>,
    ) -> Result<T> {
        let content = parameters.map(|p| format_post_parameters(p));
        self.post_raw(uri, headers, content.as_deref()).await
    }

    /// Performs a POST with a raw `application/x-www-form-urlencoded` body
    /// (empty when absent) and deserializes the JSON response as `T`.
    ///
    /// POST responses are never cached or served from cache, in any mode.
    pub async fn post_raw<T: DeserializeOwned>(
        &self,
        uri: &str,
        headers: Option<&HashMap<String, String>>,
        content: Option<&str>,
    ) -> Result<T> {
        debug!(%uri, "live POST");
        let response = self
            .http
            .post(uri)
            .headers(collect_headers(headers)?)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(content.unwrap_or("").to_string())
            .send()
            .await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Joins form fields as `key1=value1&key2=value2` in the order given; an
/// empty slice yields `""`.
///
/// Values are not percent-encoded beyond the caller's own escaping. That
/// matches the wire behavior callers already depend on, so it stays.
pub fn format_post_parameters<K, V>(parameters: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    parameters
        .iter()
        .map(|(key, value)| format!("{}={}", key.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds the request header map from caller-supplied headers, appending
/// rather than overwriting. Names or values the transport cannot represent
/// fail with [`Error::InvalidHeader`] instead of being dropped.
fn collect_headers(headers: Option<&HashMap<String, String>>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    if let Some(headers) = headers {
        for (name, value) in headers {
            let parsed_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let parsed_value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            map.append(parsed_name, parsed_value);
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_parameters_join_in_given_order() {
        let params = [("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())];
        assert_eq!(format_post_parameters(&params), "a=1&b=2");
    }

    #[test]
    fn post_parameters_empty_mapping_is_empty_string() {
        let params: [(&str, &str); 0] = [];
        assert_eq!(format_post_parameters(&params), "");
    }

    #[test]
    fn post_parameters_single_field_has_no_separator() {
        assert_eq!(format_post_parameters(&[("token", "xyz")]), "token=xyz");
    }

    #[test]
    fn post_parameters_values_are_not_escaped() {
        assert_eq!(format_post_parameters(&[("q", "a b&c")]), "q=a b&c");
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let mut headers = HashMap::new();
        headers.insert("bad name".to_string(), "v".to_string());
        let err = collect_headers(Some(&headers)).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { ref name, .. } if name == "bad name"));
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        let mut headers = HashMap::new();
        headers.insert("x-token".to_string(), "line\nbreak".to_string());
        assert!(matches!(
            collect_headers(Some(&headers)),
            Err(Error::InvalidHeader { .. })
        ));
    }

    #[test]
    fn absent_headers_build_an_empty_map() {
        assert!(collect_headers(None).unwrap().is_empty());
    }
}
