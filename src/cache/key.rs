//! Cache key generation.

use sha2::{Digest, Sha256};

/// Cache key for a GET response: the hex-encoded Sha256 of the request URL,
/// used as the cache file name in the Local scope.
///
/// The key covers the URL only. Two requests to the same URL with different
/// methods or headers map to the same key; this is a documented limitation
/// kept for on-disk cache compatibility, not something to fix silently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_url(url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let hash: String = hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect();
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_url_same_key() {
        assert_eq!(
            CacheKey::for_url("https://example.com/api?q=1"),
            CacheKey::for_url("https://example.com/api?q=1")
        );
    }

    #[test]
    fn distinct_urls_distinct_keys() {
        let a = CacheKey::for_url("https://example.com/api?q=1");
        let b = CacheKey::for_url("https://example.com/api?q=2");
        assert_ne!(a, b);
    }

    #[test]
    fn key_is_lowercase_hex_sha256() {
        let key = CacheKey::for_url("https://example.com/");
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
