use crate::storage::StorageScope;
use thiserror::Error;

/// Unified error type for the resteasy crate.
///
/// Low-level transport, serialization, and I/O errors are aggregated into one
/// enum so callers match on a single type. Not-found conditions on storage
/// lookups are normal outcomes and never surface here, with one exception:
/// the untyped [`StorageHelper::read_file`] raises [`Error::FileNotFound`]
/// when the target is absent.
///
/// [`StorageHelper::read_file`]: crate::storage::StorageHelper::read_file
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport failure, propagated unmodified from the HTTP layer.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Malformed JSON or a type mismatch while deserializing. Always fatal
    /// to the caller; never retried or defaulted.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised only by the untyped file read; every other lookup treats an
    /// absent file as a normal miss.
    #[error("file not found: {key:?} in {scope} scope")]
    FileNotFound { key: String, scope: StorageScope },

    /// A caller-supplied header name or value the transport cannot represent.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// True for the not-found condition raised by the untyped file read.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FileNotFound { .. })
    }
}
