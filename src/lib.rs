//! # resteasy
//!
//! A minimal REST client helper: typed GET/POST over HTTP with JSON
//! deserialization, plus transparent file-backed caching of GET responses
//! while running in a design-time preview mode, so design-time rendering
//! needs no live network. A companion storage helper provides generic
//! key/value settings and file read/write primitives over three storage
//! scopes (Local, Roaming, Temporary).
//!
//! ## Overview
//!
//! The request flow is a linear sequence: compute a cache key from the URL,
//! consult the preview cache, fetch live on a miss, deserialize, and (in
//! preview mode) persist the raw body for future hits. POST responses never
//! touch the cache. There are no retries, no connection-pool tuning, no
//! streaming, and no cache expiry.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resteasy::{RestClient, StorageHelper, StorageRoots};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Forecast {
//!     temperature: f64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> resteasy::Result<()> {
//!     let storage = StorageHelper::new(StorageRoots::under("/var/lib/myapp"));
//!     let client = RestClient::builder()
//!         .storage(storage)
//!         .preview_mode(false)
//!         .build()?;
//!
//!     let forecast: Forecast = client
//!         .get("https://api.example.com/forecast", None)
//!         .await?;
//!     println!("{}", forecast.temperature);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`RestClient`] and its builder: typed GET/POST, header merge, form bodies |
//! | [`cache`] | Cache keys (Sha256 of the URL) and the preview-cache read/write helper |
//! | [`storage`] | Scoped key/value settings and file primitives ([`StorageHelper`]) |
//! | [`error`] | Unified [`Error`] type aggregating transport, serialization, and storage failures |
//!
//! ## Preview mode
//!
//! Preview mode is injected at construction — a fixed boolean or a probe
//! closure evaluated per call — rather than read from process-wide state.
//! While enabled, a GET whose URL hashes to an existing cache file is served
//! from disk without touching the network, and live GET bodies are persisted
//! (fire-and-forget) for future hits.

pub mod cache;
pub mod client;
pub mod error;
pub mod storage;

pub use cache::CacheKey;
pub use client::{format_post_parameters, RestClient, RestClientBuilder};
pub use error::Error;
pub use storage::{SettingsScope, StorageHelper, StorageRoots, StorageScope};

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
