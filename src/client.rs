//! REST client: typed GET/POST with preview-mode caching.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;

pub use builder::RestClientBuilder;
pub use core::{format_post_parameters, RestClient};
