//! Utility functions and helpers.

pub mod http;
pub mod url;

pub use http::{JsonFetcher, create_async_client};
