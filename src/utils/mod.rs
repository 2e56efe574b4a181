//! Utility modules for web, DOM, and storage operations.
//!
//! Provides:
//! - [`FetchTransport`], [`race_with_timeout`] - Network fetching with timeout
//! - [`storage`] - localStorage and in-memory key-value stores
//! - [`with_query`], [`validate_link_url`] - URL building and link validation
//! - [`log`] - Console logging

pub mod clock;
pub mod dom;
mod fetch;
pub mod log;
pub mod storage;
mod url;

pub use fetch::{FetchTransport, RaceResult, race_with_timeout};
pub use url::{UrlValidation, validate_link_url, with_query};
