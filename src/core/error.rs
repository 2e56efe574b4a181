//! Custom error types for the application.
//!
//! Each enum's `Display` text is the message shown to the user:
//!
//! - [`ApiError`] - HTTP client failures (timeout, upstream status, decoding, transport)
//! - [`ActionError`] - Search/suggestion dispatch failures
//! - [`ResolveError`] - Detail view lookups that come up empty
//! - [`CacheError`] - localStorage failures, swallowed inside the cache store

use thiserror::Error;

use crate::config::messages;

/// Errors from the recipe HTTP client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No credential configured; nothing was sent.
    #[error("{}", messages::MISSING_API_KEY)]
    MissingApiKey,
    /// The deadline elapsed before the response arrived.
    #[error("{}", messages::TIMEOUT)]
    Timeout,
    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Upstream { status: u16, message: String },
    /// Body was not the JSON we expected. The detail is for logs only.
    #[error("The recipe service sent a response we couldn't read.")]
    Decode(String),
    /// DNS, connection refused, CORS and friends.
    #[error("{0}")]
    Network(String),
}

/// Errors from controller actions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// Both query fields were blank.
    #[error("{}", messages::EMPTY_QUERY)]
    Validation,
    /// The same action is already in flight.
    #[error("{}", messages::BUSY)]
    Busy,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors resolving a recipe for the detail view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// No id in the URL.
    #[error("{}", messages::NO_RECIPE_SELECTED)]
    MissingId,
    /// The id is in none of the cached stores.
    #[error("{}", messages::RECIPE_NOT_CACHED)]
    NotFound(String),
}

/// Cache store failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CacheError {
    /// localStorage not available.
    #[error("localStorage not available")]
    StorageUnavailable,
    /// Stored value is not valid JSON for the expected shape.
    #[error("malformed cache entry: {0}")]
    Malformed(String),
    /// Failed to serialize data to JSON.
    #[error("failed to serialize cache entry")]
    SerializationFailed,
    /// Failed to write to storage.
    #[error("failed to write to localStorage")]
    WriteFailed,
}
