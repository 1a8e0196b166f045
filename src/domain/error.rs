//! Error types for the BookMate plugin.
//!
//! [`BookmateError`] is the crate-wide error and [`Result`] its alias.
//! Catalog failures get their own [`CatalogError`] because the controller
//! handles them softly: they end up as a failed search status, never as a
//! propagated error.

use thiserror::Error;

/// The main error type for BookMate plugin operations.
///
/// # Examples
///
/// ```
/// use bookmate::domain::BookmateError;
///
/// fn read_storage() -> Result<(), BookmateError> {
///     Err(BookmateError::Storage("Failed to read file".to_string()))
/// }
/// assert!(read_storage().is_err());
/// ```
#[derive(Debug, Error)]
pub enum BookmateError {
    /// Reading from or writing to the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A palette file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// Failures at the catalog boundary.
///
/// Every variant is recoverable: the controller logs it, keeps the results
/// already on screen and marks the search as failed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("catalog responded with HTTP {0}")]
    Status(u16),

    /// The response body is not UTF-8 text.
    #[error("response body is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The response body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document has no usable results array.
    #[error("response has no `{0}` array")]
    MissingResults(&'static str),

    /// The configured endpoint is not a valid URL.
    #[error("invalid catalog endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// A specialized `Result` type for BookMate operations.
pub type Result<T> = std::result::Result<T, BookmateError>;
