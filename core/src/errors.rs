//! Error types for the remotewalk core crate.
//!
//! [`ListingError`] is the only error a walk can produce. Every lister maps
//! its own failures (HTTP status, I/O errors, malformed payloads) into it so
//! the walker can propagate failures without knowing where they came from.

use thiserror::Error;

/// Top-level error type encompassing all core error categories.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A directory listing or endpoint lookup failed.
    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),

    /// A configuration error (invalid values, missing fields, parse failures).
    #[error("Config error: {0}")]
    Config(String),

    /// A low-level I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while listing a remote directory.
#[derive(Error, Debug)]
pub enum ListingError {
    /// The requested directory does not exist.
    #[error("Path not found: {0}")]
    NotFound(String),

    /// Permission was denied for the requested directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The access token was rejected or has expired.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No endpoint matched the search term.
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    /// The remote service answered with a non-success status.
    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A low-level I/O error during listing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
