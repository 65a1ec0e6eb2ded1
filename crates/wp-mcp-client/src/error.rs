//! Error types for wp-mcp-client

use thiserror::Error;

/// Result type alias for wp-mcp-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wp-mcp-client
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Transport or HTTP-status failure from the remote site.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials could not be encoded into an Authorization header.
    #[error("Invalid authorization header: {0}")]
    InvalidAuthHeader(#[from] reqwest::header::InvalidHeaderValue),
}
