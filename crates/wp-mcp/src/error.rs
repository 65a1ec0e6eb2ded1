//! Error types for wp-mcp

use rmcp::model::ErrorData;
use thiserror::Error;

/// Result type alias for wp-mcp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wp-mcp
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Configuration resolution failed.
    #[error("Config error: {0}")]
    Config(#[from] wp_mcp_core::Error),

    /// Site client error.
    #[error("Client error: {0}")]
    Client(#[from] wp_mcp_client::Error),

    /// The MCP transport failed to start or shut down cleanly.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Convert client-side failures into MCP protocol errors.
///
/// Remote and transport failures are internal errors from the
/// protocol's point of view, distinct from the invalid-params errors
/// raised for bad tool arguments.
pub trait McpErrorExt {
    /// Convert into [`ErrorData`], preserving the message.
    fn to_mcp_error(&self) -> ErrorData;
}

impl McpErrorExt for wp_mcp_client::Error {
    fn to_mcp_error(&self) -> ErrorData {
        ErrorData::internal_error(self.to_string(), None)
    }
}
