//! Error types for wp-mcp-core

use thiserror::Error;

/// Result type alias for wp-mcp-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving site configuration.
///
/// Every variant is fatal: the server must not start serving with an
/// invalid or absent configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The four environment value lists disagree on length.
    #[error(
        "All environment variables must have matching number of values \
         (WP_NAME: {names}, WP_URL_OVERRIDE: {urls}, \
         WP_USER_OVERRIDE: {users}, WP_PASS_OVERRIDE: {passwords})"
    )]
    MismatchedEnvCounts {
        /// Observed count of site aliases.
        names: usize,
        /// Observed count of URL overrides.
        urls: usize,
        /// Observed count of username overrides.
        users: usize,
        /// Observed count of password overrides.
        passwords: usize,
    },

    /// No environment lists were set and no config file path was given.
    #[error(
        "WP_SITES_PATH environment variable is required \
         when no site environment variables are set"
    )]
    MissingConfigPath,

    /// The configured file does not exist.
    #[error("Config file not found at: {0}")]
    ConfigFileNotFound(String),

    /// The config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoad(String),
}
