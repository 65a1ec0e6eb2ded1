//! # wp-mcp-client
//!
//! WordPress REST API client for wp-mcp.
//!
//! This crate provides the per-site client used by the MCP server:
//! - Persistent HTTP client bound to one site's `/wp-json` root
//! - HTTP Basic auth encoding for application passwords
//! - REST endpoint discovery
//! - Generic request forwarding with query/body parameter shaping

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod error;

pub use client::{ClientOptions, EndpointInfo, WpClient};
pub use error::{Error, Result};

// Re-export the method type callers pass to `make_request`
pub use reqwest::Method;
