//! MCP tools served by wp-mcp.
//!
//! The site tools forward work to the per-site WordPress clients; the
//! health tool reports server status.

pub mod health;
pub mod sites;

pub use health::{HealthResponse, HealthTools};
pub use sites::{CallEndpointArgs, DiscoverEndpointsArgs, SiteTools};
