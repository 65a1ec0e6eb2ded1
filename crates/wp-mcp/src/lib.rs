//! MCP server infrastructure for wp-mcp.
//!
//! This crate wires the resolved site registry into a Model Context
//! Protocol server speaking over stdio.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        wp-mcp                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ToolRegistry trait — tool registration and dispatch        │
//! │  CompositeRegistry — combine multiple tool sources          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  WpMcpServer — generic server (implements ServerHandler)    │
//! │  ServerConfig — server metadata (name, version, description)│
//! ├─────────────────────────────────────────────────────────────┤
//! │  McpErrorExt — wp_mcp_client::Error → rmcp::ErrorData       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Tools:                                                     │
//! │  ├── sites — wp_discover_endpoints, wp_call_endpoint        │
//! │  └── health — server status, tool and site counts           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use wp_mcp::{CompositeRegistry, SiteTools, WpMcpServer};
//!
//! let site_tools = SiteTools::new(clients);
//! let registry = CompositeRegistry::new().add(site_tools);
//!
//! WpMcpServer::new(registry)
//!     .with_name("server-wp-mcp")
//!     .serve_stdio()
//!     .await?;
//! ```

pub mod error;
pub mod registry;
pub mod server;
pub mod tools;

// Re-exports — registry
pub use registry::{CompositeRegistry, ToolRegistry, ToolResult};

// Re-exports — server
pub use server::{ServerConfig, WpMcpServer};

// Re-exports — error
pub use error::{Error, McpErrorExt, Result};

// Re-exports — tools
pub use tools::{HealthResponse, HealthTools, SiteTools};
