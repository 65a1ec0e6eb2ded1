//! Generic MCP server over a tool registry.
//!
//! `WpMcpServer` implements the rmcp `ServerHandler` by delegating
//! tool listing and dispatch to the [`ToolRegistry`] it holds, and
//! serves the protocol over stdio. Server metadata for the MCP
//! handshake lives in [`ServerConfig`].

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorCode, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::transport::stdio;
use rmcp::{ServerHandler, ServiceExt};
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::registry::ToolRegistry;

/// Server metadata advertised during the MCP handshake.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name reported to clients.
    pub name: String,
    /// Server version reported to clients.
    pub version: String,
    /// Optional usage instructions for clients.
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "server-wp-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }
}

/// MCP server delegating to a [`ToolRegistry`].
pub struct WpMcpServer {
    registry: Arc<dyn ToolRegistry>,
    config: ServerConfig,
}

impl WpMcpServer {
    /// Create a server over the given registry with default metadata.
    pub fn new<R: ToolRegistry + 'static>(registry: R) -> Self {
        Self {
            registry: Arc::new(registry),
            config: ServerConfig::default(),
        }
    }

    /// Set the advertised server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the advertised server version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Set the usage instructions sent to clients.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.instructions = Some(instructions.into());
        self
    }

    /// Number of tools the server will list.
    pub fn tool_count(&self) -> usize {
        self.registry.tool_count()
    }

    /// Serve the MCP protocol over stdin/stdout until the client
    /// disconnects. Diagnostics must go to stderr while this runs.
    pub async fn serve_stdio(self) -> Result<()> {
        info!(
            server = %self.config.name,
            tools = self.registry.tool_count(),
            "serving MCP over stdio"
        );
        let service = self
            .serve(stdio())
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        service
            .waiting()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(())
    }
}

impl ServerHandler for WpMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::new(ServerCapabilities::builder().enable_tools().build());
        info.server_info =
            Implementation::new(self.config.name.clone(), self.config.version.clone());
        info.instructions = self.config.instructions.clone();
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.registry.tools(),
            ..ListToolsResult::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let args = request
            .arguments
            .map(Value::Object)
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        match self.registry.call(&request.name, args) {
            Some(handler) => handler.await,
            None => Err(ErrorData::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("Unknown tool: {}", request.name),
                None,
            )),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Tool;

    struct EmptyRegistry;

    impl ToolRegistry for EmptyRegistry {
        fn tools(&self) -> Vec<Tool> {
            Vec::new()
        }

        fn call(&self, _name: &str, _args: Value) -> Option<crate::registry::ToolResult> {
            None
        }
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.name, "server-wp-mcp");
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert!(config.instructions.is_none());
    }

    #[test]
    fn test_builder_overrides_metadata() {
        let server = WpMcpServer::new(EmptyRegistry)
            .with_name("custom")
            .with_version("9.9.9")
            .with_instructions("Use the tools");

        assert_eq!(server.config.name, "custom");
        assert_eq!(server.config.version, "9.9.9");
        assert_eq!(server.config.instructions.as_deref(), Some("Use the tools"));
    }

    #[test]
    fn test_get_info_advertises_tools_capability() {
        let server = WpMcpServer::new(EmptyRegistry).with_name("wp-test");
        let info = server.get_info();

        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "wp-test");
    }

    #[test]
    fn test_tool_count_delegates_to_registry() {
        let server = WpMcpServer::new(EmptyRegistry);
        assert_eq!(server.tool_count(), 0);
    }
}
