//! MCP tools over the configured WordPress sites.
//!
//! Provides `SiteTools` that implements `ToolRegistry` by delegating
//! to the alias-keyed [`WpClient`] registry:
//!
//! - `wp_discover_endpoints` — enumerate a site's REST routes
//! - `wp_call_endpoint` — forward a request to an arbitrary endpoint
//!
//! Bad arguments (unknown site, missing fields, unsupported method)
//! surface as invalid-params errors; remote and transport failures
//! surface as internal errors. Neither touches the registry.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, ErrorData, Tool};
use serde::Deserialize;
use serde_json::{json, Value};
use wp_mcp_client::{Method, WpClient};

use crate::error::McpErrorExt;
use crate::registry::{ToolRegistry, ToolResult};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn json_schema(value: Value) -> Arc<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

fn make_tool(name: &str, description: &str, schema: Value) -> Tool {
    Tool::new(name.to_string(), description.to_string(), json_schema(schema))
}

fn serialize_response<T: serde::Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_method(method: Option<&str>) -> Result<Method, ErrorData> {
    let Some(method) = method else {
        return Ok(Method::GET);
    };
    match method.to_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "DELETE" => Ok(Method::DELETE),
        "PATCH" => Ok(Method::PATCH),
        other => Err(ErrorData::invalid_params(
            format!("Unsupported method: {other}"),
            None,
        )),
    }
}

fn lookup<'a>(
    clients: &'a HashMap<String, WpClient>,
    site: &str,
) -> Result<&'a WpClient, ErrorData> {
    clients
        .get(&site.to_lowercase())
        .ok_or_else(|| ErrorData::invalid_params(format!("Unknown site: {site}"), None))
}

// ---------------------------------------------------------------------------
// Argument types
// ---------------------------------------------------------------------------

/// Arguments for the wp_discover_endpoints tool.
#[derive(Debug, Deserialize)]
pub struct DiscoverEndpointsArgs {
    /// Site alias.
    pub site: String,
}

/// Arguments for the wp_call_endpoint tool.
#[derive(Debug, Deserialize)]
pub struct CallEndpointArgs {
    /// Site alias.
    pub site: String,
    /// Endpoint path, with or without the `/wp-json` prefix.
    pub endpoint: String,
    /// HTTP method (default GET).
    pub method: Option<String>,
    /// Parameters, sent as query string (GET) or request body.
    pub params: Option<serde_json::Map<String, Value>>,
}

// ---------------------------------------------------------------------------
// Tool descriptions
// ---------------------------------------------------------------------------

const DISCOVER_DESCRIPTION: &str = "The discovery operation maps all available REST API endpoints \
    on a WordPress site and returns their methods and namespaces. This allows you to understand \
    what operations are possible on a target WordPress site without having to manually specify \
    endpoints, which is important because different WordPress websites can have many different \
    and varying endpoints.";

const CALL_DESCRIPTION: &str = "The call operation executes specific REST API requests to the \
    target WordPress sites using provided parameters and authentication. It handles both read \
    and write operations. It determines which endpoint to use after the discovery operation is \
    conducted.";

// ---------------------------------------------------------------------------
// SiteTools
// ---------------------------------------------------------------------------

/// MCP tools over the configured site clients.
///
/// Generates two tools:
/// - `wp_discover_endpoints` — REST route discovery for one site
/// - `wp_call_endpoint` — generic request forwarding to one site
pub struct SiteTools {
    clients: Arc<HashMap<String, WpClient>>,
}

impl SiteTools {
    /// Create site tools over an alias-keyed client registry.
    pub fn new(clients: HashMap<String, WpClient>) -> Self {
        Self {
            clients: Arc::new(clients),
        }
    }

    /// Number of configured sites.
    pub fn site_count(&self) -> usize {
        self.clients.len()
    }
}

impl ToolRegistry for SiteTools {
    fn tools(&self) -> Vec<Tool> {
        vec![
            make_tool(
                "wp_discover_endpoints",
                DISCOVER_DESCRIPTION,
                json!({
                    "type": "object",
                    "properties": {
                        "site": {
                            "type": "string",
                            "description": "Site alias"
                        }
                    },
                    "required": ["site"]
                }),
            ),
            make_tool(
                "wp_call_endpoint",
                CALL_DESCRIPTION,
                json!({
                    "type": "object",
                    "properties": {
                        "site": {
                            "type": "string",
                            "description": "Site alias"
                        },
                        "endpoint": {
                            "type": "string",
                            "description": "API endpoint path"
                        },
                        "method": {
                            "type": "string",
                            "enum": ["GET", "POST", "PUT", "DELETE", "PATCH"],
                            "description": "HTTP method (default GET)"
                        },
                        "params": {
                            "type": "object",
                            "description": "Request parameters"
                        }
                    },
                    "required": ["site", "endpoint"]
                }),
            ),
        ]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let clients = Arc::clone(&self.clients);

        match name {
            "wp_discover_endpoints" => Some(Box::pin(async move {
                let args: DiscoverEndpointsArgs = serde_json::from_value(args)
                    .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;

                let client = lookup(&clients, &args.site)?;
                let endpoints = client
                    .discover_endpoints()
                    .await
                    .map_err(|e| e.to_mcp_error())?;

                serialize_response(&endpoints)
            })),

            "wp_call_endpoint" => Some(Box::pin(async move {
                let args: CallEndpointArgs = serde_json::from_value(args)
                    .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;

                let client = lookup(&clients, &args.site)?;
                let method = parse_method(args.method.as_deref())?;
                let body = client
                    .make_request(&args.endpoint, method, args.params.as_ref())
                    .await
                    .map_err(|e| e.to_mcp_error())?;

                serialize_response(&body)
            })),

            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wp_mcp_client::ClientOptions;
    use wp_mcp_core::SiteConfig;

    fn test_tools() -> SiteTools {
        let site = SiteConfig {
            alias: "site1".to_string(),
            url: "https://example.com".to_string(),
            username: "admin".to_string(),
            secret: "s3cret".to_string(),
        };
        let mut clients = HashMap::new();
        clients.insert(
            site.alias.clone(),
            WpClient::new(&site, &ClientOptions::default()).unwrap(),
        );
        SiteTools::new(clients)
    }

    #[test]
    fn test_tool_listing() {
        let tools = test_tools();
        let listed = tools.tools();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "wp_discover_endpoints");
        assert_eq!(listed[1].name, "wp_call_endpoint");
        assert!(listed.iter().all(|t| t.description.is_some()));
    }

    #[test]
    fn test_site_count() {
        assert_eq!(test_tools().site_count(), 1);
    }

    #[test]
    fn test_unknown_tool_returns_none() {
        assert!(test_tools().call("wp_unknown", json!({})).is_none());
    }

    #[tokio::test]
    async fn test_unknown_site_is_invalid_params() {
        let tools = test_tools();
        let err = tools
            .call("wp_discover_endpoints", json!({"site": "nope"}))
            .unwrap()
            .await
            .unwrap_err();

        assert!(err.message.contains("Unknown site: nope"));
    }

    #[tokio::test]
    async fn test_missing_site_argument_is_invalid_params() {
        let tools = test_tools();
        let err = tools
            .call("wp_discover_endpoints", json!({}))
            .unwrap()
            .await
            .unwrap_err();

        assert!(err.message.contains("site"));
    }

    #[tokio::test]
    async fn test_missing_endpoint_argument_is_invalid_params() {
        let tools = test_tools();
        let err = tools
            .call("wp_call_endpoint", json!({"site": "site1"}))
            .unwrap()
            .await
            .unwrap_err();

        assert!(err.message.contains("endpoint"));
    }

    #[tokio::test]
    async fn test_unsupported_method_is_invalid_params() {
        let tools = test_tools();
        let err = tools
            .call(
                "wp_call_endpoint",
                json!({"site": "site1", "endpoint": "/wp/v2/posts", "method": "BREW"}),
            )
            .unwrap()
            .await
            .unwrap_err();

        assert!(err.message.contains("Unsupported method: BREW"));
    }

    #[tokio::test]
    async fn test_site_lookup_is_case_insensitive() {
        // The bad method error proves lookup succeeded before dispatch.
        let tools = test_tools();
        let err = tools
            .call(
                "wp_call_endpoint",
                json!({"site": "SITE1", "endpoint": "/", "method": "BREW"}),
            )
            .unwrap()
            .await
            .unwrap_err();

        assert!(err.message.contains("Unsupported method"));
        assert!(!err.message.contains("Unknown site"));
    }

    #[test]
    fn test_parse_method_defaults_to_get() {
        assert_eq!(parse_method(None).unwrap(), Method::GET);
        assert_eq!(parse_method(Some("patch")).unwrap(), Method::PATCH);
        assert!(parse_method(Some("TRACE")).is_err());
    }
}
