//! Per-site WordPress REST API client.
//!
//! One [`WpClient`] is built per configured site and held for the
//! process lifetime. Every call is stateless aside from the fixed
//! configuration captured at construction, and the underlying
//! `reqwest::Client` is safe for concurrent use, so handles need no
//! client-side serialization.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use wp_mcp_core::SiteConfig;

use crate::auth::basic_auth_value;
use crate::error::Result;

/// Namespace root the WP REST API mounts under.
const REST_ROOT: &str = "/wp-json";

/// Namespace reported for routes that do not declare one.
const DEFAULT_NAMESPACE: &str = "wp/v2";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Process-wide options applied to every site client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Skip TLS certificate validation on this site's connections.
    pub allow_insecure_tls: bool,
    /// Per-request timeout; a hung remote site fails the invocation
    /// instead of blocking it forever.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            allow_insecure_tls: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// One route group discovered from a site's REST index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInfo {
    /// HTTP methods the route accepts.
    pub methods: Vec<String>,
    /// REST namespace the route belongs to.
    pub namespace: String,
    /// The route's own path, as a single-element list.
    pub endpoints: Vec<String>,
}

/// Stateless-per-call client bound to one site's base URL and credentials.
pub struct WpClient {
    client: reqwest::Client,
    base_url: String,
}

impl WpClient {
    /// Build a persistent client for one resolved site.
    ///
    /// The client sends and requests JSON by default and, when the
    /// site has a secret configured, carries a Basic-Auth
    /// `Authorization` header on every request.
    pub fn new(site: &SiteConfig, options: &ClientOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if !site.secret.is_empty() {
            let mut auth = HeaderValue::from_str(&basic_auth_value(&site.username, &site.secret))?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(options.timeout);

        if options.allow_insecure_tls {
            warn!(
                site = %site.alias,
                "TLS certificate validation disabled; connections to this site are not authenticated"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: format!("{}{REST_ROOT}", site.url),
        })
    }

    /// The `/wp-json` root this client is bound to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Enumerate the routes the site exposes.
    ///
    /// Reads the REST index at the client root and maps each route to
    /// an [`EndpointInfo`], preserving the order the site returned. A
    /// response without a `routes` object yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and non-success HTTP statuses.
    pub async fn discover_endpoints(&self) -> Result<Vec<EndpointInfo>> {
        debug!(url = %self.base_url, "discovering endpoints");
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?;
        let body: Value = response.json().await?;
        Ok(parse_discovery(&body))
    }

    /// Forward a request to an arbitrary endpoint on the site.
    ///
    /// `endpoint` may be given with or without the `/wp-json` prefix
    /// and with or without a leading slash. For `GET`, `params` become
    /// the query string; for any other method they are sent as a JSON
    /// body. The decoded response body is returned as an opaque value,
    /// uninterpreted.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and non-success HTTP statuses.
    pub async fn make_request(
        &self,
        endpoint: &str,
        method: Method,
        params: Option<&Map<String, Value>>,
    ) -> Result<Value> {
        let request = self.build_request(endpoint, method, params)?;
        debug!(method = %request.method(), url = %request.url(), "forwarding request");
        let response = self.client.execute(request).await?.error_for_status()?;
        decode_body(response).await
    }

    /// Build the outgoing request without sending it.
    pub fn build_request(
        &self,
        endpoint: &str,
        method: Method,
        params: Option<&Map<String, Value>>,
    ) -> Result<reqwest::Request> {
        let path = normalize_endpoint(endpoint);
        let url = format!("{}{path}", self.base_url);
        let mut builder = self.client.request(method.clone(), &url);

        if let Some(params) = params {
            if method == Method::GET {
                builder = builder.query(&query_pairs(params));
            } else {
                builder = builder.json(params);
            }
        }

        Ok(builder.build()?)
    }
}

/// Strip an optional leading `/wp-json` and ensure one leading slash,
/// producing the path relative to the client's base.
fn normalize_endpoint(endpoint: &str) -> String {
    let stripped = endpoint.strip_prefix(REST_ROOT).unwrap_or(endpoint);
    if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{stripped}")
    }
}

/// Render parameter values for a query string. Strings go through
/// unquoted; everything else keeps its JSON rendering.
fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

fn parse_discovery(body: &Value) -> Vec<EndpointInfo> {
    let Some(routes) = body.get("routes").and_then(Value::as_object) else {
        return Vec::new();
    };

    routes
        .iter()
        .map(|(path, route)| EndpointInfo {
            methods: route
                .get("methods")
                .and_then(Value::as_array)
                .map(|methods| {
                    methods
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            namespace: route
                .get("namespace")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_NAMESPACE)
                .to_string(),
            endpoints: vec![path.clone()],
        })
        .collect()
}

/// Decode a response body without interpreting it: empty bodies become
/// null, non-JSON bodies are passed through as a string.
async fn decode_body(response: reqwest::Response) -> Result<Value> {
    let text = response.text().await?;
    if text.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

// ============================================================================
// Tests
// ============================================================================
