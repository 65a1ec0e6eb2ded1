//! Client tests against a loopback HTTP server.
//!
//! Stands up a small axum app on an ephemeral port and drives the
//! client through discovery and request forwarding end to end.

use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use wp_mcp_client::{ClientOptions, Method, WpClient};
use wp_mcp_core::SiteConfig;

async fn discovery_index() -> Json<Value> {
    Json(json!({
        "name": "Loopback Test Site",
        "routes": {
            "/": {"methods": ["GET"], "namespace": "wp/v2"},
            "/wp/v2/posts": {"methods": ["GET", "POST"]},
            "/custom/v1/widgets": {"methods": ["GET"], "namespace": "custom/v1"}
        }
    }))
}

async fn echo_query(uri: Uri) -> Json<Value> {
    Json(json!({"query": uri.query()}))
}

async fn echo_body(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"received": body}))
}

async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base: &str) -> WpClient {
    let site = SiteConfig {
        alias: "loopback".to_string(),
        url: base.to_string(),
        username: "admin".to_string(),
        secret: "abcd efgh".to_string(),
    };
    WpClient::new(&site, &ClientOptions::default()).unwrap()
}

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn discovers_routes_from_rest_index() {
    let app = Router::new().route("/wp-json", get(discovery_index));
    let base = spawn_app(app).await;

    let endpoints = client_for(&base).discover_endpoints().await.unwrap();

    assert_eq!(endpoints.len(), 3);
    assert_eq!(endpoints[0].endpoints, vec!["/"]);
    assert_eq!(endpoints[1].methods, vec!["GET", "POST"]);
    // Route without a namespace falls back to the default.
    assert_eq!(endpoints[1].namespace, "wp/v2");
    assert_eq!(endpoints[2].namespace, "custom/v1");
}

#[tokio::test]
async fn discovery_without_routes_is_empty() {
    let app = Router::new().route("/wp-json", get(|| async { Json(json!({"name": "bare"})) }));
    let base = spawn_app(app).await;

    let endpoints = client_for(&base).discover_endpoints().await.unwrap();
    assert!(endpoints.is_empty());
}

#[tokio::test]
async fn get_request_sends_params_as_query() {
    let app = Router::new().route("/wp-json/wp/v2/posts", get(echo_query));
    let base = spawn_app(app).await;

    let body = client_for(&base)
        .make_request(
            "/wp-json/wp/v2/posts",
            Method::GET,
            Some(&params(json!({"per_page": 3}))),
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"query": "per_page=3"}));
}

#[tokio::test]
async fn post_request_sends_params_as_body() {
    let app = Router::new().route("/wp-json/wp/v2/posts", post(echo_body));
    let base = spawn_app(app).await;

    let body = client_for(&base)
        .make_request(
            "wp/v2/posts",
            Method::POST,
            Some(&params(json!({"title": "Hello"}))),
        )
        .await
        .unwrap();

    assert_eq!(body, json!({"received": {"title": "Hello"}}));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let app = Router::new().route(
        "/wp-json/wp/v2/posts",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_app(app).await;

    let result = client_for(&base)
        .make_request("/wp/v2/posts", Method::GET, None)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn connection_failure_is_an_error() {
    // Bind then drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let result = client_for(&base).discover_endpoints().await;
    assert!(result.is_err());
}
