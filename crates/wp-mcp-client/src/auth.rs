//! HTTP Basic authentication encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Build an `Authorization` header value from site credentials.
///
/// Whitespace inside the secret is removed before encoding: WordPress
/// displays application passwords in space-separated groups, and the
/// spaces survive copy-paste. The username is used verbatim.
///
/// ```
/// use wp_mcp_client::auth::basic_auth_value;
///
/// assert_eq!(basic_auth_value("user", "pass"), "Basic dXNlcjpwYXNz");
/// ```
pub fn basic_auth_value(username: &str, secret: &str) -> String {
    let compact: String = secret.chars().filter(|c| !c.is_whitespace()).collect();
    format!("Basic {}", STANDARD.encode(format!("{username}:{compact}")))
}

// ============================================================================
// Tests
// ============================================================================
