//! Site configuration resolution.
//!
//! Configuration comes from one of two mutually exclusive sources,
//! resolved once at startup into a canonical alias-keyed registry:
//!
//! 1. **Environment variables** — `WP_NAME`, `WP_URL_OVERRIDE`,
//!    `WP_USER_OVERRIDE`, and `WP_PASS_OVERRIDE` each hold a
//!    semicolon-delimited list of values (`\;` escapes a literal
//!    semicolon). The four lists must have the same length; entry `i`
//!    of each list describes site `i`.
//! 2. **JSON file** — used only when no environment list is set.
//!    `WP_SITES_PATH` points at a UTF-8 JSON object:
//!
//!    ```json
//!    {
//!        "mysite": {
//!            "URL": "https://example.com",
//!            "USER": "admin",
//!            "PASS": "application password"
//!        }
//!    }
//!    ```
//!
//!    The uppercase `URL`/`USER`/`PASS` key names are an external file
//!    format contract and are matched case-sensitively.
//!
//! Aliases are matched case-insensitively (stored lower-cased); URL,
//! username, and password case is preserved verbatim.
//!
//! # Usage
//!
//! ```no_run
//! use wp_mcp_core::config::{resolve, EnvSource};
//!
//! let config = resolve(&EnvSource::capture())?;
//! for site in config.sites.values() {
//!     println!("{} -> {}", site.alias, site.url);
//! }
//! # Ok::<(), wp_mcp_core::Error>(())
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// Environment variable holding the semicolon-delimited site aliases.
pub const ENV_NAMES: &str = "WP_NAME";
/// Environment variable holding the semicolon-delimited base URLs.
pub const ENV_URLS: &str = "WP_URL_OVERRIDE";
/// Environment variable holding the semicolon-delimited usernames.
pub const ENV_USERS: &str = "WP_USER_OVERRIDE";
/// Environment variable holding the semicolon-delimited passwords.
pub const ENV_PASSWORDS: &str = "WP_PASS_OVERRIDE";
/// Environment variable pointing at the JSON site config file.
pub const ENV_SITES_PATH: &str = "WP_SITES_PATH";
/// Environment variable disabling TLS certificate validation when `"true"`.
pub const ENV_ALLOW_INSECURE_TLS: &str = "WP_ALLOW_INSECURE_TLS";

/// Stand-in for escaped semicolons while splitting. NUL cannot appear
/// in environment variable values, so it never collides with input.
const ESCAPE_PLACEHOLDER: &str = "\u{0}";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One configured WordPress site.
///
/// Invariant: `url`, `username`, and `secret` are non-empty, trimmed,
/// and `url` carries no trailing slash. Entries that fail this are
/// dropped (file source) or rejected wholesale (environment source,
/// via the count-mismatch rule).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Lower-cased site alias, the external identifier for this site.
    pub alias: String,
    /// Base URL with the trailing slash stripped.
    pub url: String,
    /// Credential identifier.
    pub username: String,
    /// Credential value (password or application token).
    pub secret: String,
}

/// Snapshot of the configuration environment variables.
///
/// Captured once at startup; resolution is a pure function of this
/// snapshot (plus the file system for the file source), so tests can
/// construct one directly instead of mutating the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    /// Raw `WP_NAME` value, if set.
    pub names: Option<String>,
    /// Raw `WP_URL_OVERRIDE` value, if set.
    pub urls: Option<String>,
    /// Raw `WP_USER_OVERRIDE` value, if set.
    pub users: Option<String>,
    /// Raw `WP_PASS_OVERRIDE` value, if set.
    pub passwords: Option<String>,
    /// Raw `WP_SITES_PATH` value, if set.
    pub sites_path: Option<String>,
    /// Raw `WP_ALLOW_INSECURE_TLS` value, if set.
    pub allow_insecure_tls: Option<String>,
}

impl EnvSource {
    /// Read the configuration variables from the process environment.
    pub fn capture() -> Self {
        Self {
            names: std::env::var(ENV_NAMES).ok(),
            urls: std::env::var(ENV_URLS).ok(),
            users: std::env::var(ENV_USERS).ok(),
            passwords: std::env::var(ENV_PASSWORDS).ok(),
            sites_path: std::env::var(ENV_SITES_PATH).ok(),
            allow_insecure_tls: std::env::var(ENV_ALLOW_INSECURE_TLS).ok(),
        }
    }
}

/// The resolved site registry plus process-wide client settings.
///
/// Built exactly once at startup and read-only afterward; picking up
/// configuration changes requires a restart.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// Alias-keyed site registry.
    pub sites: HashMap<String, SiteConfig>,
    /// Skip TLS certificate validation on every site connection.
    pub allow_insecure_tls: bool,
    /// Diagnostics for file entries that were dropped during parsing.
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Delimited-list codec
// ---------------------------------------------------------------------------

/// Split a semicolon-delimited value list.
///
/// `\;` escapes a literal semicolon inside a value. Each piece is
/// trimmed, and pieces left empty by the split are discarded.
pub fn split_delimited(raw: &str) -> Vec<String> {
    raw.replace("\\;", ESCAPE_PLACEHOLDER)
        .split(';')
        .map(|piece| piece.replace(ESCAPE_PLACEHOLDER, ";").trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Join values back into a semicolon-delimited list, escaping any
/// literal semicolons. Inverse of [`split_delimited`] for values that
/// are non-empty and carry no surrounding whitespace.
pub fn join_delimited<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().replace(';', "\\;"))
        .collect::<Vec<_>>()
        .join(";")
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve the site registry from the captured environment.
///
/// The environment source takes priority: when any of the four value
/// lists is non-empty the file source is ignored entirely, and the
/// lists must agree on length. Only when all four lists are empty is
/// `WP_SITES_PATH` consulted.
///
/// # Errors
///
/// Returns a fatal [`Error`] on mismatched list counts, a missing
/// `WP_SITES_PATH` when the file source is needed, a missing config
/// file, or an unreadable/malformed config file.
pub fn resolve(env: &EnvSource) -> Result<ResolvedConfig> {
    let allow_insecure_tls = env.allow_insecure_tls.as_deref() == Some("true");

    let names = split_delimited(env.names.as_deref().unwrap_or(""));
    let urls = split_delimited(env.urls.as_deref().unwrap_or(""));
    let users = split_delimited(env.users.as_deref().unwrap_or(""));
    let passwords = split_delimited(env.passwords.as_deref().unwrap_or(""));

    let total = names.len() + urls.len() + users.len() + passwords.len();
    if total == 0 {
        // Environment source inactive; fall through to the file source.
        return resolve_file(env, allow_insecure_tls);
    }

    if names.len() != urls.len() || names.len() != users.len() || names.len() != passwords.len() {
        return Err(Error::MismatchedEnvCounts {
            names: names.len(),
            urls: urls.len(),
            users: users.len(),
            passwords: passwords.len(),
        });
    }

    let mut sites = HashMap::new();
    for i in 0..names.len() {
        let site = SiteConfig {
            alias: names[i].to_lowercase(),
            url: strip_trailing_slash(&urls[i]),
            username: users[i].clone(),
            secret: passwords[i].clone(),
        };
        // Duplicate aliases: last write wins, in list order.
        sites.insert(site.alias.clone(), site);
    }

    Ok(ResolvedConfig {
        sites,
        allow_insecure_tls,
        warnings: Vec::new(),
    })
}

/// Raw shape of one file entry. The uppercase keys are the external
/// file format contract; missing fields default to empty and fail the
/// per-entry validation below.
#[derive(Debug, Deserialize)]
struct RawSiteEntry {
    #[serde(rename = "URL", default)]
    url: String,
    #[serde(rename = "USER", default)]
    user: String,
    #[serde(rename = "PASS", default)]
    pass: String,
}

fn resolve_file(env: &EnvSource, allow_insecure_tls: bool) -> Result<ResolvedConfig> {
    let path = env
        .sites_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or(Error::MissingConfigPath)?;

    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::ConfigFileNotFound(path.to_string()));
        }
        Err(e) => return Err(Error::ConfigLoad(e.to_string())),
    };

    let entries: serde_json::Map<String, Value> =
        serde_json::from_str(&data).map_err(|e| Error::ConfigLoad(e.to_string()))?;

    let mut sites = HashMap::new();
    let mut warnings = Vec::new();
    for (alias, value) in entries {
        let entry = serde_json::from_value::<RawSiteEntry>(value).ok().filter(|e| {
            !e.url.trim().is_empty() && !e.user.trim().is_empty() && !e.pass.trim().is_empty()
        });
        let Some(entry) = entry else {
            // One bad site must not block the others.
            let message = format!("Invalid configuration for site {alias}: missing required fields");
            warn!("{message}");
            warnings.push(message);
            continue;
        };

        let site = SiteConfig {
            alias: alias.trim().to_lowercase(),
            url: strip_trailing_slash(entry.url.trim()),
            username: entry.user.trim().to_string(),
            secret: entry.pass.trim().to_string(),
        };
        sites.insert(site.alias.clone(), site);
    }

    Ok(ResolvedConfig {
        sites,
        allow_insecure_tls,
        warnings,
    })
}

fn strip_trailing_slash(url: &str) -> String {
    let url = url.trim();
    url.strip_suffix('/').unwrap_or(url).to_string()
}

// ============================================================================
// Tests
// ============================================================================
