#![forbid(unsafe_code)]

//! WordPress MCP server binary.
//!
//! Resolves the site configuration once, builds one client per site,
//! and serves the MCP protocol over stdio.

use std::collections::HashMap;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use wp_mcp::{CompositeRegistry, HealthTools, SiteTools, ToolRegistry, WpMcpServer};
use wp_mcp_client::{ClientOptions, WpClient};
use wp_mcp_core::{resolve, EnvSource};

const SERVER_NAME: &str = "server-wp-mcp";

/// Multi-site WordPress MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // stdout carries the MCP transport; all diagnostics go to stderr.
    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        error!("Server failed to start: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = resolve(&EnvSource::capture())?;
    for warning in &config.warnings {
        warn!("{warning}");
    }

    let options = ClientOptions {
        allow_insecure_tls: config.allow_insecure_tls,
        ..ClientOptions::default()
    };

    let mut clients = HashMap::new();
    for (alias, site) in &config.sites {
        clients.insert(alias.clone(), WpClient::new(site, &options)?);
    }

    let site_tools = SiteTools::new(clients);
    let site_count = site_tools.site_count();
    let tool_count = site_tools.tool_count() + 1;
    let registry = CompositeRegistry::new().add(site_tools).add(HealthTools::new(
        SERVER_NAME,
        env!("CARGO_PKG_VERSION"),
        tool_count,
        site_count,
    ));

    info!("WordPress MCP server started with {site_count} site(s) configured");

    WpMcpServer::new(registry)
        .with_name(SERVER_NAME)
        .serve_stdio()
        .await?;

    Ok(())
}
