//! Daemon entry point for the Aha! MCP server.
//!
//! Loads configuration from the environment, builds the Aha! client, and
//! serves the MCP protocol over stdio or streamable HTTP.

mod config;
mod control;
mod logging;

use aha_mcp::server::{serve_stdio, serve_streamable_http};

use crate::config::AhaConfig;
use crate::control::build_control_plane;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AhaConfig::from_args()?;
    logging::init(&config.log_filter);

    let control = build_control_plane(&config)?;
    tracing::info!(
        domain = %config.domain,
        http = config.enable_http,
        "starting aha-mcpd"
    );
    if config.enable_http {
        serve_streamable_http(control, config.http_server_config()).await
    } else {
        serve_stdio(control).await
    }
}
