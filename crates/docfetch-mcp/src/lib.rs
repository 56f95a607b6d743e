//! docfetch MCP server
//!
//! Exposes the docfetch page pipeline and documentation catalog to an agent
//! as MCP tools over stdio: `search_docs`, `list_components`, `get_page` and
//! `get_component`.

pub mod error;
pub mod logging;
pub mod server;
pub mod tools;

use docfetch_core::Config;

pub use error::{McpError, McpResult};
pub use server::McpServer;

/// Main entry point for the MCP server
///
/// Builds the server from `config` and runs it over stdio until the client
/// disconnects.
///
/// # Errors
///
/// Returns an error if the server fails to initialize or run.
pub async fn serve_stdio(config: &Config) -> McpResult<()> {
    tracing::debug!(?config, "initializing docfetch MCP server");

    let server = McpServer::from_config(config)?;
    server.serve_stdio().await
}
