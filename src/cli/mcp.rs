//! MCP server command handler.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use rmcp::ServiceExt;

use crate::config::Config;
use crate::context::Context;
use crate::mcp::McpServer;

use super::App;

impl App {
    /// Run the MCP server with stdio transport.
    ///
    /// The Neptune connection is deferred to the first tool call, so the
    /// server starts even when the endpoint isn't configured yet.
    pub async fn run_mcp(&self) -> Result<()> {
        tracing::info!("Starting Neptune MCP server");

        let config = Config::load()?;
        match config.neptune.endpoint.as_deref() {
            Some(endpoint) => tracing::info!(endpoint, "Loaded configuration"),
            None => tracing::warn!("NEPTUNE_ENDPOINT is not set; tools will fail until it is"),
        }
        let server = McpServer::new(Context::new(config));

        let running = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| eyre!("Failed to start MCP server on stdio: {}", e))?;
        tracing::info!("Serving MCP over stdio");

        let reason = running
            .waiting()
            .await
            .map_err(|e| eyre!("MCP server terminated abnormally: {}", e))?;
        tracing::info!(?reason, "MCP server stopped");
        Ok(())
    }
}
