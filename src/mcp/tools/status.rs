//! Graph status tool.

use rmcp::{model::CallToolResult, model::Content, tool, tool_router, ErrorData as McpError};

use crate::mcp::server::McpServer;

#[tool_router(router = status_tools, vis = "pub(crate)")]
impl McpServer {
    /// Report whether the configured Neptune graph answers queries.
    #[tool(description = "Get the status of the Neptune graph: Available or Unavailable.")]
    pub async fn get_graph_status(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("Running get_graph_status tool");

        let status = self.neptune().await?.status().await;

        tracing::info!(status = %status, "Graph status retrieved");
        Ok(CallToolResult::success(vec![Content::text(status.to_string())]))
    }
}
