//! Query tools: openCypher, Gremlin and SPARQL passthrough.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::Deserialize;

use crate::graph::Params;
use crate::mcp::protocol::Response;
use crate::mcp::server::McpServer;

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for run_opencypher_query tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct OpenCypherParams {
    /// The openCypher query.
    pub query: String,
    /// Query parameters referenced as `$name`.
    #[serde(default)]
    pub parameters: Option<Params>,
}

/// Parameters for run_gremlin_query and run_sparql_query tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryParams {
    /// The query text.
    pub query: String,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router(router = query_tools, vis = "pub(crate)")]
impl McpServer {
    #[tool(description = "Executes the provided openCypher query against the graph.")]
    pub async fn run_opencypher_query(
        &self,
        Parameters(params): Parameters<OpenCypherParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Running run_opencypher_query tool");

        let results = self
            .neptune()
            .await?
            .query_opencypher(&params.query, params.parameters)
            .await?;

        Response::json(results).into()
    }

    /// Gremlin traversal (Neptune Database only).
    #[tool(description = "Executes the provided Gremlin query against the graph.")]
    pub async fn run_gremlin_query(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Running run_gremlin_query tool");

        let result = self.neptune().await?.query_gremlin(&params.query).await?;

        Response::json(result).into()
    }

    /// SPARQL query or update (Neptune Database only).
    #[tool(description = "Executes the provided SPARQL query against the graph.")]
    pub async fn run_sparql_query(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(query = %params.query, "Running run_sparql_query tool");

        let response = self.neptune().await?.query_sparql(&params.query).await?;

        Response::json(response).into()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::context::Context;
    use crate::graph::testing::ScriptedBackend;
    use crate::graph::GraphStore;
    use crate::mcp::protocol::OutputFormat;
    use crate::mcp::tools::schema::GetSchemaParams;
    use crate::models::GraphLabels;
    use crate::services::NeptuneServer;
    use serde_json::json;

    fn scripted_server(backend: ScriptedBackend) -> McpServer {
        let server = NeptuneServer::from_graph(Arc::new(GraphStore::new(backend)));
        McpServer::new(Context::with_server(server))
    }

    fn first_text(result: &CallToolResult) -> String {
        result.content[0]
            .as_text()
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_opencypher_returns_results() {
        let server = scripted_server(
            ScriptedBackend::new(GraphLabels::default())
                .respond("MATCH (n)", json!([{"n": {"name": "Keanu"}}])),
        );

        let result = server
            .run_opencypher_query(Parameters(OpenCypherParams {
                query: "MATCH (n) RETURN n LIMIT 1".to_string(),
                parameters: None,
            }))
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&first_text(&result)).unwrap();
        assert_eq!(value, json!([{"n": {"name": "Keanu"}}]));
    }

    #[tokio::test]
    async fn test_unsupported_gremlin_is_error() {
        let server = scripted_server(ScriptedBackend::new(GraphLabels::default()));

        let err = server
            .run_gremlin_query(Parameters(QueryParams {
                query: "g.V().count()".to_string(),
            }))
            .await
            .unwrap_err();
        assert!(err.message.starts_with("[UNSUPPORTED]"));
    }

    #[tokio::test]
    async fn test_status_tool() {
        let server = scripted_server(ScriptedBackend::new(GraphLabels::default()).failing_cypher());
        let result = server.get_graph_status().await.unwrap();
        assert_eq!(first_text(&result), "Unavailable");
    }

    #[tokio::test]
    async fn test_schema_tool_toon_format() {
        let server = scripted_server(ScriptedBackend::new(GraphLabels {
            node_labels: vec!["Person".to_string()],
            edge_labels: vec![],
        }));

        let result = server
            .get_graph_schema(Parameters(GetSchemaParams {
                refresh: true,
                format: Some(OutputFormat::Toon),
            }))
            .await
            .unwrap();

        let text = first_text(&result);
        assert!(text.contains("Person"));
        assert!(serde_json::from_str::<serde_json::Value>(&text).is_err());
    }
}
