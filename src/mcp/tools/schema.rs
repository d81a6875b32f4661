//! Schema introspection tools.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::Deserialize;

use crate::mcp::protocol::{OutputFormat, Response};
use crate::mcp::server::McpServer;

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for the schema tools.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GetSchemaParams {
    /// Discard the cached schema and probe the graph again.
    #[serde(default)]
    pub refresh: bool,
    /// Output format: "json" (default) or "toon".
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router(router = schema_tools, vis = "pub(crate)")]
impl McpServer {
    /// Get the property-graph schema.
    ///
    /// Probed once from the summary API plus sampled openCypher queries,
    /// then served from cache until `refresh` is set.
    #[tool(
        description = "Get the schema for the graph including node labels, relationship types, relationship patterns and property types. Use this before writing openCypher or Gremlin queries."
    )]
    pub async fn get_graph_schema(
        &self,
        Parameters(params): Parameters<GetSchemaParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(refresh = params.refresh, "Running get_graph_schema tool");

        let neptune = self.neptune().await?;
        if params.refresh {
            neptune.invalidate_schema().await;
        }
        let schema = neptune.schema().await?;

        tracing::info!(
            nodes = schema.nodes.len(),
            relationships = schema.relationships.len(),
            "Graph schema retrieved"
        );

        Response(schema.as_ref(), params.format).into()
    }

    /// Get the RDF schema (Neptune Database only).
    #[tool(
        description = "Get the RDF schema for the graph: ontologies, classes, datatype properties, object properties and namespace prefixes. Use this before writing SPARQL queries."
    )]
    pub async fn get_rdf_schema(
        &self,
        Parameters(params): Parameters<GetSchemaParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(refresh = params.refresh, "Running get_rdf_schema tool");

        let neptune = self.neptune().await?;
        if params.refresh {
            neptune.invalidate_rdf_schema().await;
        }
        let schema = neptune.rdf_schema().await?;

        tracing::info!(
            classes = schema.classes.len(),
            prefixes = schema.distinct_prefixes.len(),
            "RDF schema retrieved"
        );

        Response(schema.as_ref(), params.format).into()
    }
}
