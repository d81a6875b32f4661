//! MCP server implementation for Amazon Neptune.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler},
    model::{
        AnnotateAble, Implementation, ListResourcesResult, PaginatedRequestParam,
        ProtocolVersion, RawResource, ReadResourceRequestParam, ReadResourceResult, Resource,
        ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool_handler, ErrorData as McpError, RoleServer,
};

use crate::context::Context;
use crate::mcp::protocol::{render, OutputFormat};
use crate::services::NeptuneServer;

pub const STATUS_URI: &str = "amazon-neptune://status";
pub const SCHEMA_URI: &str = "amazon-neptune://schema";
pub const RDF_SCHEMA_URI: &str = "amazon-neptune://schema/rdf";

/// Neptune MCP server.
///
/// This server provides AI assistants with tools to:
/// - Check whether the configured graph is reachable
/// - Inspect the property-graph and RDF schemas
/// - Run openCypher, Gremlin and SPARQL queries
#[derive(Clone)]
pub struct McpServer {
    pub(crate) ctx: Arc<Context>,
    tool_router: ToolRouter<McpServer>,
}

impl McpServer {
    /// Create a new Neptune MCP server with the given context.
    pub fn new(ctx: Context) -> Self {
        tracing::info!("Initializing Neptune MCP server");

        Self {
            ctx: Arc::new(ctx),
            tool_router: Self::tool_router(),
        }
    }

    /// Build the combined tool router from all tool modules.
    fn tool_router() -> ToolRouter<Self> {
        Self::status_tools() + Self::schema_tools() + Self::query_tools()
    }

    /// The Neptune connection, created on first use.
    pub(crate) async fn neptune(&self) -> Result<&NeptuneServer, McpError> {
        self.ctx.neptune.get().await.map_err(McpError::from)
    }

    fn resources() -> Vec<Resource> {
        [
            (STATUS_URI, "status", "Status of the Neptune graph", "text/plain"),
            (SCHEMA_URI, "schema", "Property-graph schema of the Neptune graph", "application/json"),
            (RDF_SCHEMA_URI, "rdf_schema", "RDF schema of the Neptune graph", "application/json"),
        ]
        .into_iter()
        .map(|(uri, name, description, mime_type)| {
            RawResource {
                description: Some(description.to_string()),
                mime_type: Some(mime_type.to_string()),
                ..RawResource::new(uri, name)
            }
            .no_annotation()
        })
        .collect()
    }

    /// Renders the text of a known resource.
    pub(crate) async fn resource_text(&self, uri: &str) -> Result<String, McpError> {
        match uri {
            STATUS_URI => Ok(self.neptune().await?.status().await.to_string()),
            SCHEMA_URI => {
                let schema = self.neptune().await?.schema().await?;
                Ok(render(schema.as_ref(), OutputFormat::Json)?)
            }
            RDF_SCHEMA_URI => {
                let schema = self.neptune().await?.rdf_schema().await?;
                Ok(render(schema.as_ref(), OutputFormat::Json)?)
            }
            _ => Err(McpError::resource_not_found(
                format!("Unknown resource: {}", uri),
                Some(serde_json::json!({ "uri": uri })),
            )),
        }
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                r#"Neptune MCP Server

Query and inspect an Amazon Neptune graph (Neptune Database or Neptune Analytics).

## Status

- **get_graph_status** - Whether the graph is reachable (Available / Unavailable)

## Schema

- **get_graph_schema** - Property-graph schema: node labels, edge labels, relationship patterns, property types
- **get_rdf_schema** - RDF schema: ontologies, classes, datatype/object properties, namespace prefixes (Neptune Database only)

Fetch the schema before writing queries. Pass `refresh: true` after the data model changes.

## Queries

- **run_opencypher_query** - openCypher with optional parameters
- **run_gremlin_query** - Gremlin (Neptune Database only)
- **run_sparql_query** - SPARQL query or update (Neptune Database only)

## Resources

- amazon-neptune://status
- amazon-neptune://schema
- amazon-neptune://schema/rdf
"#
                .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: Self::resources(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        tracing::info!(uri = %uri, "Reading resource");
        let text = self.resource_text(&uri).await?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}
