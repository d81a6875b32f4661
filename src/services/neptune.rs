//! Neptune connection dispatch and uniform query surface.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::config::Config;
use crate::error::AppError;
use crate::graph::backends::{NeptuneAnalytics, NeptuneDatabase};
use crate::graph::{Endpoint, GraphStore, NeptuneGraph, Params};
use crate::models::{GraphSchema, GraphStatus, RdfGraphSchema};

/// A connected Neptune graph, either Database or Analytics.
///
/// # Example
///
/// ```ignore
/// let server = NeptuneServer::connect(&Config::load()?).await?;
/// println!("{}", server.status().await);
/// let schema = server.schema().await?;
/// ```
#[derive(Clone)]
pub struct NeptuneServer {
    graph: Arc<dyn NeptuneGraph>,
}

impl NeptuneServer {
    /// Connects using the configured endpoint.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let endpoint: Endpoint = config.endpoint()?.parse()?;
        Self::connect_endpoint(&endpoint, config).await
    }

    /// Connects to an already-parsed endpoint.
    pub async fn connect_endpoint(endpoint: &Endpoint, config: &Config) -> Result<Self, AppError> {
        let graph: Arc<dyn NeptuneGraph> = match endpoint {
            Endpoint::Database { host } => {
                Arc::new(GraphStore::new(NeptuneDatabase::connect(host, config).await?))
            }
            Endpoint::Analytics { graph_id } => {
                Arc::new(GraphStore::new(NeptuneAnalytics::connect(graph_id, config).await?))
            }
        };
        tracing::info!(endpoint = %endpoint, backend = graph.backend_name(), "Connected to Neptune");
        Ok(Self { graph })
    }

    /// Wraps an existing graph (used by tests and embedders).
    pub fn from_graph(graph: Arc<dyn NeptuneGraph>) -> Self {
        Self { graph }
    }

    pub fn backend_name(&self) -> &'static str {
        self.graph.backend_name()
    }

    /// Liveness probe: runs `RETURN 1`. Errors are logged, never returned.
    pub async fn status(&self) -> GraphStatus {
        match self.graph.query_opencypher("RETURN 1", Params::new()).await {
            Ok(_) => GraphStatus::Available,
            Err(e) => {
                tracing::warn!(error = %e, "Could not get status for Neptune instance");
                GraphStatus::Unavailable
            }
        }
    }

    /// Property-graph schema (cached after the first call).
    pub async fn schema(&self) -> Result<Arc<GraphSchema>, AppError> {
        self.graph.lpg_schema().await
    }

    /// RDF schema (cached after the first call).
    pub async fn rdf_schema(&self) -> Result<Arc<RdfGraphSchema>, AppError> {
        self.graph.rdf_schema().await
    }

    /// Forces the next [`NeptuneServer::schema`] call to probe again.
    pub async fn invalidate_schema(&self) {
        self.graph.invalidate_lpg_schema().await
    }

    /// Forces the next [`NeptuneServer::rdf_schema`] call to probe again.
    pub async fn invalidate_rdf_schema(&self) {
        self.graph.invalidate_rdf_schema().await
    }

    pub async fn invalidate_schemas(&self) {
        self.graph.invalidate_schemas().await
    }

    /// Runs an openCypher query. Empty or missing parameters are not sent.
    pub async fn query_opencypher(
        &self,
        query: &str,
        parameters: Option<Params>,
    ) -> Result<JsonValue, AppError> {
        self.graph
            .query_opencypher(query, parameters.unwrap_or_default())
            .await
    }

    pub async fn query_gremlin(&self, query: &str) -> Result<JsonValue, AppError> {
        self.graph.query_gremlin(query).await
    }

    pub async fn query_sparql(&self, query: &str) -> Result<JsonValue, AppError> {
        self.graph.query_sparql(query).await
    }
}
