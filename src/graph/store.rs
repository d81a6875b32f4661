//! Backend wrapper that memoizes probed schemas.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::cache::SchemaCache;
use crate::graph::row::Params;
use crate::graph::traits::{GraphBackend, NeptuneGraph};
use crate::models::{GraphSchema, RdfGraphSchema};
use crate::schema::{probe_lpg_schema, probe_rdf_schema};

/// A backend plus its lazily-probed schemas.
///
/// # Example
///
/// ```ignore
/// let store = GraphStore::new(NeptuneDatabase::connect(&host, &config).await?);
/// let schema = store.lpg_schema().await?; // probes
/// let again = store.lpg_schema().await?;  // cached
/// ```
pub struct GraphStore<B: GraphBackend> {
    backend: B,
    lpg_schema: SchemaCache<GraphSchema>,
    rdf_schema: SchemaCache<RdfGraphSchema>,
}

impl<B: GraphBackend> GraphStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lpg_schema: SchemaCache::new(),
            rdf_schema: SchemaCache::new(),
        }
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: GraphBackend> NeptuneGraph for GraphStore<B> {
    fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    async fn lpg_schema(&self) -> Result<Arc<GraphSchema>, AppError> {
        self.lpg_schema
            .get_or_try_init(|| probe_lpg_schema(&self.backend))
            .await
    }

    async fn rdf_schema(&self) -> Result<Arc<RdfGraphSchema>, AppError> {
        self.rdf_schema
            .get_or_try_init(|| probe_rdf_schema(&self.backend))
            .await
    }

    async fn invalidate_lpg_schema(&self) {
        self.lpg_schema.invalidate().await;
        tracing::debug!(backend = self.backend.name(), "Property-graph schema cache cleared");
    }

    async fn invalidate_rdf_schema(&self) {
        self.rdf_schema.invalidate().await;
        tracing::debug!(backend = self.backend.name(), "RDF schema cache cleared");
    }

    async fn query_opencypher(&self, query: &str, params: Params) -> Result<JsonValue, AppError> {
        self.backend.execute_cypher(query, params).await
    }

    async fn query_gremlin(&self, query: &str) -> Result<JsonValue, AppError> {
        self.backend.execute_gremlin(query).await
    }

    async fn query_sparql(&self, query: &str) -> Result<JsonValue, AppError> {
        self.backend.execute_sparql(query).await
    }
}
