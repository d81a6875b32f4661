//! Core traits for Neptune backend abstraction.
//!
//! This module defines the trait hierarchy that backends must implement:
//!
//! - [`CypherExecutor`] - Required for all graph backends
//! - [`GraphBackend`] - Summary endpoints plus optional Gremlin/SPARQL support
//! - [`NeptuneGraph`] - Object-safe query and schema surface used by the server

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::row::Params;
use crate::models::{GraphLabels, GraphSchema, RdfGraphSchema, RdfGraphSummary};

/// Executes openCypher queries against a Neptune graph.
///
/// This is the core trait that all graph backends must implement.
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    /// Executes an openCypher query and returns the raw `results` value.
    ///
    /// `params` is only sent to the service when non-empty.
    async fn execute_cypher(&self, cypher: &str, params: Params) -> Result<JsonValue, AppError>;
}

/// A Neptune backend: openCypher plus the service-specific endpoints.
///
/// Query languages a backend doesn't offer keep the default implementation,
/// which returns [`AppError::Unsupported`].
#[async_trait]
pub trait GraphBackend: CypherExecutor {
    /// Human-readable backend name, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Node and edge labels from the property-graph summary API.
    async fn graph_labels(&self) -> Result<GraphLabels, AppError>;

    /// Classes and predicates from the RDF summary API.
    async fn rdf_summary(&self) -> Result<RdfGraphSummary, AppError> {
        Err(AppError::Unsupported {
            backend: self.name(),
            operation: "RDF graph summary",
        })
    }

    /// Executes a Gremlin query and returns the raw result.
    async fn execute_gremlin(&self, _query: &str) -> Result<JsonValue, AppError> {
        Err(AppError::Unsupported {
            backend: self.name(),
            operation: "Gremlin queries",
        })
    }

    /// Executes a SPARQL query or update and returns the decoded response.
    async fn execute_sparql(&self, _query: &str) -> Result<JsonValue, AppError> {
        Err(AppError::Unsupported {
            backend: self.name(),
            operation: "SPARQL queries",
        })
    }
}

/// Uniform query and schema surface over any backend.
///
/// Object-safe so the server can hold an `Arc<dyn NeptuneGraph>` regardless
/// of which endpoint kind was configured.
#[async_trait]
pub trait NeptuneGraph: Send + Sync {
    /// Backend name (e.g. "Neptune Database").
    fn backend_name(&self) -> &'static str;

    /// Property-graph schema, probed once and cached.
    async fn lpg_schema(&self) -> Result<Arc<GraphSchema>, AppError>;

    /// RDF schema, probed once and cached.
    async fn rdf_schema(&self) -> Result<Arc<RdfGraphSchema>, AppError>;

    /// Drops the cached property-graph schema.
    async fn invalidate_lpg_schema(&self);

    /// Drops the cached RDF schema.
    async fn invalidate_rdf_schema(&self);

    /// Drops both cached schemas so the next access probes again.
    async fn invalidate_schemas(&self) {
        self.invalidate_lpg_schema().await;
        self.invalidate_rdf_schema().await;
    }

    /// Executes an openCypher query.
    async fn query_opencypher(&self, query: &str, params: Params) -> Result<JsonValue, AppError>;

    /// Executes a Gremlin query.
    async fn query_gremlin(&self, query: &str) -> Result<JsonValue, AppError>;

    /// Executes a SPARQL query or update.
    async fn query_sparql(&self, query: &str) -> Result<JsonValue, AppError>;
}
