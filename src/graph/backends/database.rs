//! Neptune Database backend.
//!
//! openCypher, Gremlin and the summary APIs go through the `neptunedata` SDK
//! client. SPARQL goes through [`SparqlClient`] since the SDK has no SPARQL
//! operation.
//!
//! # Example
//!
//! ```ignore
//! use neptune_mcp::graph::backends::NeptuneDatabase;
//! use neptune_mcp::graph::QueryExt;
//!
//! let db = NeptuneDatabase::connect("my-cluster.cluster-abc.us-east-1.neptune.amazonaws.com", &config).await?;
//! let rows = db.query("MATCH (n) RETURN n LIMIT 1").fetch_all().await?;
//! ```

use async_trait::async_trait;
use aws_sdk_neptunedata::Client;
use aws_smithy_types::error::display::DisplayErrorContext;
use serde_json::Value as JsonValue;

use super::{load_sdk_config, SparqlClient, SUMMARY_INVALID, SUMMARY_UNAVAILABLE};
use crate::config::Config;
use crate::error::AppError;
use crate::graph::document::to_json;
use crate::graph::row::Params;
use crate::graph::traits::{CypherExecutor, GraphBackend};
use crate::models::{GraphLabels, RdfGraphSummary};

/// Serializer requested for Gremlin responses.
pub const GREMLIN_SERIALIZER: &str = "application/vnd.gremlin-v1.0+json";

/// Neptune Database client.
pub struct NeptuneDatabase {
    client: Client,
    sparql: SparqlClient,
}

impl NeptuneDatabase {
    /// Connects to `{scheme}://{host}:{port}` using the shared AWS configuration.
    pub async fn connect(host: &str, config: &Config) -> Result<Self, AppError> {
        tracing::debug!("Creating Neptune Database session for {}", host);

        let scheme = if config.neptune.use_https {
            "https"
        } else {
            "http"
        };
        let endpoint_url = format!("{}://{}:{}", scheme, host, config.neptune.port);

        let sdk_config = load_sdk_config(&config.aws).await;
        let client = Client::from_conf(
            aws_sdk_neptunedata::config::Builder::from(&sdk_config)
                .endpoint_url(&endpoint_url)
                .build(),
        );
        let sparql = SparqlClient::new(&endpoint_url, &sdk_config)?;

        Ok(Self { client, sparql })
    }
}

#[async_trait]
impl CypherExecutor for NeptuneDatabase {
    async fn execute_cypher(&self, cypher: &str, params: Params) -> Result<JsonValue, AppError> {
        let mut request = self.client.execute_open_cypher_query().open_cypher_query(cypher);
        if !params.is_empty() {
            request = request.parameters(serde_json::to_string(&params)?);
        }

        let output = request.send().await.map_err(|e| AppError::Query {
            message: DisplayErrorContext(&e).to_string(),
            query: cypher.to_string(),
        })?;

        Ok(to_json(output.results()))
    }
}

#[async_trait]
impl GraphBackend for NeptuneDatabase {
    fn name(&self) -> &'static str {
        "Neptune Database"
    }

    async fn graph_labels(&self) -> Result<GraphLabels, AppError> {
        let output = self
            .client
            .get_propertygraph_summary()
            .send()
            .await
            .map_err(|e| AppError::neptune(SUMMARY_UNAVAILABLE, DisplayErrorContext(&e).to_string()))?;

        let summary = output
            .payload
            .and_then(|payload| payload.graph_summary)
            .ok_or_else(|| AppError::neptune(SUMMARY_INVALID, "response has no graphSummary"))?;

        Ok(GraphLabels {
            node_labels: summary.node_labels.unwrap_or_default(),
            edge_labels: summary.edge_labels.unwrap_or_default(),
        })
    }

    async fn rdf_summary(&self) -> Result<RdfGraphSummary, AppError> {
        let output = self
            .client
            .get_rdf_graph_summary()
            .send()
            .await
            .map_err(|e| AppError::neptune(SUMMARY_UNAVAILABLE, DisplayErrorContext(&e).to_string()))?;

        let summary = output
            .payload
            .and_then(|payload| payload.graph_summary)
            .ok_or_else(|| AppError::neptune(SUMMARY_INVALID, "response has no graphSummary"))?;

        Ok(RdfGraphSummary {
            classes: summary.classes.unwrap_or_default(),
            predicates: summary
                .predicates
                .unwrap_or_default()
                .into_iter()
                .flat_map(|counts| counts.into_keys())
                .collect(),
        })
    }

    async fn execute_gremlin(&self, query: &str) -> Result<JsonValue, AppError> {
        let output = self
            .client
            .execute_gremlin_query()
            .gremlin_query(query)
            .serializer(GREMLIN_SERIALIZER)
            .send()
            .await
            .map_err(|e| AppError::Query {
                message: DisplayErrorContext(&e).to_string(),
                query: query.to_string(),
            })?;

        Ok(output.result().map(to_json).unwrap_or(JsonValue::Null))
    }

    async fn execute_sparql(&self, query: &str) -> Result<JsonValue, AppError> {
        self.sparql.execute(query).await
    }
}
