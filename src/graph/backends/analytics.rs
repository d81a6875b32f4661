//! Neptune Analytics backend (`neptunegraph` SDK).
//!
//! Supports openCypher and the property-graph summary only.

use async_trait::async_trait;
use aws_sdk_neptunegraph::types::{GraphSummaryMode, QueryLanguage};
use aws_sdk_neptunegraph::Client;
use aws_smithy_types::error::display::DisplayErrorContext;
use serde_json::Value as JsonValue;

use super::{load_sdk_config, SUMMARY_INVALID, SUMMARY_UNAVAILABLE};
use crate::config::Config;
use crate::error::AppError;
use crate::graph::document::params_to_documents;
use crate::graph::row::Params;
use crate::graph::traits::{CypherExecutor, GraphBackend};
use crate::models::GraphLabels;

/// Neptune Analytics graph client.
pub struct NeptuneAnalytics {
    client: Client,
    graph_id: String,
}

impl NeptuneAnalytics {
    pub async fn connect(graph_id: &str, config: &Config) -> Result<Self, AppError> {
        tracing::debug!(
            "Creating Neptune Graph session for neptune-graph://{}",
            graph_id
        );

        let sdk_config = load_sdk_config(&config.aws).await;
        Ok(Self {
            client: Client::new(&sdk_config),
            graph_id: graph_id.to_string(),
        })
    }
}

/// Unwraps the `results` member of an analytics query payload.
fn payload_results(body: JsonValue) -> JsonValue {
    match body {
        JsonValue::Object(mut map) if map.contains_key("results") => {
            map.remove("results").unwrap_or_default()
        }
        other => other,
    }
}

#[async_trait]
impl CypherExecutor for NeptuneAnalytics {
    async fn execute_cypher(&self, cypher: &str, params: Params) -> Result<JsonValue, AppError> {
        let mut request = self
            .client
            .execute_query()
            .graph_identifier(&self.graph_id)
            .query_string(cypher)
            .language(QueryLanguage::OpenCypher);
        if !params.is_empty() {
            request = request.set_parameters(Some(params_to_documents(&params)));
        }

        let output = request.send().await.map_err(|e| AppError::Query {
            message: DisplayErrorContext(&e).to_string(),
            query: cypher.to_string(),
        })?;

        let bytes = output
            .payload
            .collect()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read query payload: {}", e)))?
            .into_bytes();
        if bytes.is_empty() {
            return Ok(JsonValue::Null);
        }

        Ok(payload_results(serde_json::from_slice(&bytes)?))
    }
}

#[async_trait]
impl GraphBackend for NeptuneAnalytics {
    fn name(&self) -> &'static str {
        "Neptune Analytics"
    }

    async fn graph_labels(&self) -> Result<GraphLabels, AppError> {
        let output = self
            .client
            .get_graph_summary()
            .graph_identifier(&self.graph_id)
            .mode(GraphSummaryMode::Basic)
            .send()
            .await
            .map_err(|e| AppError::neptune(SUMMARY_UNAVAILABLE, DisplayErrorContext(&e).to_string()))?;

        let summary = output
            .graph_summary
            .ok_or_else(|| AppError::neptune(SUMMARY_INVALID, "response has no graphSummary"))?;

        Ok(GraphLabels {
            node_labels: summary.node_labels.unwrap_or_default(),
            edge_labels: summary.edge_labels.unwrap_or_default(),
        })
    }
}
