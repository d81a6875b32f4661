//! Scripted in-memory backend for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use crate::error::AppError;
use crate::graph::row::Params;
use crate::graph::traits::{CypherExecutor, GraphBackend};
use crate::models::GraphLabels;

/// Answers openCypher queries by substring match and records what ran.
pub struct ScriptedBackend {
    labels: GraphLabels,
    responses: Vec<(String, JsonValue)>,
    sparql_response: Option<JsonValue>,
    fail_summary: bool,
    fail_cypher: bool,
    summary_calls: AtomicUsize,
    executed: Mutex<Vec<String>>,
    sparql_queries: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(labels: GraphLabels) -> Self {
        Self {
            labels,
            responses: Vec::new(),
            sparql_response: None,
            fail_summary: false,
            fail_cypher: false,
            summary_calls: AtomicUsize::new(0),
            executed: Mutex::new(Vec::new()),
            sparql_queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries containing `needle` return `results`. First match wins.
    pub fn respond(mut self, needle: &str, results: JsonValue) -> Self {
        self.responses.push((needle.to_string(), results));
        self
    }

    /// Enables SPARQL with a fixed response.
    pub fn sparql(mut self, response: JsonValue) -> Self {
        self.sparql_response = Some(response);
        self
    }

    pub fn failing_summary(mut self) -> Self {
        self.fail_summary = true;
        self
    }

    pub fn failing_cypher(mut self) -> Self {
        self.fail_cypher = true;
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn sparql_queries(&self) -> Vec<String> {
        self.sparql_queries.lock().unwrap().clone()
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CypherExecutor for ScriptedBackend {
    async fn execute_cypher(&self, cypher: &str, _params: Params) -> Result<JsonValue, AppError> {
        self.executed.lock().unwrap().push(cypher.to_string());
        if self.fail_cypher {
            return Err(AppError::neptune("openCypher query failed", "connection refused"));
        }
        Ok(self
            .responses
            .iter()
            .find(|(needle, _)| cypher.contains(needle.as_str()))
            .map(|(_, results)| results.clone())
            .unwrap_or_else(|| json!([])))
    }
}

#[async_trait]
impl GraphBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "Scripted"
    }

    async fn graph_labels(&self) -> Result<GraphLabels, AppError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_summary {
            return Err(AppError::neptune(
                "Summary API is not available for this instance of Neptune, ensure the engine version is >=1.2.1.0",
                "404",
            ));
        }
        Ok(self.labels.clone())
    }

    async fn execute_sparql(&self, query: &str) -> Result<JsonValue, AppError> {
        match &self.sparql_response {
            Some(response) => {
                self.sparql_queries.lock().unwrap().push(query.to_string());
                Ok(response.clone())
            }
            None => Err(AppError::Unsupported {
                backend: self.name(),
                operation: "SPARQL queries",
            }),
        }
    }
}
