//! End-to-end schema probing through the public server API.
//!
//! Uses an in-memory fixture graph in place of a Neptune endpoint.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use neptune_mcp::error::AppError;
use neptune_mcp::graph::{CypherExecutor, GraphBackend, GraphStore, Params};
use neptune_mcp::models::{GraphLabels, GraphStatus, PropertyType};
use neptune_mcp::services::NeptuneServer;
use serde_json::{json, Value as JsonValue};

/// Fixture graph keyed by label: sampled property maps and edge endpoints.
#[derive(Default)]
struct FixtureGraph {
    node_props: HashMap<String, Vec<JsonValue>>,
    edge_props: HashMap<String, Vec<JsonValue>>,
    edge_ends: HashMap<String, Vec<(String, String)>>,
    queries: Mutex<Vec<String>>,
    summaries: AtomicUsize,
}

impl FixtureGraph {
    fn node(mut self, label: &str, props: Vec<JsonValue>) -> Self {
        self.node_props.insert(label.to_string(), props);
        self
    }

    fn edge(mut self, label: &str, props: Vec<JsonValue>, ends: &[(&str, &str)]) -> Self {
        self.edge_props.insert(label.to_string(), props);
        self.edge_ends.insert(
            label.to_string(),
            ends.iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        );
        self
    }

    fn label_in(cypher: &str, prefix: &str) -> Option<String> {
        let start = cypher.find(prefix)? + prefix.len();
        let end = cypher[start..].find('`')?;
        Some(cypher[start..start + end].to_string())
    }
}

#[async_trait]
impl CypherExecutor for FixtureGraph {
    async fn execute_cypher(&self, cypher: &str, _params: Params) -> Result<JsonValue, AppError> {
        self.queries.lock().unwrap().push(cypher.to_string());

        if cypher.contains("RETURN 1") {
            return Ok(json!([{"1": 1}]));
        }
        if let Some(label) = Self::label_in(cypher, "MATCH (a)-[e:`") {
            let rows: Vec<JsonValue> = self
                .edge_ends
                .get(&label)
                .into_iter()
                .flatten()
                .map(|(from, to)| json!({"from": [from], "edge": label, "to": [to]}))
                .collect();
            return Ok(JsonValue::Array(rows));
        }
        if let Some(label) = Self::label_in(cypher, "MATCH (a:`") {
            let rows = self.node_props.get(&label).cloned().unwrap_or_default();
            return Ok(rows.into_iter().map(|p| json!({"props": p})).collect());
        }
        if let Some(label) = Self::label_in(cypher, "MATCH ()-[e:`") {
            let rows = self.edge_props.get(&label).cloned().unwrap_or_default();
            return Ok(rows.into_iter().map(|p| json!({"props": p})).collect());
        }
        Ok(json!([]))
    }
}

#[async_trait]
impl GraphBackend for FixtureGraph {
    fn name(&self) -> &'static str {
        "Fixture"
    }

    async fn graph_labels(&self) -> Result<GraphLabels, AppError> {
        self.summaries.fetch_add(1, Ordering::SeqCst);
        let mut node_labels: Vec<String> = self.node_props.keys().cloned().collect();
        let mut edge_labels: Vec<String> = self.edge_props.keys().cloned().collect();
        node_labels.sort();
        edge_labels.sort();
        Ok(GraphLabels {
            node_labels,
            edge_labels,
        })
    }
}

/// Wraps the fixture so the test keeps a handle for assertions.
struct Shared(Arc<FixtureGraph>);

#[async_trait]
impl CypherExecutor for Shared {
    async fn execute_cypher(&self, cypher: &str, params: Params) -> Result<JsonValue, AppError> {
        self.0.execute_cypher(cypher, params).await
    }
}

#[async_trait]
impl GraphBackend for Shared {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    async fn graph_labels(&self) -> Result<GraphLabels, AppError> {
        self.0.graph_labels().await
    }
}

fn movie_graph() -> FixtureGraph {
    FixtureGraph::default()
        .node(
            "Person",
            vec![
                json!({"name": "Keanu", "born": 1964}),
                json!({"name": "Carrie-Anne", "born": "1967", "nickname": null}),
            ],
        )
        .node("Movie", vec![json!({"title": "The Matrix", "rating": 8.7})])
        .edge(
            "ACTED_IN",
            vec![json!({"roles": ["Neo"]})],
            &[
                ("Person", "Movie"),
                ("Person", "Movie"),
                ("Person", "Movie"),
            ],
        )
}

fn server_for(graph: &Arc<FixtureGraph>) -> NeptuneServer {
    NeptuneServer::from_graph(Arc::new(GraphStore::new(Shared(graph.clone()))))
}

#[tokio::test]
async fn test_schema_describes_fixture_graph() {
    let graph = Arc::new(movie_graph());
    let server = server_for(&graph);

    let schema = server.schema().await.unwrap();

    let person = schema
        .nodes
        .iter()
        .find(|n| n.labels == "Person")
        .expect("Person node");
    let born = person.properties.iter().find(|p| p.name == "born").unwrap();
    assert!(born.types.contains(&PropertyType::Integer));
    assert!(born.types.contains(&PropertyType::String));
    assert!(person.properties.iter().all(|p| p.name != "nickname"));

    let acted_in = &schema.relationships[0];
    assert_eq!(acted_in.rel_type, "ACTED_IN");
    assert_eq!(acted_in.properties[0].name, "roles");
    assert!(acted_in.properties[0].types.contains(&PropertyType::List));

    assert_eq!(schema.relationship_patterns.len(), 1);
    let pattern = &schema.relationship_patterns[0];
    assert_eq!(pattern.left_node, "Person");
    assert_eq!(pattern.relation, "ACTED_IN");
    assert_eq!(pattern.right_node, "Movie");
}

#[tokio::test]
async fn test_schema_probed_once_until_invalidated() {
    let graph = Arc::new(movie_graph());
    let server = server_for(&graph);

    let first = server.schema().await.unwrap();
    let second = server.schema().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(graph.summaries.load(Ordering::SeqCst), 1);

    server.invalidate_schemas().await;
    server.schema().await.unwrap();
    assert_eq!(graph.summaries.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_empty_graph_has_empty_schema() {
    let graph = Arc::new(FixtureGraph::default());
    let server = server_for(&graph);

    let schema = server.schema().await.unwrap();
    assert!(schema.nodes.is_empty());
    assert!(schema.relationships.is_empty());
    assert!(schema.relationship_patterns.is_empty());
    assert!(graph.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_status_and_unsupported_languages() {
    let graph = Arc::new(movie_graph());
    let server = server_for(&graph);

    assert_eq!(server.status().await, GraphStatus::Available);

    let err = server.query_gremlin("g.V().count()").await.unwrap_err();
    assert!(matches!(err, AppError::Unsupported { .. }));

    let err = server.query_sparql("SELECT * WHERE { ?s ?p ?o }").await.unwrap_err();
    assert!(matches!(err, AppError::Unsupported { .. }));
}

#[tokio::test]
async fn test_opencypher_passthrough() {
    let graph = Arc::new(movie_graph());
    let server = server_for(&graph);

    let result = server
        .query_opencypher("MATCH (a:`Movie`) RETURN properties(a) AS props", None)
        .await
        .unwrap();

    assert_eq!(result[0]["props"]["title"], "The Matrix");
}
