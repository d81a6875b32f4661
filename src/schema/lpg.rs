//! Property-graph schema probing.
//!
//! Labels come from the summary API. Relationship patterns and property types
//! are sampled with bounded openCypher queries per label.

use std::collections::{BTreeSet, HashMap};

use serde_json::{Map, Value as JsonValue};

use crate::error::AppError;
use crate::graph::{GraphBackend, QueryExt};
use crate::models::{GraphSchema, Node, Property, PropertyType, Relationship, RelationshipPattern};

/// Maximum number of relationship patterns kept per edge label.
pub const PATTERN_LIMIT: usize = 10;

/// Number of edges scanned before collecting distinct patterns.
const PATTERN_SCAN_LIMIT: usize = 3000;

/// Number of nodes or edges sampled per label for property types.
const PROPERTY_SAMPLE_LIMIT: usize = 100;

/// Escapes a label for interpolation inside backticks.
pub fn escape_label(label: &str) -> String {
    label.replace('`', "``")
}

/// Builds the full property-graph schema.
///
/// Order of work: labels, relationship patterns, node properties, edge properties.
pub async fn probe_lpg_schema<B>(backend: &B) -> Result<GraphSchema, AppError>
where
    B: GraphBackend + ?Sized,
{
    let labels = backend.graph_labels().await?;
    tracing::debug!(
        backend = backend.name(),
        node_labels = labels.node_labels.len(),
        edge_labels = labels.edge_labels.len(),
        "Fetched graph labels"
    );

    let relationship_patterns = relationship_patterns(backend, &labels.edge_labels).await?;

    let mut nodes = Vec::with_capacity(labels.node_labels.len());
    for label in &labels.node_labels {
        let cypher = format!(
            "MATCH (a:`{}`) RETURN properties(a) AS props LIMIT {}",
            escape_label(label),
            PROPERTY_SAMPLE_LIMIT
        );
        nodes.push(Node {
            labels: label.clone(),
            properties: sample_properties(backend, &cypher).await?,
        });
    }

    let mut relationships = Vec::with_capacity(labels.edge_labels.len());
    for label in &labels.edge_labels {
        let cypher = format!(
            "MATCH ()-[e:`{}`]->() RETURN properties(e) AS props LIMIT {}",
            escape_label(label),
            PROPERTY_SAMPLE_LIMIT
        );
        relationships.push(Relationship {
            rel_type: label.clone(),
            properties: sample_properties(backend, &cypher).await?,
        });
    }

    tracing::info!(
        nodes = nodes.len(),
        relationships = relationships.len(),
        patterns = relationship_patterns.len(),
        "Property-graph schema probed"
    );

    Ok(GraphSchema {
        nodes,
        relationships,
        relationship_patterns,
    })
}

async fn relationship_patterns<B>(
    backend: &B,
    edge_labels: &[String],
) -> Result<Vec<RelationshipPattern>, AppError>
where
    B: GraphBackend + ?Sized,
{
    let mut patterns = Vec::new();

    for label in edge_labels {
        let cypher = format!(
            "MATCH (a)-[e:`{}`]->(b) WITH a,e,b LIMIT {} \
             RETURN DISTINCT labels(a) AS from, type(e) AS edge, labels(b) AS to LIMIT {}",
            escape_label(label),
            PATTERN_SCAN_LIMIT,
            PATTERN_LIMIT
        );
        let rows = backend.query(cypher).fetch_all().await?;

        let mut seen: Vec<RelationshipPattern> = Vec::new();
        for row in rows.into_iter().take(PATTERN_LIMIT) {
            let from: Vec<String> = row.get_opt("from")?.unwrap_or_default();
            let to: Vec<String> = row.get_opt("to")?.unwrap_or_default();
            let edge: Option<String> = row.get_opt("edge")?;

            let (Some(left), Some(right)) = (from.into_iter().next(), to.into_iter().next())
            else {
                tracing::warn!(edge_label = %label, "Skipping relationship row without endpoint labels");
                continue;
            };

            let pattern = RelationshipPattern {
                left_node: left,
                right_node: right,
                relation: edge.unwrap_or_else(|| label.clone()),
            };
            if !seen.contains(&pattern) {
                seen.push(pattern);
            }
        }
        patterns.extend(seen);
    }

    Ok(patterns)
}

async fn sample_properties<B>(backend: &B, cypher: &str) -> Result<Vec<Property>, AppError>
where
    B: GraphBackend + ?Sized,
{
    let rows = backend.query(cypher).fetch_all().await?;
    let mut acc = PropertyAccumulator::default();
    for row in rows {
        if let Some(props) = row.get_opt::<Map<String, JsonValue>>("props")? {
            acc.observe(&props);
        }
    }
    Ok(acc.into_properties())
}

/// Unions observed value types per property key, keeping first-seen key order.
#[derive(Default)]
pub struct PropertyAccumulator {
    order: Vec<String>,
    types: HashMap<String, BTreeSet<PropertyType>>,
}

impl PropertyAccumulator {
    /// Records the types of every non-null value in one property map.
    pub fn observe(&mut self, props: &Map<String, JsonValue>) {
        for (key, value) in props {
            let Some(ty) = PropertyType::of(value) else {
                continue;
            };
            self.types
                .entry(key.clone())
                .or_insert_with(|| {
                    self.order.push(key.clone());
                    BTreeSet::new()
                })
                .insert(ty);
        }
    }

    pub fn into_properties(mut self) -> Vec<Property> {
        self.order
            .into_iter()
            .map(|name| {
                let types = self.types.remove(&name).unwrap_or_default();
                Property { name, types }
            })
            .collect()
    }
}
