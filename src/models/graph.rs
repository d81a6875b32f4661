//! Property-graph schema models.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Runtime type tag observed for a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    String,
    Integer,
    Double,
    Boolean,
    List,
    Map,
}

impl PropertyType {
    /// Classifies a JSON value. `null` carries no type information.
    pub fn of(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            JsonValue::Bool(_) => Some(Self::Boolean),
            JsonValue::Number(n) if n.is_f64() => Some(Self::Double),
            JsonValue::Number(_) => Some(Self::Integer),
            JsonValue::String(_) => Some(Self::String),
            JsonValue::Array(_) => Some(Self::List),
            JsonValue::Object(_) => Some(Self::Map),
        }
    }
}

/// A property key with every type observed for it across sampled instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub types: BTreeSet<PropertyType>,
}

/// A node label and the properties seen on its instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub labels: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// An edge label and the properties seen on its instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// A `(left)-[relation]->(right)` combination observed in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipPattern {
    pub left_node: String,
    pub right_node: String,
    pub relation: String,
}

/// Best-effort schema of a labeled property graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSchema {
    pub nodes: Vec<Node>,
    pub relationships: Vec<Relationship>,
    pub relationship_patterns: Vec<RelationshipPattern>,
}

/// Node and edge labels reported by a graph summary endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLabels {
    pub node_labels: Vec<String>,
    pub edge_labels: Vec<String>,
}

/// Liveness of the configured graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphStatus {
    Available,
    Unavailable,
}

impl std::fmt::Display for GraphStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphStatus::Available => f.write_str("Available"),
            GraphStatus::Unavailable => f.write_str("Unavailable"),
        }
    }
}
