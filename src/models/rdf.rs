//! RDF schema models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// An item identified by URI with its local name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriItem {
    pub uri: String,
    pub local: String,
}

/// An `owl:Ontology` with optional metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyItem {
    pub uri: String,
    pub label: Option<String>,
    pub comment: Option<String>,
}

impl OntologyItem {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            label: None,
            comment: None,
        }
    }
}

/// An `owl:Class` with its parent and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassItem {
    pub uri: String,
    pub local: String,
    pub parent_uri: Option<String>,
    pub label: Option<String>,
    pub comment: Option<String>,
}

impl ClassItem {
    pub fn new(uri: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            local: local.into(),
            parent_uri: None,
            label: None,
            comment: None,
        }
    }
}

/// A datatype or object property with domain, range and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyItem {
    pub uri: String,
    pub local: String,
    pub parent_uri: Option<String>,
    pub domain_uri: Option<String>,
    pub range_uri: Option<String>,
    pub label: Option<String>,
    pub comment: Option<String>,
}

impl PropertyItem {
    pub fn new(uri: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            local: local.into(),
            parent_uri: None,
            domain_uri: None,
            range_uri: None,
            label: None,
            comment: None,
        }
    }
}

/// An `owl:DatatypeProperty`.
pub type DatatypePropertyItem = PropertyItem;

/// An `owl:ObjectProperty`.
pub type ObjectPropertyItem = PropertyItem;

/// Approximate ontology reconstructed from an RDF store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdfGraphSchema {
    /// Namespace prefix → synthetic alias (`ns0`, `ns1`, ...), in alias order.
    pub distinct_prefixes: Map<String, JsonValue>,
    #[serde(default)]
    pub ontologies: Vec<OntologyItem>,
    #[serde(default)]
    pub classes: Vec<ClassItem>,
    #[serde(default)]
    pub rels: Vec<UriItem>,
    #[serde(default)]
    pub dtprops: Vec<DatatypePropertyItem>,
    #[serde(default)]
    pub oprops: Vec<ObjectPropertyItem>,
}

/// Class and predicate names reported by an RDF summary endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdfGraphSummary {
    pub classes: Vec<String>,
    pub predicates: Vec<String>,
}
