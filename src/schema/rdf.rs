//! RDF ontology reconstruction.
//!
//! A single CONSTRUCT query returns every ontology, class and property triple.
//! [`RdfSchemaBuilder`] scans the bindings once and assembles an
//! [`RdfGraphSchema`].

use std::collections::HashMap;

use serde_json::{Map, Value as JsonValue};

use crate::error::AppError;
use crate::graph::GraphBackend;
use crate::models::{ClassItem, OntologyItem, PropertyItem, RdfGraphSchema, UriItem};

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const RDFS_SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const RDFS_SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

/// CONSTRUCT query returning the ontology triples of the store.
pub const ONTOLOGY_QUERY: &str = r#"
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX dcterms: <http://purl.org/dc/terms/>
PREFIX gb: <http://graph.build/ontology/>
PREFIX sh: <http://www.w3.org/ns/shacl#>

CONSTRUCT {
  ?ontology a owl:Ontology ;
    rdfs:label ?label ;
    rdfs:comment ?comment .

  ?class a owl:Class ;
    rdfs:subClassOf ?classParent ;
    rdfs:label ?classLabel ;
    rdfs:comment ?classComment .

  ?datatypeProperty a owl:DatatypeProperty ;
    rdfs:subPropertyOf ?datatypePropertyParent ;
    rdfs:domain ?datatypePropertyDomain ;
    rdfs:range ?datatypePropertyRange ;
    rdfs:label ?datatypePropertyLabel ;
    rdfs:comment ?datatypePropertyComment .

  ?objectProperty a owl:ObjectProperty ;
    rdfs:subPropertyOf ?objectPropertyParent ;
    rdfs:domain ?objectPropertyDomain ;
    rdfs:range ?objectPropertyRange ;
    rdfs:label ?objectPropertyLabel ;
    rdfs:comment ?objectPropertyComment .
}
WHERE {
  OPTIONAL {
    ?ontology a owl:Ontology .
    OPTIONAL { ?ontology rdfs:label ?label . }
    OPTIONAL { ?ontology rdfs:comment ?comment . }
  }

  OPTIONAL {
    ?class a owl:Class .
    OPTIONAL { ?class rdfs:subClassOf ?classParent . }
    OPTIONAL { ?class rdfs:label ?classLabel . }
    OPTIONAL { ?class rdfs:comment ?classComment . }
  }

  OPTIONAL {
    ?datatypeProperty a owl:DatatypeProperty .
    OPTIONAL { ?datatypeProperty rdfs:subPropertyOf ?datatypePropertyParent . }
    OPTIONAL { ?datatypeProperty rdfs:domain ?datatypePropertyDomain . }
    OPTIONAL { ?datatypeProperty rdfs:range ?datatypePropertyRange . }
    OPTIONAL { ?datatypeProperty rdfs:label ?datatypePropertyLabel . }
    OPTIONAL { ?datatypeProperty rdfs:comment ?datatypePropertyComment . }
  }

  OPTIONAL {
    ?objectProperty a owl:ObjectProperty .
    OPTIONAL { ?objectProperty rdfs:subPropertyOf ?objectPropertyParent . }
    OPTIONAL { ?objectProperty rdfs:domain ?objectPropertyDomain . }
    OPTIONAL { ?objectProperty rdfs:range ?objectPropertyRange . }
    OPTIONAL { ?objectProperty rdfs:label ?objectPropertyLabel . }
    OPTIONAL { ?objectProperty rdfs:comment ?objectPropertyComment . }
  }
}
"#;

/// Splits an IRI into `(prefix, local)`.
///
/// With a `#`, the prefix runs through the first `#`. Otherwise the IRI is
/// split after its last `/`. The delimiter stays on the prefix.
pub fn split_iri(iri: &str) -> Result<(&str, &str), AppError> {
    if let Some(idx) = iri.find('#') {
        Ok((&iri[..=idx], &iri[idx + 1..]))
    } else if let Some(idx) = iri.rfind('/') {
        Ok((&iri[..=idx], &iri[idx + 1..]))
    } else {
        Err(AppError::InvalidIri(iri.to_string()))
    }
}

/// Local part of an IRI.
pub fn local_name(iri: &str) -> Result<&str, AppError> {
    split_iri(iri).map(|(_, local)| local)
}

/// Insertion-ordered map keyed by subject IRI.
struct Registry<T> {
    index: HashMap<String, usize>,
    items: Vec<T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            items: Vec::new(),
        }
    }
}

impl<T> Registry<T> {
    fn contains(&self, uri: &str) -> bool {
        self.index.contains_key(uri)
    }

    /// Inserts unless present. Returns whether the item was new.
    fn insert(&mut self, uri: &str, item: T) -> bool {
        if self.contains(uri) {
            return false;
        }
        self.index.insert(uri.to_string(), self.items.len());
        self.items.push(item);
        true
    }

    fn get_mut(&mut self, uri: &str) -> Option<&mut T> {
        let idx = *self.index.get(uri)?;
        self.items.get_mut(idx)
    }
}

/// One-pass assembler of an [`RdfGraphSchema`] from `(s, p, o)` triples.
#[derive(Default)]
pub struct RdfSchemaBuilder {
    prefixes: Vec<String>,
    ontologies: Registry<OntologyItem>,
    classes: Registry<ClassItem>,
    dtprops: Registry<PropertyItem>,
    oprops: Registry<PropertyItem>,
    rels: Vec<UriItem>,
}

impl RdfSchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds in every binding of a SPARQL JSON response.
    ///
    /// Bindings missing any of `s`, `p`, `o` are ignored.
    pub fn add_response(&mut self, response: &JsonValue) {
        let bindings = response
            .pointer("/results/bindings")
            .and_then(JsonValue::as_array);
        for binding in bindings.into_iter().flatten() {
            if let (Some(s), Some(p), Some(o)) = (
                binding_value(binding, "s"),
                binding_value(binding, "p"),
                binding_value(binding, "o"),
            ) {
                self.add_triple(s, p, o);
            }
        }
    }

    /// Folds in one triple. Each section is evaluated independently.
    pub fn add_triple(&mut self, s: &str, p: &str, o: &str) {
        let is_type = p == RDF_TYPE;

        // Ontologies
        if is_type && o == OWL_ONTOLOGY {
            self.ontologies.insert(s, OntologyItem::new(s));
        } else if let Some(ontology) = self.ontologies.get_mut(s) {
            match p {
                RDFS_LABEL => ontology.label = Some(o.to_string()),
                RDFS_COMMENT => ontology.comment = Some(o.to_string()),
                _ => {}
            }
        }

        // Classes
        if is_type && o == OWL_CLASS {
            if let Some(local) = self.register_prefix(s) {
                self.classes.insert(s, ClassItem::new(s, local));
            }
        } else if let Some(class) = self.classes.get_mut(s) {
            match p {
                RDFS_SUB_CLASS_OF => class.parent_uri = Some(o.to_string()),
                RDFS_LABEL => class.label = Some(o.to_string()),
                RDFS_COMMENT => class.comment = Some(o.to_string()),
                _ => {}
            }
        }

        // Datatype properties
        if is_type && o == OWL_DATATYPE_PROPERTY {
            if let Some(local) = self.register_prefix(s) {
                self.dtprops.insert(s, PropertyItem::new(s, local));
            }
        } else if let Some(prop) = self.dtprops.get_mut(s) {
            apply_property_field(prop, p, o);
        }

        // Object properties
        if is_type && o == OWL_OBJECT_PROPERTY {
            if let Some(local) = self.register_prefix(s) {
                if self.oprops.insert(s, PropertyItem::new(s, local.clone())) {
                    self.rels.push(UriItem {
                        uri: s.to_string(),
                        local,
                    });
                }
            }
        } else if let Some(prop) = self.oprops.get_mut(s) {
            apply_property_field(prop, p, o);
        }
    }

    /// Registers the namespace of `iri` and returns its local name.
    ///
    /// Malformed IRIs are logged and yield `None`.
    fn register_prefix(&mut self, iri: &str) -> Option<String> {
        match split_iri(iri) {
            Ok((prefix, local)) => {
                if !self.prefixes.iter().any(|p| p == prefix) {
                    self.prefixes.push(prefix.to_string());
                }
                Some(local.to_string())
            }
            Err(e) => {
                tracing::warn!(iri, error = %e, "Skipping RDF subject with malformed IRI");
                None
            }
        }
    }

    pub fn build(self) -> RdfGraphSchema {
        let distinct_prefixes: Map<String, JsonValue> = self
            .prefixes
            .into_iter()
            .enumerate()
            .map(|(i, prefix)| (prefix, JsonValue::String(format!("ns{}", i))))
            .collect();

        RdfGraphSchema {
            distinct_prefixes,
            ontologies: self.ontologies.items,
            classes: self.classes.items,
            rels: self.rels,
            dtprops: self.dtprops.items,
            oprops: self.oprops.items,
        }
    }
}

fn binding_value<'a>(binding: &'a JsonValue, key: &str) -> Option<&'a str> {
    binding.get(key)?.get("value")?.as_str()
}

fn apply_property_field(prop: &mut PropertyItem, p: &str, o: &str) {
    let value = Some(o.to_string());
    match p {
        RDFS_SUB_PROPERTY_OF => prop.parent_uri = value,
        RDFS_DOMAIN => prop.domain_uri = value,
        RDFS_RANGE => prop.range_uri = value,
        RDFS_LABEL => prop.label = value,
        RDFS_COMMENT => prop.comment = value,
        _ => {}
    }
}

/// Builds the RDF schema of a backend.
///
/// The RDF summary is fetched first and only logged; failing to get it does
/// not abort the build.
pub async fn probe_rdf_schema<B>(backend: &B) -> Result<RdfGraphSchema, AppError>
where
    B: GraphBackend + ?Sized,
{
    match backend.rdf_summary().await {
        Ok(summary) => tracing::debug!(
            classes = ?summary.classes,
            predicates = ?summary.predicates,
            "RDF graph summary"
        ),
        Err(e) => tracing::warn!(error = %e, "RDF graph summary unavailable"),
    }

    let response = backend.execute_sparql(ONTOLOGY_QUERY).await?;

    let mut builder = RdfSchemaBuilder::new();
    builder.add_response(&response);
    let schema = builder.build();

    tracing::info!(
        ontologies = schema.ontologies.len(),
        classes = schema.classes.len(),
        dtprops = schema.dtprops.len(),
        oprops = schema.oprops.len(),
        "RDF schema probed"
    );

    Ok(schema)
}
