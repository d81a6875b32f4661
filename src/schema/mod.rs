//! Schema introspection for property graphs and RDF stores.

pub mod lpg;
pub mod rdf;

pub use lpg::probe_lpg_schema;
pub use rdf::{local_name, probe_rdf_schema, split_iri, RdfSchemaBuilder};
