//! Domain models for graph schemas.

mod graph;
mod rdf;

pub use graph::*;
pub use rdf::*;
