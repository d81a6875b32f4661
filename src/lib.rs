//! Neptune MCP - Model Context Protocol server for Amazon Neptune
//!
//! Exposes a Neptune Database cluster or Neptune Analytics graph to AI
//! assistants: liveness, property-graph and RDF schema introspection, and
//! openCypher / Gremlin / SPARQL query execution.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod mcp;
pub mod models;
pub mod schema;
pub mod services;
