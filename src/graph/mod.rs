//! Graph access layer for Amazon Neptune.
//!
//! This module provides a trait-based abstraction over the two Neptune
//! services, so schema probing and the MCP tools work the same against
//! either one.
//!
//! # Architecture
//!
//! - [`CypherExecutor`] - Execute openCypher queries (required for all backends)
//! - [`GraphBackend`] - Summary APIs plus optional Gremlin / SPARQL
//! - [`GraphStore`] - Wraps a backend and memoizes its probed schemas
//! - [`NeptuneGraph`] - Object-safe surface over any `GraphStore`
//!
//! # Usage
//!
//! ```ignore
//! use neptune_mcp::graph::{Endpoint, GraphStore, NeptuneGraph, QueryExt};
//! use neptune_mcp::graph::backends::NeptuneDatabase;
//!
//! let db = NeptuneDatabase::connect(&host, &config).await?;
//!
//! // Rows keyed by column alias
//! let rows = db.query("MATCH (p:Person) RETURN p.name AS name LIMIT 5")
//!     .fetch_all()
//!     .await?;
//!
//! // Cached schema
//! let store = GraphStore::new(db);
//! let schema = store.lpg_schema().await?;
//! ```

mod cache;
pub mod document;
mod endpoint;
mod query;
mod row;
mod store;
mod traits;

pub mod backends;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::SchemaCache;
pub use endpoint::Endpoint;
pub use query::{Query, QueryExt};
pub use row::{rows_from_results, Params, Row};
pub use store::GraphStore;
pub use traits::{CypherExecutor, GraphBackend, NeptuneGraph};
