//! MCP tool implementations organized by domain.

pub mod query;
pub mod schema;
pub mod status;
