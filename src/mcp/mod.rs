//! Model Context Protocol (MCP) server for Amazon Neptune.
//!
//! Exposes graph status, schema introspection and query execution as MCP
//! tools and resources.
//!
//! ## Modules
//!
//! - `server`: MCP server implementation with tool router and resources
//! - `tools`: Tool implementations organized by domain
//! - `protocol`: Response formatting helpers

pub mod protocol;
pub(crate) mod server;
mod tools;

pub use server::McpServer;
