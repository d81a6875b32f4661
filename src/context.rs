//! Application context shared by the MCP server and CLI commands.

use std::sync::Arc;

use crate::config::Config;
use crate::services::{LazyNeptune, NeptuneServer};

/// Root application context.
#[derive(Clone)]
pub struct Context {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Neptune connection, made on first use.
    pub neptune: LazyNeptune,
}

impl Context {
    /// Creates a new context. Nothing connects until a tool needs the graph.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        Self {
            neptune: LazyNeptune::new(Arc::clone(&config)),
            config,
        }
    }

    /// Creates a context around an already-connected server.
    pub fn with_server(server: NeptuneServer) -> Self {
        Self {
            config: Arc::new(Config::default()),
            neptune: LazyNeptune::with_server(server),
        }
    }
}
