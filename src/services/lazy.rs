//! Lazily-connected Neptune server handle.
//!
//! The MCP server starts before any graph is reachable; the connection is
//! made on the first tool or resource call and reused afterwards.

use std::sync::Arc;

use tokio::sync::OnceCell;

use super::NeptuneServer;
use crate::config::Config;
use crate::error::AppError;

/// Lazy-loaded [`NeptuneServer`] wrapper.
///
/// A failed connection attempt is not cached, so the next call retries.
///
/// # Example
///
/// ```ignore
/// let lazy = LazyNeptune::new(Arc::new(config));
/// let server = lazy.get().await?; // connects
/// let again = lazy.get().await?;  // reused
/// ```
#[derive(Clone)]
pub struct LazyNeptune {
    config: Arc<Config>,
    inner: Arc<OnceCell<NeptuneServer>>,
}

impl LazyNeptune {
    /// Create a new lazy handle. No connection is attempted until [`get`](Self::get).
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            inner: Arc::new(OnceCell::new()),
        }
    }

    /// Create a handle that is already connected.
    pub fn with_server(server: NeptuneServer) -> Self {
        Self {
            config: Arc::new(Config::default()),
            inner: Arc::new(OnceCell::new_with(Some(server))),
        }
    }

    /// Returns the server, connecting on first use.
    pub async fn get(&self) -> Result<&NeptuneServer, AppError> {
        self.inner
            .get_or_try_init(|| async {
                tracing::debug!("LazyNeptune: not connected, attempting connection");
                NeptuneServer::connect(&self.config).await
            })
            .await
    }

    /// Whether a connection has been made. Does not attempt to connect.
    pub fn is_connected(&self) -> bool {
        self.inner.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testing::ScriptedBackend;
    use crate::graph::GraphStore;
    use crate::models::GraphLabels;

    #[tokio::test]
    async fn test_failed_connect_not_cached() {
        let lazy = LazyNeptune::new(Arc::new(Config::default()));
        assert!(lazy.get().await.is_err());
        assert!(!lazy.is_connected());
        assert!(lazy.get().await.is_err());
    }

    #[tokio::test]
    async fn test_with_server_is_connected() {
        let server = NeptuneServer::from_graph(Arc::new(GraphStore::new(ScriptedBackend::new(
            GraphLabels::default(),
        ))));
        let lazy = LazyNeptune::with_server(server);
        assert!(lazy.is_connected());
        assert_eq!(lazy.get().await.unwrap().backend_name(), "Scripted");
    }
}
