//! openCypher statements bound to an executor.

use crate::error::AppError;
use crate::graph::row::{rows_from_results, Params, Row};
use crate::graph::traits::CypherExecutor;

/// An openCypher statement ready to run against one executor.
///
/// ```ignore
/// let rows = backend
///     .query("MATCH (a:`Person`) RETURN properties(a) AS props LIMIT 100")
///     .fetch_all()
///     .await?;
/// ```
pub struct Query<'a, E: CypherExecutor + ?Sized> {
    executor: &'a E,
    cypher: String,
}

impl<'a, E: CypherExecutor + ?Sized> Query<'a, E> {
    pub fn new(executor: &'a E, cypher: impl Into<String>) -> Self {
        Self {
            executor,
            cypher: cypher.into(),
        }
    }

    /// Runs the statement without parameters and splits `results` into rows.
    pub async fn fetch_all(self) -> Result<Vec<Row>, AppError> {
        tracing::trace!(cypher = %self.cypher, "openCypher");
        let results = self
            .executor
            .execute_cypher(&self.cypher, Params::new())
            .await?;
        rows_from_results(results)
    }
}

/// `executor.query(..)` shorthand for every [`CypherExecutor`].
pub trait QueryExt: CypherExecutor {
    fn query(&self, cypher: impl Into<String>) -> Query<'_, Self> {
        Query::new(self, cypher)
    }
}

impl<E: CypherExecutor + ?Sized> QueryExt for E {}
