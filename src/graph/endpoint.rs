//! Endpoint grammar: `neptune-db://<host>[/]` or `neptune-graph://<graph-id>[/]`.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

const DATABASE_SCHEME: &str = "neptune-db://";
const ANALYTICS_SCHEME: &str = "neptune-graph://";

/// A parsed Neptune endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Neptune Database cluster or instance host.
    Database { host: String },
    /// Neptune Analytics graph identifier.
    Analytics { graph_id: String },
}

impl FromStr for Endpoint {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AppError::InvalidEndpoint(
                "You must provide an endpoint to create a NeptuneServer".to_string(),
            ));
        }

        let invalid = || {
            AppError::InvalidEndpoint(format!(
                "Invalid endpoint '{}'. You must provide an endpoint as either \
                 neptune-db://<endpoint> or neptune-graph://<graphid>",
                s
            ))
        };

        let (is_database, rest) = if let Some(rest) = s.strip_prefix(DATABASE_SCHEME) {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix(ANALYTICS_SCHEME) {
            (false, rest)
        } else {
            return Err(invalid());
        };

        let id = rest.strip_suffix('/').unwrap_or(rest);
        if id.is_empty() || id.contains('/') {
            return Err(invalid());
        }

        Ok(if is_database {
            Endpoint::Database {
                host: id.to_string(),
            }
        } else {
            Endpoint::Analytics {
                graph_id: id.to_string(),
            }
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Database { host } => write!(f, "{}{}", DATABASE_SCHEME, host),
            Endpoint::Analytics { graph_id } => write!(f, "{}{}", ANALYTICS_SCHEME, graph_id),
        }
    }
}
