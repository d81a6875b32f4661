//! Application error types with MCP protocol conversion.

use rmcp::model::ErrorCode;
use thiserror::Error;

/// Application-level errors for the Neptune MCP server.
#[derive(Error, Debug)]
pub enum AppError {
    // Neptune errors
    #[error("{message} ({details})")]
    Neptune { message: String, details: String },

    #[error("Query error: {message}")]
    Query { message: String, query: String },

    #[error("{operation} is not supported by {backend}")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },

    // Domain errors
    #[error("Unexpected IRI '{0}', contains neither '#' nor '/'.")]
    InvalidIri(String),

    #[error("{0}")]
    InvalidEndpoint(String),

    // AWS errors
    #[error("Missing AWS region configuration")]
    MissingRegion,

    #[error("Could not load credentials to authenticate with AWS client: {0}")]
    Credentials(String),

    #[error("Request signing failed: {0}")]
    Signing(String),

    // Transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("{0}")]
    NotConfigured(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for a [`AppError::Neptune`] with a message and diagnostic details.
    pub fn neptune(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Neptune {
            message: message.into(),
            details: details.into(),
        }
    }
}

impl From<AppError> for rmcp::model::ErrorData {
    fn from(err: AppError) -> Self {
        let (code, app_code) = match &err {
            AppError::Neptune { .. } => (ErrorCode::INTERNAL_ERROR, "NEPTUNE_ERROR"),
            AppError::Query { .. } => (ErrorCode::INTERNAL_ERROR, "QUERY_ERROR"),
            AppError::Unsupported { .. } => (ErrorCode::INVALID_REQUEST, "UNSUPPORTED"),
            AppError::InvalidIri(_) => (ErrorCode::INVALID_PARAMS, "INVALID_IRI"),
            AppError::InvalidEndpoint(_) => (ErrorCode::INVALID_REQUEST, "INVALID_ENDPOINT"),
            AppError::MissingRegion => (ErrorCode::INTERNAL_ERROR, "MISSING_REGION"),
            AppError::Credentials(_) => (ErrorCode::INTERNAL_ERROR, "CREDENTIALS_ERROR"),
            AppError::Signing(_) => (ErrorCode::INTERNAL_ERROR, "SIGNING_ERROR"),
            AppError::Http(_) => (ErrorCode::INTERNAL_ERROR, "HTTP_ERROR"),
            AppError::Json(_) => (ErrorCode::INTERNAL_ERROR, "JSON_ERROR"),
            AppError::Config(_) => (ErrorCode::INTERNAL_ERROR, "CONFIG_ERROR"),
            AppError::NotConfigured(_) => (ErrorCode::INVALID_REQUEST, "NOT_CONFIGURED"),
            AppError::Internal(_) => (ErrorCode::INTERNAL_ERROR, "INTERNAL_ERROR"),
        };

        rmcp::model::ErrorData::new(code, format!("[{}] {}", app_code, err), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neptune_error_display_includes_details() {
        let err = AppError::neptune("Error executing SPARQL query", "MalformedQueryException");
        assert_eq!(
            err.to_string(),
            "Error executing SPARQL query (MalformedQueryException)"
        );
    }

    #[test]
    fn test_invalid_iri_message() {
        let err = AppError::InvalidIri("urn:example".to_string());
        assert_eq!(
            err.to_string(),
            "Unexpected IRI 'urn:example', contains neither '#' nor '/'."
        );
    }

    #[test]
    fn test_mcp_error_code_prefix() {
        let err = AppError::Unsupported {
            backend: "Neptune Analytics",
            operation: "Gremlin queries",
        };
        let data: rmcp::model::ErrorData = err.into();
        assert_eq!(data.code, ErrorCode::INVALID_REQUEST);
        assert_eq!(
            data.message,
            "[UNSUPPORTED] Gremlin queries is not supported by Neptune Analytics"
        );
    }
}
