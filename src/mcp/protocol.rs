//! MCP protocol response helpers.

use rmcp::model::{CallToolResult, Content};
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON format (default).
    #[default]
    Json,
    /// TOON (Token-Oriented Object Notation), more compact for large schemas.
    Toon,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "toon" => Ok(OutputFormat::Toon),
            other => Err(format!("unknown format '{}', expected json or toon", other)),
        }
    }
}

/// Renders a value as text in the requested format.
pub fn render<T: Serialize>(data: &T, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Toon => serde_toon::to_string(data)
            .map_err(|e| AppError::Internal(format!("TOON serialization error: {}", e))),
    }
}

/// Single-item response that serializes as the raw inner value.
///
/// # Example
///
/// ```ignore
/// Response::json(schema.as_ref()).into()        // JSON output (default)
/// Response(schema.as_ref(), Some(OutputFormat::Toon)).into()  // TOON output
/// ```
pub struct Response<T>(pub T, pub Option<OutputFormat>);

impl<T> Response<T> {
    /// Create a response with default (JSON) format.
    pub fn json(data: T) -> Self {
        Response(data, None)
    }
}

impl<T: Serialize> Serialize for Response<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T: Serialize> From<Response<T>> for Result<CallToolResult, rmcp::model::ErrorData> {
    fn from(response: Response<T>) -> Self {
        match response.1.unwrap_or_default() {
            OutputFormat::Json => {
                let value = serde_json::to_value(&response.0).map_err(AppError::from)?;
                Ok(CallToolResult::success(vec![Content::json(value)?]))
            }
            OutputFormat::Toon => {
                let text = render(&response.0, OutputFormat::Toon)?;
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("toon".parse::<OutputFormat>().unwrap(), OutputFormat::Toon);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_json() {
        let text = render(&serde_json::json!({"a": 1}), OutputFormat::Json).unwrap();
        assert!(text.contains("\"a\": 1"));
    }
}
