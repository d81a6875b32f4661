//! openCypher result rows.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use crate::error::AppError;

/// Named openCypher parameters (`$name` in the query text).
pub type Params = HashMap<String, JsonValue>;

/// One entry of an openCypher `results` array, keyed by column alias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(Map<String, JsonValue>);

impl Row {
    /// Raw value of a column.
    pub fn column(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name)
    }

    /// Decodes a required column.
    ///
    /// ```ignore
    /// let from: Vec<String> = row.get("from")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, AppError> {
        match self.column(name) {
            Some(value) => decode(name, value),
            None => Err(AppError::Internal(format!("column not found: {}", name))),
        }
    }

    /// Decodes an optional column. Missing and `null` both give `None`.
    pub fn get_opt<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, AppError> {
        match self.column(name) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(value) => decode(name, value).map(Some),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, JsonValue>> for Row {
    fn from(columns: Map<String, JsonValue>) -> Self {
        Self(columns)
    }
}

fn decode<T: DeserializeOwned>(name: &str, value: &JsonValue) -> Result<T, AppError> {
    T::deserialize(value)
        .map_err(|e| AppError::Internal(format!("failed to deserialize '{}': {}", name, e)))
}

/// Splits an openCypher `results` value into rows.
///
/// `null` yields no rows. Anything other than an array of objects is an error.
pub fn rows_from_results(results: JsonValue) -> Result<Vec<Row>, AppError> {
    let items = match results {
        JsonValue::Null => return Ok(Vec::new()),
        JsonValue::Array(items) => items,
        other => {
            return Err(AppError::Internal(format!(
                "expected results to be an array, got {}",
                other
            )))
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            JsonValue::Object(columns) => Ok(Row(columns)),
            other => Err(AppError::Internal(format!(
                "expected result row to be an object, got {}",
                other
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: JsonValue) -> Row {
        rows_from_results(json!([value])).unwrap().remove(0)
    }

    #[test]
    fn test_get_label_list() {
        let row = row(json!({"from": ["Person"], "edge": "ACTED_IN"}));
        let from: Vec<String> = row.get("from").unwrap();
        assert_eq!(from, vec!["Person"]);
        assert_eq!(row.column("edge"), Some(&json!("ACTED_IN")));
    }

    #[test]
    fn test_missing_column() {
        let row = row(json!({}));
        assert!(row.is_empty());
        assert!(row.get::<String>("edge").is_err());
        assert_eq!(row.get_opt::<String>("edge").unwrap(), None);
    }

    #[test]
    fn test_null_column_is_none() {
        let row = row(json!({"props": null}));
        let props: Option<Map<String, JsonValue>> = row.get_opt("props").unwrap();
        assert_eq!(props, None);
    }

    #[test]
    fn test_wrong_type_is_error() {
        let row = row(json!({"edge": 5}));
        assert!(row.get_opt::<String>("edge").is_err());
    }

    #[test]
    fn test_rows_keep_order() {
        let rows = rows_from_results(json!([{"edge": "ACTED_IN"}, {"edge": "DIRECTED"}])).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get::<String>("edge").unwrap(), "DIRECTED");
    }

    #[test]
    fn test_null_results_are_empty() {
        assert!(rows_from_results(JsonValue::Null).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_results_fail() {
        assert!(rows_from_results(json!(1)).is_err());
        assert!(rows_from_results(json!([1])).is_err());
    }
}
