//! Execution context for agents
//!
//! The `Context` struct is a flexible key-value store passed through one
//! query/response cycle. It never outlives a single interaction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Ticker symbols extracted from the user query
    pub const SYMBOLS: &str = "symbols";
    /// Response format preference (e.g., "markdown", "text")
    pub const RESPONSE_FORMAT: &str = "response_format";
}

/// Context passed to agents during execution
///
/// Supports both untyped JSON values and typed accessors for common fields.
///
/// # Example
///
/// ```
/// use finagent_core::Context;
///
/// let ctx = Context::new().with_symbols(vec!["AAPL".to_string()]);
/// assert_eq!(ctx.symbols(), vec!["AAPL".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Key-value storage for context data
    data: HashMap<String, serde_json::Value>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticker symbols extracted from the query
    pub fn with_symbols(mut self, symbols: Vec<String>) -> Self {
        self.insert(keys::SYMBOLS, serde_json::json!(symbols));
        self
    }

    /// Get the ticker symbols extracted from the query
    pub fn symbols(&self) -> Vec<String> {
        self.get(keys::SYMBOLS)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|s| s.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the response format preference
    pub fn response_format(&self) -> Option<&str> {
        self.get(keys::RESPONSE_FORMAT).and_then(|v| v.as_str())
    }

    /// Set the response format preference
    pub fn set_response_format(&mut self, format: impl Into<String>) {
        self.insert(keys::RESPONSE_FORMAT, serde_json::json!(format.into()));
    }

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Insert a typed value into the context
    ///
    /// Serializes the value to JSON before storing.
    pub fn insert_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> crate::Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            crate::Error::ProcessingFailed(format!("Failed to serialize context value: {e}"))
        })?;
        self.data.insert(key.into(), json_value);
        Ok(())
    }

    /// Get a typed value from the context
    ///
    /// Deserializes the JSON value into the specified type.
    pub fn get_typed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> crate::Result<Option<T>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(value) => {
                let typed = serde_json::from_value(value.clone()).map_err(|e| {
                    crate::Error::ProcessingFailed(format!(
                        "Failed to deserialize context value: {e}"
                    ))
                })?;
                Ok(Some(typed))
            }
        }
    }

    /// Check if a key exists in the context
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Get the number of entries in the context
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the context is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        value: i32,
        text: String,
    }

    #[test]
    fn test_basic_operations() {
        let mut ctx = Context::new();
        assert!(ctx.is_empty());

        ctx.insert("key", serde_json::json!("value"));
        assert_eq!(ctx.len(), 1);
        assert!(ctx.contains_key("key"));
        assert_eq!(ctx.get("key"), Some(&serde_json::json!("value")));
    }

    #[test]
    fn test_typed_insert_get() {
        let mut ctx = Context::new();
        let data = TestData {
            value: 42,
            text: "hello".to_string(),
        };

        ctx.insert_typed("test", &data).unwrap();

        let retrieved: TestData = ctx.get_typed("test").unwrap().unwrap();
        assert_eq!(retrieved, data);
    }

    #[test]
    fn test_symbols() {
        let ctx = Context::new().with_symbols(vec!["AAPL".to_string(), "TSLA".to_string()]);
        assert_eq!(ctx.symbols(), vec!["AAPL".to_string(), "TSLA".to_string()]);

        let empty = Context::new();
        assert!(empty.symbols().is_empty());
    }

    #[test]
    fn test_response_format() {
        let mut ctx = Context::new();
        assert!(ctx.response_format().is_none());

        ctx.set_response_format("markdown");
        assert_eq!(ctx.response_format(), Some("markdown"));
    }

    #[test]
    fn test_get_typed_missing_key() {
        let ctx = Context::new();
        let result: crate::Result<Option<TestData>> = ctx.get_typed("missing");
        assert!(result.unwrap().is_none());
    }
}
