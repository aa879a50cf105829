//! Tool trait definition

use async_trait::async_trait;
use finagent_core::Result;
use serde_json::Value;

/// Output of a tool execution: a JSON payload plus the sources it cites.
///
/// Sources are opaque strings (result URLs, quote-page URLs). The executor
/// forwards the payload to the LLM and harvests the sources into the
/// agent's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Tool result payload (forwarded to the LLM as a tool result)
    pub content: Value,

    /// Source identifiers backing the payload, in citation order
    pub sources: Vec<String>,
}

impl ToolOutput {
    /// Create an output with no sources
    pub fn new(content: Value) -> Self {
        Self {
            content,
            sources: Vec::new(),
        }
    }

    /// Create an output with the given sources
    pub fn with_sources(content: Value, sources: Vec<String>) -> Self {
        Self { content, sources }
    }
}

/// Trait for tools that agents can execute
///
/// Tools are functions that LLM agents can call to interact with the world.
/// Each tool must provide a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output payload together with the sources it cites
    async fn execute(&self, params: Value) -> Result<ToolOutput>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry and match the name in ToolDefinition
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the LLM understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// Describes the parameters this tool expects. The LLM uses this schema
    /// to generate valid tool calls.
    fn input_schema(&self) -> Value;
}
