//! Groq provider implementation
//!
//! This module implements the LLMProvider trait for Groq's hosted models.
//! Groq exposes an OpenAI-compatible chat-completions API, so the same
//! wire format works against any OpenAI-compatible endpoint via a custom
//! base URL. See: https://console.groq.com/docs/api-reference
//!
//! # Examples
//!
//! ## Basic usage with environment variable
//!
//! ```no_run
//! use finagent_llm::{CompletionRequest, Message, LLMProvider};
//! use finagent_llm::providers::GroqProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create provider from GROQ_API_KEY environment variable
//!     let provider = GroqProvider::from_env()?;
//!
//!     let request = CompletionRequest::builder("llama-3.3-70b-versatile")
//!         .add_message(Message::user("Hello!"))
//!         .max_tokens(100)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.message.text().unwrap());
//!
//!     Ok(())
//! }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMProvider, Message, MessageContent,
    Result, Role, StopReason, TokenUsage, ToolDefinition,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Groq provider
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (default: "https://api.groq.com/openai/v1")
    /// Can point at any OpenAI-compatible endpoint.
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl GroqConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GROQ_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `GROQ_API_KEY`. Optionally reads the base URL
    /// from `GROQ_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| {
            crate::LLMError::ConfigurationError(
                "GROQ_API_KEY environment variable not set".to_string(),
            )
        })?;

        let api_base =
            std::env::var("GROQ_API_BASE").unwrap_or_else(|_| DEFAULT_GROQ_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set a custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Groq provider
///
/// Supports Groq-hosted models including:
/// - llama-3.3-70b-versatile
/// - llama-3.1-8b-instant
/// - mixtral-8x7b-32768
pub struct GroqProvider {
    client: Client,
    config: GroqConfig,
}

impl GroqProvider {
    /// Create a new Groq provider with custom configuration
    pub fn with_config(config: GroqConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new Groq provider with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GroqConfig::new(api_key))
    }

    /// Create a provider from the `GROQ_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let config = GroqConfig::from_env()?;
        Self::with_config(config)
    }

    /// Get the current configuration
    pub fn config(&self) -> &GroqConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for GroqProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to Groq API at {}", self.config.api_base);

        // System prompt goes into the messages array for the OpenAI wire format
        let groq_messages = build_groq_messages(request.system.clone(), request.messages);
        let groq_tools = request.tools.as_ref().map(|tools| convert_tools(tools));

        let groq_request = GroqRequest {
            model: request.model.clone(),
            messages: groq_messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools: groq_tools,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&groq_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 => crate::LLMError::AuthenticationFailed,
                429 => crate::LLMError::RateLimitExceeded(error_text),
                400 => crate::LLMError::InvalidRequest(error_text),
                404 => crate::LLMError::ModelNotFound(request.model),
                _ => crate::LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let groq_response: GroqResponse = response.json().await.map_err(|e| {
            crate::LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        // Groq can return multiple choices but we use the first
        let choice = groq_response.choices.into_iter().next().ok_or_else(|| {
            crate::LLMError::UnexpectedResponse("No choices in response".to_string())
        })?;

        debug!(
            "Received response - stop_reason: {}, tokens: {}/{}",
            choice.finish_reason,
            groq_response.usage.prompt_tokens,
            groq_response.usage.completion_tokens
        );

        let message = parse_groq_response(choice.message)?;
        let stop_reason = map_stop_reason(&choice.finish_reason);

        Ok(CompletionResponse {
            message,
            stop_reason,
            usage: TokenUsage {
                input_tokens: groq_response.usage.prompt_tokens,
                output_tokens: groq_response.usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &'static str {
        "groq"
    }
}

// ============================================================================
// Wire format types (OpenAI-compatible)
// ============================================================================

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GroqTool>>,
}

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<GroqToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct GroqTool {
    #[serde(rename = "type")]
    tool_type: String,
    function: GroqFunction,
}

#[derive(Debug, Serialize)]
struct GroqFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct GroqToolCall {
    id: String,
    #[serde(rename = "type")]
    tool_type: String,
    function: GroqFunctionCall,
}

#[derive(Debug, Serialize)]
struct GroqFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
    usage: GroqUsage,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    #[allow(dead_code)]
    role: String,
    content: Option<String>,
    tool_calls: Option<Vec<GroqResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
struct GroqResponseToolCall {
    id: String,
    #[allow(dead_code)]
    #[serde(rename = "type")]
    tool_type: String,
    function: GroqResponseFunctionCall,
}

#[derive(Debug, Deserialize)]
struct GroqResponseFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Build wire-format messages from our generic format
///
/// The system prompt becomes the first message in the array.
fn build_groq_messages(system: Option<String>, messages: Vec<Message>) -> Vec<GroqMessage> {
    let mut result = Vec::new();

    if let Some(sys) = system {
        result.push(GroqMessage {
            role: "system".to_string(),
            content: Some(sys),
            tool_calls: None,
            tool_call_id: None,
        });
    }

    for msg in messages {
        result.extend(convert_message(msg));
    }

    result
}

/// Convert a single message to wire format
///
/// This may return multiple messages (tool results become separate
/// messages with role="tool").
fn convert_message(msg: Message) -> Vec<GroqMessage> {
    let role = match msg.role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    };

    match msg.content {
        Some(MessageContent::Text(text)) => {
            vec![GroqMessage {
                role: role.to_string(),
                content: Some(text),
                tool_calls: None,
                tool_call_id: None,
            }]
        }
        Some(MessageContent::Blocks(blocks)) => convert_blocks(role, blocks),
        None => {
            vec![GroqMessage {
                role: role.to_string(),
                content: Some(String::new()),
                tool_calls: None,
                tool_call_id: None,
            }]
        }
    }
}

/// Convert content blocks to wire-format messages
fn convert_blocks(role: &str, blocks: Vec<ContentBlock>) -> Vec<GroqMessage> {
    let mut messages = Vec::new();
    let mut text_content: Option<String> = None;
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => match &mut text_content {
                Some(existing) => {
                    existing.push('\n');
                    existing.push_str(&text);
                }
                None => text_content = Some(text),
            },
            ContentBlock::ToolUse { id, name, input } => {
                // Tool uses go in the tool_calls array
                let arguments = serde_json::to_string(&input).unwrap_or_default();
                tool_calls.push(GroqToolCall {
                    id,
                    tool_type: "function".to_string(),
                    function: GroqFunctionCall { name, arguments },
                });
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => {
                // Tool results become separate messages with role="tool"
                messages.push(GroqMessage {
                    role: "tool".to_string(),
                    content: Some(content),
                    tool_calls: None,
                    tool_call_id: Some(tool_use_id),
                });
            }
        }
    }

    if text_content.is_some() || !tool_calls.is_empty() {
        messages.insert(
            0,
            GroqMessage {
                role: role.to_string(),
                content: text_content,
                tool_calls: if tool_calls.is_empty() {
                    None
                } else {
                    Some(tool_calls)
                },
                tool_call_id: None,
            },
        );
    }

    messages
}

/// Convert tool definitions to wire format
fn convert_tools(tools: &[ToolDefinition]) -> Vec<GroqTool> {
    tools
        .iter()
        .map(|tool| GroqTool {
            tool_type: "function".to_string(),
            function: GroqFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.input_schema.clone(),
            },
        })
        .collect()
}

/// Parse a wire-format response message into our format
fn parse_groq_response(msg: GroqResponseMessage) -> Result<Message> {
    let mut blocks = Vec::new();

    if let Some(content) = msg.content {
        if !content.is_empty() {
            blocks.push(ContentBlock::Text { text: content });
        }
    }

    if let Some(tool_calls) = msg.tool_calls {
        for call in tool_calls {
            // Arguments arrive as a JSON string
            let input: serde_json::Value =
                serde_json::from_str(&call.function.arguments).map_err(|e| {
                    crate::LLMError::UnexpectedResponse(format!(
                        "Failed to parse tool arguments: {e}"
                    ))
                })?;

            blocks.push(ContentBlock::ToolUse {
                id: call.id,
                name: call.function.name,
                input,
            });
        }
    }

    if blocks.is_empty() {
        blocks.push(ContentBlock::Text {
            text: String::new(),
        });
    }

    Ok(Message {
        role: Role::Assistant,
        content: Some(MessageContent::Blocks(blocks)),
    })
}

/// Map an OpenAI-style finish reason to our format
fn map_stop_reason(reason: &str) -> StopReason {
    match reason {
        "stop" => StopReason::EndTurn,
        "length" => StopReason::MaxTokens,
        "tool_calls" => StopReason::ToolUse,
        _ => {
            debug!("Unknown stop reason: {}", reason);
            StopReason::EndTurn
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
