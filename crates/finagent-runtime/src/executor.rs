//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Call LLM with conversation history and available tools
//! 2. Check stop reason
//! 3. If tool use requested, execute tools and loop back
//! 4. If completed, return final response
//!
//! Every source cited by a tool output during the loop is accumulated and
//! returned with the final reply, so the caller can attribute the summary.

use finagent_core::{AgentReply, Result};
use finagent_llm::{
    CompletionRequest, ContentBlock, LLMProvider, Message, StopReason, ToolDefinition,
};
use finagent_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of iterations (prevents infinite loops)
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            model: "llama-3.3-70b-versatile".to_string(),
            system_prompt: None,
            max_tokens: 4096,
            temperature: Some(0.7),
        }
    }
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
///
/// The AgentExecutor orchestrates the interaction between an LLM provider
/// and a tool registry, implementing the agent loop pattern.
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Get the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute the agent loop with a user query
    ///
    /// # Arguments
    ///
    /// * `user_message` - The user's input message
    ///
    /// # Returns
    ///
    /// The final reply after all tool calls are complete, carrying every
    /// source the tools cited along the way.
    pub async fn run(&self, user_message: String) -> Result<AgentReply> {
        let mut conversation = vec![Message::user(user_message)];
        let mut sources: Vec<String> = Vec::new();
        let mut iteration = 0;

        loop {
            iteration += 1;
            if iteration > self.config.max_iterations {
                warn!(
                    "Max iterations ({}) reached, stopping",
                    self.config.max_iterations
                );
                return Ok(AgentReply::with_sources(
                    "Max iterations reached without completion",
                    sources,
                ));
            }

            info!(
                iteration = iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            // Build tool definitions from registry
            let tools = self.build_tool_definitions();
            debug!(tool_count = tools.len(), "Available tools");

            info!(
                model = %self.config.model,
                max_tokens = self.config.max_tokens,
                temperature = ?self.config.temperature,
                tool_count = tools.len(),
                "Sending request to LLM"
            );
            let mut request_builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .system(
                    self.config
                        .system_prompt
                        .clone()
                        .unwrap_or_else(|| "You are a helpful assistant.".to_string()),
                )
                .max_tokens(self.config.max_tokens)
                .temperature(self.config.temperature.unwrap_or(0.7));

            // Only add tools if we have any
            if !tools.is_empty() {
                request_builder = request_builder.tools(tools);
            }

            let request = request_builder.build();

            let response = self
                .provider
                .complete(request)
                .await
                .map_err(|e| finagent_core::Error::ProcessingFailed(e.to_string()))?;

            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );

            // Add assistant message to conversation
            conversation.push(response.message.clone());

            match response.stop_reason {
                StopReason::EndTurn => {
                    // Natural completion, extract text and return
                    let text = response.message.text().unwrap_or("No response").to_string();
                    info!(
                        iteration = iteration,
                        response_length = text.len(),
                        source_count = sources.len(),
                        "Agent completed naturally"
                    );
                    return Ok(AgentReply::with_sources(text, sources));
                }

                StopReason::ToolUse => {
                    // Extract and execute tool calls
                    let tool_uses = response.message.tool_uses();
                    info!(tool_count = tool_uses.len(), "Agent requested tool use");
                    let tool_results = self
                        .execute_tools(&response.message, &mut sources)
                        .await?;

                    if tool_results.is_empty() {
                        warn!("No tool results despite ToolUse stop reason");
                        return Ok(AgentReply::with_sources("Tool execution failed", sources));
                    }

                    info!(
                        result_count = tool_results.len(),
                        "Tool execution completed, continuing agent loop"
                    );

                    // Add tool results to conversation
                    for result in tool_results {
                        conversation.push(result);
                    }

                    continue;
                }

                StopReason::MaxTokens => {
                    warn!("Hit max tokens in LLM response");
                    let text = response.message.text().unwrap_or("").to_string();
                    return Ok(AgentReply::with_sources(text, sources));
                }
            }
        }
    }

    /// Build tool definitions from the registry
    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tool_registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Execute tool calls from an assistant message
    ///
    /// Sources cited by successful tool outputs are appended to `sources`
    /// in citation order.
    async fn execute_tools(
        &self,
        message: &Message,
        sources: &mut Vec<String>,
    ) -> Result<Vec<Message>> {
        let mut results = Vec::new();

        let tool_uses = message.tool_uses();
        info!(tool_count = tool_uses.len(), "Starting tool execution");

        for tool_use in tool_uses {
            if let ContentBlock::ToolUse { id, name, input } = tool_use {
                let input_preview: String = input.to_string().chars().take(500).collect();
                info!(
                    tool_name = %name,
                    tool_id = %id,
                    input_preview = %input_preview,
                    "Executing tool"
                );

                // Get tool from registry
                let tool = self.tool_registry.get(name).ok_or_else(|| {
                    finagent_core::Error::ProcessingFailed(format!("Tool not found: {name}"))
                })?;

                // Execute tool and measure time
                let start_time = std::time::Instant::now();
                match tool.execute(input.clone()).await {
                    Ok(output) => {
                        let duration_ms = start_time.elapsed().as_millis() as u64;
                        let result_str = serde_json::to_string(&output.content)
                            .unwrap_or_else(|_| output.content.to_string());

                        info!(
                            tool_name = %name,
                            duration_ms = duration_ms,
                            result_length = result_str.len(),
                            source_count = output.sources.len(),
                            "Tool execution succeeded"
                        );

                        sources.extend(output.sources);
                        results.push(Message::tool_result(id.clone(), result_str));
                    }
                    Err(e) => {
                        let duration_ms = start_time.elapsed().as_millis() as u64;
                        warn!(
                            tool_name = %name,
                            duration_ms = duration_ms,
                            error = %e,
                            "Tool execution failed"
                        );

                        // Return error as tool result so the LLM can react
                        results.push(Message::tool_error(id.clone(), format!("Error: {e}")));
                    }
                }
            }
        }

        Ok(results)
    }
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self.provider.ok_or_else(|| {
            finagent_core::Error::InitializationFailed("Provider not set".to_string())
        })?;

        Ok(AgentExecutor::new(
            provider,
            self.tool_registry,
            self.config,
        ))
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use finagent_llm::{CompletionResponse, MessageContent, Role, TokenUsage};
    use finagent_tools::{Tool, ToolOutput};
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Provider that plays back a scripted sequence of responses.
    struct ScriptedProvider {
        responses: Mutex<Vec<CompletionResponse>>,
    }

    impl ScriptedProvider {
        fn new(mut responses: Vec<CompletionResponse>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> finagent_llm::Result<CompletionResponse> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| finagent_llm::LLMError::RequestFailed("script empty".to_string()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct StaticTool;

    #[async_trait]
    impl Tool for StaticTool {
        async fn execute(&self, _params: Value) -> finagent_core::Result<ToolOutput> {
            Ok(ToolOutput::with_sources(
                json!({"price": 201.5}),
                vec!["https://finance.yahoo.com/quote/AAPL".to_string()],
            ))
        }

        fn name(&self) -> &str {
            "market_data"
        }

        fn description(&self) -> &str {
            "Static market data"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    fn end_turn(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        }
    }

    fn tool_call(name: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message {
                role: Role::Assistant,
                content: Some(MessageContent::Blocks(vec![ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: name.to_string(),
                    input: json!({"symbol": "AAPL"}),
                }])),
            },
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        }
    }

    #[tokio::test]
    async fn test_plain_completion() {
        let provider = Arc::new(ScriptedProvider::new(vec![end_turn("Done")]));
        let executor = AgentExecutor::new(
            provider,
            Arc::new(ToolRegistry::new()),
            ExecutorConfig::default(),
        );

        let reply = executor.run("hello".to_string()).await.unwrap();
        assert_eq!(reply.content, "Done");
        assert!(reply.sources.is_empty());
    }

    #[tokio::test]
    async fn test_tool_loop_collects_sources() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            tool_call("market_data"),
            end_turn("AAPL closed at $201.50"),
        ]));
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(StaticTool));

        let executor = AgentExecutor::new(provider, registry, ExecutorConfig::default());
        let reply = executor.run("AAPL price".to_string()).await.unwrap();

        assert_eq!(reply.content, "AAPL closed at $201.50");
        assert_eq!(
            reply.sources,
            vec!["https://finance.yahoo.com/quote/AAPL".to_string()]
        );
    }

    #[tokio::test]
    async fn test_max_iterations_stops_loop() {
        // Every response asks for another tool call; the loop must bail out
        let provider = Arc::new(ScriptedProvider::new(vec![
            tool_call("market_data"),
            tool_call("market_data"),
            tool_call("market_data"),
        ]));
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(StaticTool));

        let config = ExecutorConfig {
            max_iterations: 2,
            ..ExecutorConfig::default()
        };
        let executor = AgentExecutor::new(provider, registry, config);
        let reply = executor.run("AAPL price".to_string()).await.unwrap();

        assert!(reply.content.contains("Max iterations"));
        // Sources from completed iterations are still reported
        assert_eq!(reply.sources.len(), 2);
    }

    #[test]
    fn test_builder() {
        let builder = AgentExecutorBuilder::new()
            .model("test-model")
            .max_iterations(3)
            .system_prompt("Test prompt");

        assert_eq!(builder.config.model, "test-model");
        assert_eq!(builder.config.max_iterations, 3);
        assert_eq!(builder.config.system_prompt, Some("Test prompt".to_string()));
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.model, "llama-3.3-70b-versatile");
    }
}
