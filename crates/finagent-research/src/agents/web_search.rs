//! Web search delegate agent

use finagent_core::{Agent, AgentReply, Context, Result};
use finagent_runtime::{AgentRuntime, DelegateAgent, ExecutorConfig};
use finagent_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

use crate::api::DuckDuckGoClient;
use crate::config::TeamConfig;
use crate::prompts::WEB_SEARCH_SYSTEM_PROMPT;
use crate::tools::WebSearchTool;

/// Delegate agent that searches the web and returns sourced summaries
///
/// Bound to exactly one tool via its own registry; keeps no state between
/// invocations.
pub struct WebSearchAgent {
    agent: DelegateAgent,
}

impl WebSearchAgent {
    /// Create a new web search agent
    pub fn new(
        runtime: &AgentRuntime,
        config: Arc<TeamConfig>,
    ) -> crate::error::Result<Self> {
        let client = DuckDuckGoClient::new(config.request_timeout)?;
        let tool = Arc::new(WebSearchTool::new(client, Arc::clone(&config)));

        let registry = Arc::new(ToolRegistry::new());
        registry.register(tool);

        let executor_config = ExecutorConfig {
            model: config.model.clone(),
            system_prompt: Some(WEB_SEARCH_SYSTEM_PROMPT.to_string()),
            max_tokens: config.max_tokens,
            temperature: Some(config.temperature),
            max_iterations: 3,
        };

        let agent =
            runtime.create_delegate_agent_with_tools(executor_config, registry, "web-search");

        Ok(Self { agent })
    }
}

#[async_trait]
impl Agent for WebSearchAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<AgentReply> {
        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "WebSearchAgent"
    }
}
