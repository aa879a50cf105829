//! Finance delegate agent

use finagent_core::{Agent, AgentReply, Context, Result};
use finagent_runtime::{AgentRuntime, DelegateAgent, ExecutorConfig};
use finagent_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;

use crate::api::YahooFinanceClient;
use crate::config::TeamConfig;
use crate::prompts::FINANCE_SYSTEM_PROMPT;
use crate::tools::MarketDataTool;

/// Delegate agent that reports stock prices, analyst recommendations, and
/// fundamentals
///
/// Bound to exactly one tool via its own registry; keeps no state between
/// invocations.
pub struct FinanceAgent {
    agent: DelegateAgent,
}

impl FinanceAgent {
    /// Create a new finance agent
    pub fn new(
        runtime: &AgentRuntime,
        config: Arc<TeamConfig>,
    ) -> crate::error::Result<Self> {
        let client = YahooFinanceClient::new(config.request_timeout)?;
        let tool = Arc::new(MarketDataTool::new(client));

        let registry = Arc::new(ToolRegistry::new());
        registry.register(tool);

        let executor_config = ExecutorConfig {
            model: config.model.clone(),
            system_prompt: Some(FINANCE_SYSTEM_PROMPT.to_string()),
            max_tokens: config.max_tokens,
            temperature: Some(config.temperature),
            max_iterations: 3,
        };

        let agent = runtime.create_delegate_agent_with_tools(executor_config, registry, "finance");

        Ok(Self { agent })
    }
}

#[async_trait]
impl Agent for FinanceAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<AgentReply> {
        // Mention extracted symbols so the model does not re-derive them
        let symbols = context.symbols();
        let input = if symbols.is_empty() {
            input
        } else {
            format!("{input}\n\nTicker symbols mentioned: {}", symbols.join(", "))
        };

        self.agent.process(input, context).await
    }

    fn name(&self) -> &str {
        "FinanceAgent"
    }
}
