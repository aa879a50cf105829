//! Delegate agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use finagent_core::{Agent, AgentReply, Context, Result};
use async_trait::async_trait;

/// An agent that runs the LLM loop with tool execution
///
/// DelegateAgent wraps an AgentExecutor behind the Agent trait. Each
/// delegate is bound (via its executor's registry) to the tools it may
/// call, and keeps no state between invocations.
///
/// # Example
///
/// ```no_run
/// use finagent_runtime::{AgentRuntime, ExecutorConfig};
/// use finagent_core::{Agent, Context};
///
/// # async fn example(runtime: AgentRuntime) -> finagent_core::Result<()> {
/// let agent = runtime.create_delegate_agent(ExecutorConfig::default(), "web-search");
///
/// let mut context = Context::new();
/// let reply = agent.process("latest Tesla news".to_string(), &mut context).await?;
/// println!("{} cited {} sources", reply.content, reply.sources.len());
/// # Ok(())
/// # }
/// ```
pub struct DelegateAgent {
    executor: AgentExecutor,
    name: String,
}

impl DelegateAgent {
    /// Create a new delegate agent
    ///
    /// # Arguments
    ///
    /// * `executor` - The agent executor to wrap
    /// * `name` - Name of the agent
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for DelegateAgent {
    async fn process(&self, input: String, _context: &mut Context) -> Result<AgentReply> {
        self.executor.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
