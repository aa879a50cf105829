//! Runtime for executing agents with dependency injection
//!
//! The AgentRuntime manages shared resources like the LLM provider and tool
//! registry, and provides factory methods for creating delegate agents.

use finagent_core::Result;
use finagent_llm::LLMProvider;
use finagent_tools::ToolRegistry;
use std::sync::Arc;

use crate::agents::DelegateAgent;
use crate::executor::{AgentExecutor, ExecutorConfig};

/// Configuration for the agent runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Default maximum iterations for tool-using agents
    pub default_max_iterations: usize,

    /// Default model to use
    pub default_model: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_max_iterations: 5,
            default_model: "llama-3.3-70b-versatile".to_string(),
        }
    }
}

/// Runtime for executing agents with dependency injection
///
/// The AgentRuntime manages shared resources (LLM provider, tool registry)
/// and provides factory methods for creating delegate agents. Each delegate
/// may also be built against its own registry so it only sees its own tool.
///
/// # Example
///
/// ```no_run
/// use finagent_runtime::{AgentRuntime, ExecutorConfig};
/// use std::sync::Arc;
///
/// # fn example(provider: Arc<dyn finagent_llm::LLMProvider>) -> finagent_core::Result<()> {
/// let runtime = AgentRuntime::builder()
///     .provider(provider)
///     .build()?;
///
/// let agent = runtime.create_delegate_agent(ExecutorConfig::default(), "finance");
/// # Ok(())
/// # }
/// ```
pub struct AgentRuntime {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: RuntimeConfig,
}

impl AgentRuntime {
    /// Create a new agent runtime
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Create a new runtime builder
    pub fn builder() -> AgentRuntimeBuilder {
        AgentRuntimeBuilder::new()
    }

    /// Get a reference to the LLM provider
    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// Get a reference to the tool registry
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Get a reference to the runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Create a delegate agent using the runtime's shared tool registry
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the executor
    /// * `name` - Name of the agent
    pub fn create_delegate_agent(
        &self,
        config: ExecutorConfig,
        name: impl Into<String>,
    ) -> DelegateAgent {
        let executor =
            AgentExecutor::new(self.provider.clone(), self.tool_registry.clone(), config);
        DelegateAgent::new(executor, name)
    }

    /// Create a delegate agent bound to its own tool registry
    ///
    /// Delegates in this system each see exactly one tool; giving each its
    /// own registry keeps a delegate from calling another delegate's tool.
    pub fn create_delegate_agent_with_tools(
        &self,
        config: ExecutorConfig,
        registry: Arc<ToolRegistry>,
        name: impl Into<String>,
    ) -> DelegateAgent {
        let executor = AgentExecutor::new(self.provider.clone(), registry, config);
        DelegateAgent::new(executor, name)
    }
}

/// Builder for AgentRuntime
pub struct AgentRuntimeBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Option<Arc<ToolRegistry>>,
    config: RuntimeConfig,
}

impl AgentRuntimeBuilder {
    /// Create a new runtime builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: None,
            config: RuntimeConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    /// Set the runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default max iterations
    pub fn default_max_iterations(mut self, max: usize) -> Self {
        self.config.default_max_iterations = max;
        self
    }

    /// Set the default model
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    /// Build the runtime
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is not set
    pub fn build(self) -> Result<AgentRuntime> {
        let provider = self.provider.ok_or_else(|| {
            finagent_core::Error::InitializationFailed("Provider not set".to_string())
        })?;

        let tool_registry = self
            .tool_registry
            .unwrap_or_else(|| Arc::new(ToolRegistry::new()));

        Ok(AgentRuntime::new(provider, tool_registry, self.config))
    }
}

impl Default for AgentRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finagent_llm::{CompletionRequest, CompletionResponse};

    struct MockProvider;

    #[async_trait::async_trait]
    impl LLMProvider for MockProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> finagent_llm::Result<CompletionResponse> {
            Err(finagent_llm::LLMError::RequestFailed("mock".to_string()))
        }
        fn name(&self) -> &str {
            "mock"
        }
    }

    #[test]
    fn test_runtime_config_default() {
        let config = RuntimeConfig::default();
        assert_eq!(config.default_max_iterations, 5);
        assert_eq!(config.default_model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_runtime_builder() {
        let builder = AgentRuntimeBuilder::new()
            .default_max_iterations(3)
            .default_model("test-model");

        assert_eq!(builder.config.default_max_iterations, 3);
        assert_eq!(builder.config.default_model, "test-model");
    }

    #[test]
    fn test_build_requires_provider() {
        let result = AgentRuntime::builder().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_with_provider() {
        use finagent_core::Agent;

        let runtime = AgentRuntime::builder()
            .provider(Arc::new(MockProvider))
            .build()
            .unwrap();

        assert!(runtime.tools().is_empty());

        let agent = runtime.create_delegate_agent(ExecutorConfig::default(), "finance");
        assert_eq!(agent.name(), "finance");
    }
}
