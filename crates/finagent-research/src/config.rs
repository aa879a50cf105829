//! Configuration for the research team

use crate::error::{ResearchError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default watchlist for the shell's market overview
const DEFAULT_WATCHLIST: &[&str] = &["AAPL", "TSLA", "AMZN", "GOOGL", "NVDA"];

/// Configuration for the research team
///
/// Passed into the coordinating agent at construction; there is no
/// process-global configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Model id used by both delegates
    pub model: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Per-request timeout against external providers
    pub request_timeout: Duration,

    /// Maximum search results a web lookup may return
    pub max_search_results: usize,

    /// Symbols shown by the shell's market overview
    pub watchlist: Vec<String>,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            request_timeout: Duration::from_secs(30),
            max_search_results: 8,
            watchlist: DEFAULT_WATCHLIST.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl TeamConfig {
    /// Create a new configuration builder
    pub fn builder() -> TeamConfigBuilder {
        TeamConfigBuilder::default()
    }

    /// Override the model from the FINAGENT_MODEL environment variable
    pub fn from_env_model(mut self) -> Self {
        if let Ok(model) = std::env::var("FINAGENT_MODEL") {
            self.model = model;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ResearchError::Config("model must not be empty".to_string()));
        }

        if self.max_search_results == 0 {
            return Err(ResearchError::Config(
                "max_search_results must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for TeamConfig
#[derive(Debug, Default)]
pub struct TeamConfigBuilder {
    model: Option<String>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
    request_timeout: Option<Duration>,
    max_search_results: Option<usize>,
    watchlist: Option<Vec<String>>,
}

impl TeamConfigBuilder {
    /// Set the model id
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the search result cap
    pub fn max_search_results(mut self, max: usize) -> Self {
        self.max_search_results = Some(max);
        self
    }

    /// Set the market overview watchlist
    pub fn watchlist(mut self, symbols: Vec<String>) -> Self {
        self.watchlist = Some(symbols);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TeamConfig> {
        let defaults = TeamConfig::default();

        let config = TeamConfig {
            model: self.model.unwrap_or(defaults.model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            max_search_results: self
                .max_search_results
                .unwrap_or(defaults.max_search_results),
            watchlist: self.watchlist.unwrap_or(defaults.watchlist),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TeamConfig::default();
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.max_search_results, 8);
        assert_eq!(config.watchlist.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = TeamConfig::builder()
            .model("llama-3.1-8b-instant")
            .max_search_results(3)
            .request_timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.max_search_results, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation_rejects_empty_model() {
        let result = TeamConfig::builder().model("  ").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_results() {
        let result = TeamConfig::builder().max_search_results(0).build();
        assert!(result.is_err());
    }
}
