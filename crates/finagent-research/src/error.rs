//! Error types for financial research operations

use thiserror::Error;

/// Research-specific errors
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Query was empty or whitespace-only; nothing was invoked
    #[error("Please enter a query before submitting")]
    EmptyQuery,

    /// Web search provider failed
    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    /// Market data provider failed or symbol is invalid
    #[error("Market data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// LLM provider failure (credential, rate limit, inference)
    #[error("Model provider error: {0}")]
    Provider(#[from] finagent_llm::LLMError),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Convert ResearchError to finagent_core::Error
impl From<ResearchError> for finagent_core::Error {
    fn from(err: ResearchError) -> Self {
        finagent_core::Error::ProcessingFailed(err.to_string())
    }
}

/// Convert finagent_core::Error to ResearchError
impl From<finagent_core::Error> for ResearchError {
    fn from(err: finagent_core::Error) -> Self {
        ResearchError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResearchError::SearchUnavailable("timeout".to_string());
        assert_eq!(err.to_string(), "Search unavailable: timeout");

        let err = ResearchError::DataUnavailable {
            symbol: "AAPL".to_string(),
            reason: "no quote data".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Market data unavailable for AAPL: no quote data"
        );
    }

    #[test]
    fn test_error_conversion() {
        let research_err = ResearchError::EmptyQuery;
        let core_err: finagent_core::Error = research_err.into();

        match core_err {
            finagent_core::Error::ProcessingFailed(msg) => {
                assert!(msg.contains("enter a query"));
            }
            _ => panic!("Expected ProcessingFailed variant"),
        }
    }
}
