//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// A summarized result produced by an agent, together with the sources it
/// consulted.
///
/// Sources are opaque identifiers: result URLs for web lookups, quote-page
/// URLs for market data. They are carried verbatim so the caller can
/// attribute the summary without re-parsing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentReply {
    /// The agent's summary text (usually Markdown).
    pub content: String,

    /// Source identifiers cited while producing the summary, in the order
    /// they were first cited. May contain duplicates; deduplication is the
    /// consumer's concern.
    pub sources: Vec<String>,
}

impl AgentReply {
    /// Create a reply with no sources.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sources: Vec::new(),
        }
    }

    /// Create a reply with the given sources.
    pub fn with_sources(content: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            content: content.into(),
            sources,
        }
    }

    /// Whether the reply carries any usable text.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Core trait that all agents must implement
///
/// Input is kept as a plain `String` for flexibility; output is an
/// [`AgentReply`] because every agent in this system returns a *sourced*
/// summary, and the sources must flow up to whoever merges the replies.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return a sourced summary
    async fn process(&self, input: String, context: &mut Context) -> Result<AgentReply>;

    /// Get the agent's name
    fn name(&self) -> &str;
}
