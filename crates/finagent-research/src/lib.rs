//! Financial research agent team
//!
//! This crate wires a team of LLM-backed agents behind an interactive
//! shell for financial research:
//!
//! - A web-search delegate, bound to a DuckDuckGo search tool, summarizes
//!   news and market context with cited sources
//! - A finance delegate, bound to a Yahoo Finance market-data tool, reports
//!   prices, analyst recommendations, and fundamentals
//! - A coordinating team agent routes each query to the relevant subset of
//!   delegates, runs them concurrently, and merges their sourced summaries
//!   into one Markdown response with a deduplicated Sources section
//!
//! Routing is an explicit, deterministic strategy function (see [`router`])
//! rather than a model call, so delegate selection is unit-testable.
//!
//! # Example
//!
//! ```rust,ignore
//! use finagent_research::{ResearchTeamAgent, TeamConfig};
//! use finagent_runtime::AgentRuntime;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(finagent_llm::providers::GroqProvider::from_env()?);
//!     let runtime = AgentRuntime::builder().provider(provider).build()?;
//!     let config = Arc::new(TeamConfig::default());
//!
//!     let team = ResearchTeamAgent::new(&runtime, config)?;
//!     let response = team.research("AAPL price today").await?;
//!     println!("{}", response.render());
//!
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod prompts;
pub mod response;
pub mod router;
pub mod shell;
pub mod tools;

// Re-export main types for convenience
pub use agents::{FinanceAgent, ResearchTeamAgent, WebSearchAgent};
pub use config::TeamConfig;
pub use error::{ResearchError, Result};
pub use response::{NO_RESULTS_MESSAGE, Response};
pub use router::{DelegateId, RoutePlan, route};
pub use shell::{Shell, ShellState};
