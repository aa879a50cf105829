//! Coordinating agent that routes queries to delegates and merges replies

use finagent_core::{Agent, AgentReply, Context, Result as CoreResult};
use finagent_runtime::AgentRuntime;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use super::{FinanceAgent, WebSearchAgent};
use crate::config::TeamConfig;
use crate::error::{ResearchError, Result};
use crate::response::Response;
use crate::router::{DelegateId, route};

/// Section title for the finance delegate's contribution
const MARKET_SECTION: &str = "Market Data";
/// Section title for the search delegate's contribution
const WEB_SECTION: &str = "Web Findings";

/// Coordinating agent for the financial research team
///
/// Routes each query to the relevant subset of delegates via the explicit
/// strategy in [`crate::router`], invokes them concurrently, and merges
/// their sourced summaries into one [`Response`]. The finance delegate is
/// authoritative for numeric market data, so its section always renders
/// first when present.
pub struct ResearchTeamAgent {
    search: Arc<dyn Agent>,
    finance: Arc<dyn Agent>,
}

impl ResearchTeamAgent {
    /// Create the team with its real delegates
    pub fn new(runtime: &AgentRuntime, config: Arc<TeamConfig>) -> Result<Self> {
        let search = Arc::new(WebSearchAgent::new(runtime, Arc::clone(&config))?);
        let finance = Arc::new(FinanceAgent::new(runtime, config)?);

        Ok(Self {
            search,
            finance,
        })
    }

    /// Create the team from explicit delegates
    ///
    /// Used by tests to inject scripted delegates.
    pub fn with_delegates(search: Arc<dyn Agent>, finance: Arc<dyn Agent>) -> Self {
        Self { search, finance }
    }

    /// Research a query end to end: route, invoke, merge
    pub async fn research(&self, query: &str) -> Result<Response> {
        if query.trim().is_empty() {
            return Err(ResearchError::EmptyQuery);
        }

        let plan = route(query);
        info!(delegates = plan.delegates.len(), "Dispatching query to delegates");

        let invocations = plan.delegates.iter().map(|id| {
            let agent = self.delegate(*id);
            let input = query.to_string();
            let symbols = plan.symbols.clone();
            async move {
                let mut ctx = Context::new().with_symbols(symbols);
                (*id, agent.process(input, &mut ctx).await)
            }
        });

        let results = join_all(invocations).await;

        let mut search_reply: Option<AgentReply> = None;
        let mut finance_reply: Option<AgentReply> = None;
        let mut response = Response::new();

        for (id, result) in results {
            match result {
                Ok(reply) => match id {
                    DelegateId::Search => search_reply = Some(reply),
                    DelegateId::Finance => finance_reply = Some(reply),
                },
                Err(e) => {
                    warn!(delegate = id.agent_name(), error = %e, "Delegate failed");
                    response.push_failure(capability_name(id));
                }
            }
        }

        // Finance is authoritative for numbers and renders first
        if let Some(reply) = finance_reply {
            response.push_reply(MARKET_SECTION, reply);
        }
        if let Some(reply) = search_reply {
            response.push_reply(WEB_SECTION, reply);
        }

        Ok(response)
    }

    fn delegate(&self, id: DelegateId) -> &Arc<dyn Agent> {
        match id {
            DelegateId::Search => &self.search,
            DelegateId::Finance => &self.finance,
        }
    }
}

fn capability_name(id: DelegateId) -> &'static str {
    match id {
        DelegateId::Search => "web search",
        DelegateId::Finance => "market data",
    }
}

#[async_trait]
impl Agent for ResearchTeamAgent {
    async fn process(&self, input: String, _context: &mut Context) -> CoreResult<AgentReply> {
        let response = self.research(&input).await?;
        Ok(AgentReply::with_sources(
            response.render(),
            response.sources().to_vec(),
        ))
    }

    fn name(&self) -> &str {
        "ResearchTeamAgent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::NO_RESULTS_MESSAGE;
    use finagent_core::Context;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted delegate that counts its invocations
    struct ScriptedDelegate {
        name: &'static str,
        reply: CoreResult<AgentReply>,
        calls: AtomicUsize,
    }

    impl ScriptedDelegate {
        fn ok(name: &'static str, content: &str, sources: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply: Ok(AgentReply::with_sources(
                    content,
                    sources.iter().map(|s| (*s).to_string()).collect(),
                )),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                reply: Err(finagent_core::Error::ProcessingFailed(
                    "provider down".to_string(),
                )),
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Agent for ScriptedDelegate {
        async fn process(&self, _input: String, _ctx: &mut Context) -> CoreResult<AgentReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(e) => Err(finagent_core::Error::ProcessingFailed(e.to_string())),
            }
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    #[tokio::test]
    async fn test_empty_query_invokes_no_delegate() {
        let search = ScriptedDelegate::ok("search", "news", &[]);
        let finance = ScriptedDelegate::ok("finance", "numbers", &[]);
        let team = ResearchTeamAgent::with_delegates(search.clone(), finance.clone());

        let result = team.research("   ").await;
        assert!(matches!(result, Err(ResearchError::EmptyQuery)));
        assert_eq!(search.call_count(), 0);
        assert_eq!(finance.call_count(), 0);
    }

    #[tokio::test]
    async fn test_price_query_invokes_finance_only() {
        let search = ScriptedDelegate::ok("search", "news", &[]);
        let finance = ScriptedDelegate::ok(
            "finance",
            "AAPL closed at $201.50",
            &["https://finance.yahoo.com/quote/AAPL"],
        );
        let team = ResearchTeamAgent::with_delegates(search.clone(), finance.clone());

        let response = team.research("AAPL price today").await.unwrap();

        assert_eq!(finance.call_count(), 1);
        assert_eq!(search.call_count(), 0);
        let md = response.render();
        assert!(md.contains("$201.50"));
        assert!(md.contains("## Market Data"));
    }

    #[tokio::test]
    async fn test_news_query_does_not_touch_finance() {
        let search = ScriptedDelegate::ok(
            "search",
            "Tesla unveiled a new model",
            &["https://example.com/tesla"],
        );
        let finance = ScriptedDelegate::ok("finance", "fabricated price", &[]);
        let team = ResearchTeamAgent::with_delegates(search.clone(), finance.clone());

        let response = team.research("latest Tesla news").await.unwrap();

        assert_eq!(search.call_count(), 1);
        assert_eq!(finance.call_count(), 0);
        let md = response.render();
        assert!(md.contains("Tesla unveiled"));
        assert!(!md.contains("fabricated price"));
    }

    #[tokio::test]
    async fn test_finance_section_renders_before_web_findings() {
        let search = ScriptedDelegate::ok("search", "context", &[]);
        let finance = ScriptedDelegate::ok("finance", "numbers", &[]);
        let team = ResearchTeamAgent::with_delegates(search, finance);

        let response = team
            .research("latest news and stock price for NVDA")
            .await
            .unwrap();
        let md = response.render();

        let market = md.find("## Market Data").unwrap();
        let web = md.find("## Web Findings").unwrap();
        assert!(market < web);
    }

    #[tokio::test]
    async fn test_shared_source_is_deduplicated() {
        let shared = "https://finance.yahoo.com/quote/AAPL";
        let search = ScriptedDelegate::ok("search", "context", &[shared]);
        let finance = ScriptedDelegate::ok("finance", "numbers", &[shared]);
        let team = ResearchTeamAgent::with_delegates(search, finance);

        let response = team
            .research("latest news and stock price for AAPL")
            .await
            .unwrap();

        assert_eq!(response.sources(), &[shared.to_string()]);
    }

    #[tokio::test]
    async fn test_all_delegates_failing_yields_fallback_verbatim() {
        let search = ScriptedDelegate::failing("search");
        let finance = ScriptedDelegate::failing("finance");
        let team = ResearchTeamAgent::with_delegates(search, finance);

        let response = team
            .research("latest news and stock price for AAPL")
            .await
            .unwrap();

        assert!(!response.has_content());
        assert_eq!(response.render(), NO_RESULTS_MESSAGE);
    }

    #[tokio::test]
    async fn test_single_failure_is_noted_not_fatal() {
        let search = ScriptedDelegate::failing("search");
        let finance = ScriptedDelegate::ok("finance", "numbers", &[]);
        let team = ResearchTeamAgent::with_delegates(search, finance);

        let response = team
            .research("latest news and stock price for AAPL")
            .await
            .unwrap();
        let md = response.render();

        assert!(md.contains("numbers"));
        assert!(md.contains("web search was unavailable"));
    }

    #[tokio::test]
    async fn test_agent_trait_renders_markdown() {
        let search = ScriptedDelegate::ok("search", "news", &["https://example.com"]);
        let finance = ScriptedDelegate::ok("finance", "numbers", &[]);
        let team = ResearchTeamAgent::with_delegates(search, finance);

        let mut ctx = Context::new();
        let reply = team
            .process("latest AAPL stock news".to_string(), &mut ctx)
            .await
            .unwrap();

        assert!(reply.content.contains("## Sources"));
        assert_eq!(reply.sources, vec!["https://example.com".to_string()]);
    }
}
