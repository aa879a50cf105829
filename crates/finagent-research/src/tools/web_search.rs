//! Tool for searching the web

use finagent_core::Result as AgentResult;
use finagent_tools::{Tool, ToolOutput};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::api::DuckDuckGoClient;
use crate::config::TeamConfig;

/// Tool for searching the web via DuckDuckGo
pub struct WebSearchTool {
    client: DuckDuckGoClient,
    config: Arc<TeamConfig>,
}

#[derive(Debug, Deserialize)]
struct WebSearchParams {
    query: String,
    #[serde(default)]
    max_results: Option<usize>,
}

impl WebSearchTool {
    /// Create a new web search tool
    pub fn new(client: DuckDuckGoClient, config: Arc<TeamConfig>) -> Self {
        Self { client, config }
    }

    async fn run_search(&self, params: WebSearchParams) -> crate::error::Result<ToolOutput> {
        let limit = params
            .max_results
            .unwrap_or(self.config.max_search_results)
            .min(self.config.max_search_results);

        let hits = self.client.search(&params.query, limit).await?;

        let sources: Vec<String> = hits.iter().map(|h| h.url.clone()).collect();
        let results: Vec<Value> = hits
            .iter()
            .map(|h| {
                json!({
                    "snippet": h.snippet,
                    "url": h.url,
                })
            })
            .collect();

        let content = json!({
            "query": params.query,
            "result_count": results.len(),
            "results": results,
        });

        Ok(ToolOutput::with_sources(content, sources))
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    async fn execute(&self, params: Value) -> AgentResult<ToolOutput> {
        let params: WebSearchParams = serde_json::from_value(params).map_err(|e| {
            finagent_core::Error::ProcessingFailed(format!("Invalid parameters: {e}"))
        })?;

        self.run_search(params)
            .await
            .map_err(|e| finagent_core::Error::ProcessingFailed(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "Search the web for current information, news, and market context. \
         Returns ranked result snippets with their source URLs."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Free-text search query"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results to return",
                    "default": 8
                }
            },
            "required": ["query"]
        })
    }
}
