//! Tool for fetching stock market data

use finagent_core::Result as AgentResult;
use finagent_tools::{Tool, ToolOutput};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::yahoo::quote_page_url;
use crate::api::YahooFinanceClient;
use crate::error::Result;

/// Metric category a market data request may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MetricCategory {
    Price,
    Recommendations,
    Fundamentals,
    All,
}

impl Default for MetricCategory {
    fn default() -> Self {
        Self::All
    }
}

#[derive(Debug, Deserialize)]
struct MarketDataParams {
    symbol: String,
    #[serde(default)]
    category: MetricCategory,
}

/// Tool for fetching stock price, analyst recommendation, and fundamental
/// data for a ticker symbol
pub struct MarketDataTool {
    client: YahooFinanceClient,
}

impl MarketDataTool {
    /// Create a new market data tool
    pub fn new(client: YahooFinanceClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, params: MarketDataParams) -> Result<ToolOutput> {
        let symbol = params.symbol.to_uppercase();
        let mut result = json!({ "symbol": symbol });

        if matches!(params.category, MetricCategory::Price | MetricCategory::All) {
            let quote = self.client.get_quote(&symbol).await?;
            result["price"] = json!({
                "timestamp": quote.timestamp.to_rfc3339(),
                "open": quote.open,
                "high": quote.high,
                "low": quote.low,
                "close": quote.close,
                "volume": quote.volume,
                "adjusted_close": quote.adjclose,
            });
        }

        if matches!(
            params.category,
            MetricCategory::Recommendations | MetricCategory::All
        ) {
            let recs = self.client.get_recommendations(&symbol).await?;
            result["recommendations"] = json!({
                "mean_rating": recs.mean_rating,
                "rating_key": recs.rating_key,
                "target_mean_price": recs.target_mean_price,
                "strong_buy": recs.strong_buy,
                "buy": recs.buy,
                "hold": recs.hold,
                "sell": recs.sell,
                "strong_sell": recs.strong_sell,
            });
        }

        if matches!(
            params.category,
            MetricCategory::Fundamentals | MetricCategory::All
        ) {
            let fundamentals = self.client.get_fundamentals(&symbol).await?;
            result["fundamentals"] = json!({
                "market_cap": fundamentals.market_cap,
                "trailing_pe": fundamentals.trailing_pe,
                "forward_pe": fundamentals.forward_pe,
                "eps": fundamentals.eps,
                "dividend_yield": fundamentals.dividend_yield,
                "fifty_two_week_high": fundamentals.fifty_two_week_high,
                "fifty_two_week_low": fundamentals.fifty_two_week_low,
                "total_revenue": fundamentals.total_revenue,
            });
        }

        Ok(ToolOutput::with_sources(
            result,
            vec![quote_page_url(&symbol)],
        ))
    }
}

#[async_trait]
impl Tool for MarketDataTool {
    async fn execute(&self, params: Value) -> AgentResult<ToolOutput> {
        let params: MarketDataParams = serde_json::from_value(params).map_err(|e| {
            finagent_core::Error::ProcessingFailed(format!("Invalid parameters: {e}"))
        })?;

        self.fetch(params)
            .await
            .map_err(|e| finagent_core::Error::ProcessingFailed(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "market_data"
    }

    fn description(&self) -> &'static str {
        "Fetch stock market data for a ticker symbol: current price quote, \
         analyst recommendations, and fundamental metrics."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g., 'AAPL', 'TSLA')"
                },
                "category": {
                    "type": "string",
                    "description": "Which metrics to fetch",
                    "enum": ["price", "recommendations", "fundamentals", "all"],
                    "default": "all"
                }
            },
            "required": ["symbol"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn make_tool() -> MarketDataTool {
        let client = YahooFinanceClient::new(Duration::from_secs(10)).unwrap();
        MarketDataTool::new(client)
    }

    #[test]
    fn test_tool_metadata() {
        let tool = make_tool();

        assert_eq!(tool.name(), "market_data");
        assert!(!tool.description().is_empty());

        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["symbol"].is_object());
    }

    #[test]
    fn test_category_parsing() {
        let params: MarketDataParams =
            serde_json::from_value(json!({"symbol": "AAPL", "category": "price"})).unwrap();
        assert_eq!(params.category, MetricCategory::Price);

        let params: MarketDataParams =
            serde_json::from_value(json!({"symbol": "AAPL"})).unwrap();
        assert_eq!(params.category, MetricCategory::All);
    }

    #[tokio::test]
    async fn test_invalid_params_rejected() {
        let tool = make_tool();
        let result = tool.execute(json!({"category": "price"})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_execute_price() {
        let tool = make_tool();
        let out = tool
            .execute(json!({"symbol": "AAPL", "category": "price"}))
            .await
            .unwrap();

        assert_eq!(out.content["symbol"], "AAPL");
        assert!(out.content["price"]["close"].as_f64().unwrap() > 0.0);
        assert_eq!(
            out.sources,
            vec!["https://finance.yahoo.com/quote/AAPL".to_string()]
        );
    }
}
