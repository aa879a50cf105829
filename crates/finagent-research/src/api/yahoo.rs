//! Yahoo Finance API client

use crate::error::{ResearchError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use yahoo_finance_api as yahoo;

const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; finagent/0.1)";

/// Stock quote data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjclose: f64,
}

/// Analyst recommendation summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub symbol: String,
    /// Mean rating on Yahoo's 1 (strong buy) to 5 (sell) scale
    pub mean_rating: Option<f64>,
    /// Rating key, e.g. "buy", "hold"
    pub rating_key: Option<String>,
    pub target_mean_price: Option<f64>,
    pub strong_buy: u64,
    pub buy: u64,
    pub hold: u64,
    pub sell: u64,
    pub strong_sell: u64,
}

/// Fundamental metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fundamentals {
    pub symbol: String,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub eps: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub total_revenue: Option<f64>,
}

/// Yahoo Finance API client
///
/// Quotes come from the chart endpoint via `yahoo_finance_api`; analyst
/// recommendations and fundamentals come from the quoteSummary endpoint.
/// Any provider failure surfaces as a single `DataUnavailable` condition;
/// no retries are attempted.
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    http: Client,
}

/// Canonical quote-page URL for a symbol, used as the source identifier
/// for market data
pub fn quote_page_url(symbol: &str) -> String {
    format!("https://finance.yahoo.com/quote/{}", symbol.to_uppercase())
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ResearchError::Config(e.to_string()))?;
        Ok(Self { http })
    }

    /// Get the latest quote for a symbol
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| data_unavailable(symbol, &e.to_string()))?;

        let response = provider
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| data_unavailable(symbol, &e.to_string()))?;

        let quote = response
            .last_quote()
            .map_err(|e| data_unavailable(symbol, &e.to_string()))?;

        Ok(Quote {
            symbol: symbol.to_uppercase(),
            timestamp: DateTime::from_timestamp(quote.timestamp as i64, 0)
                .unwrap_or_else(Utc::now),
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume: quote.volume,
            adjclose: quote.adjclose,
        })
    }

    /// Get analyst recommendations for a symbol
    pub async fn get_recommendations(&self, symbol: &str) -> Result<RecommendationSummary> {
        let result = self
            .quote_summary(symbol, "financialData,recommendationTrend")
            .await?;

        let financial = &result["financialData"];
        // The first trend entry is the current period ("0m")
        let trend = result["recommendationTrend"]["trend"]
            .as_array()
            .and_then(|t| t.first())
            .cloned()
            .unwrap_or(Value::Null);

        Ok(RecommendationSummary {
            symbol: symbol.to_uppercase(),
            mean_rating: raw_f64(&financial["recommendationMean"]),
            rating_key: financial["recommendationKey"]
                .as_str()
                .map(ToString::to_string),
            target_mean_price: raw_f64(&financial["targetMeanPrice"]),
            strong_buy: trend["strongBuy"].as_u64().unwrap_or(0),
            buy: trend["buy"].as_u64().unwrap_or(0),
            hold: trend["hold"].as_u64().unwrap_or(0),
            sell: trend["sell"].as_u64().unwrap_or(0),
            strong_sell: trend["strongSell"].as_u64().unwrap_or(0),
        })
    }

    /// Get fundamental metrics for a symbol
    pub async fn get_fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        let result = self
            .quote_summary(
                symbol,
                "price,summaryDetail,defaultKeyStatistics,financialData",
            )
            .await?;

        let price = &result["price"];
        let detail = &result["summaryDetail"];
        let stats = &result["defaultKeyStatistics"];
        let financial = &result["financialData"];

        Ok(Fundamentals {
            symbol: symbol.to_uppercase(),
            market_cap: raw_f64(&price["marketCap"]),
            trailing_pe: raw_f64(&detail["trailingPE"]),
            forward_pe: raw_f64(&stats["forwardPE"]),
            eps: raw_f64(&stats["trailingEps"]),
            dividend_yield: raw_f64(&detail["dividendYield"]),
            fifty_two_week_high: raw_f64(&detail["fiftyTwoWeekHigh"]),
            fifty_two_week_low: raw_f64(&detail["fiftyTwoWeekLow"]),
            total_revenue: raw_f64(&financial["totalRevenue"]),
        })
    }

    /// Fetch quoteSummary modules for a symbol
    async fn quote_summary(&self, symbol: &str, modules: &str) -> Result<Value> {
        let url = format!("{}/{}", QUOTE_SUMMARY_URL, symbol.to_uppercase());
        let response = self
            .http
            .get(&url)
            .query(&[("modules", modules)])
            .send()
            .await
            .map_err(|e| data_unavailable(symbol, &e.to_string()))?;

        if !response.status().is_success() {
            return Err(data_unavailable(
                symbol,
                &format!("HTTP error: {}", response.status()),
            ));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| data_unavailable(symbol, &e.to_string()))?;

        if let Some(error) = data["quoteSummary"]["error"].as_object() {
            let description = error
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("provider error");
            return Err(data_unavailable(symbol, description));
        }

        data["quoteSummary"]["result"]
            .as_array()
            .and_then(|r| r.first())
            .cloned()
            .ok_or_else(|| data_unavailable(symbol, "no result data"))
    }
}

fn data_unavailable(symbol: &str, reason: &str) -> ResearchError {
    ResearchError::DataUnavailable {
        symbol: symbol.to_uppercase(),
        reason: reason.to_string(),
    }
}

/// Extract a numeric field that Yahoo wraps as `{"raw": .., "fmt": ".."}`,
/// also accepting a bare number
fn raw_f64(value: &Value) -> Option<f64> {
    value["raw"].as_f64().or_else(|| value.as_f64())
}
