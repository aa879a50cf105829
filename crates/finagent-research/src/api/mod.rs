//! External API clients

pub mod duckduckgo;
pub mod yahoo;

pub use duckduckgo::{DuckDuckGoClient, SearchHit};
pub use yahoo::{Fundamentals, Quote, RecommendationSummary, YahooFinanceClient};
