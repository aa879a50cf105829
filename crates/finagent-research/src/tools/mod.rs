//! Tools exposed to the delegate agents

pub mod market_data;
pub mod web_search;

pub use market_data::MarketDataTool;
pub use web_search::WebSearchTool;
