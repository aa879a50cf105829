//! Query routing strategy
//!
//! Delegate selection is a deterministic function of the query text, not a
//! model call: keyword classification decides which delegates are relevant
//! and a regex pass extracts candidate ticker symbols.

use regex::Regex;
use std::sync::OnceLock;

/// Identifiers for the team's delegates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelegateId {
    /// Web search delegate (news, market context)
    Search,
    /// Finance delegate (quotes, recommendations, fundamentals)
    Finance,
}

impl DelegateId {
    /// Get the corresponding agent name for this delegate
    pub fn agent_name(&self) -> &'static str {
        match self {
            Self::Search => "web-search",
            Self::Finance => "finance",
        }
    }
}

/// Keywords for query classification
mod keywords {
    /// Terms that call for a web search
    pub const SEARCH: &[&str] = &[
        "news",
        "headline",
        "latest",
        "recent",
        "announcement",
        "happening",
        "search",
        "article",
        "press",
        "rumor",
        "trend",
    ];

    /// Terms that call for market data
    pub const FINANCE: &[&str] = &[
        "price",
        "quote",
        "stock",
        "share",
        "ticker",
        "fundamental",
        "p/e",
        "pe ratio",
        "market cap",
        "analyst",
        "recommendation",
        "dividend",
        "earnings",
        "eps",
        "valuation",
        "financials",
    ];
}

/// Words that look like ticker symbols but are not
const SYMBOL_STOPWORDS: &[&str] = &[
    "A", "I", "AI", "AM", "AN", "AND", "AS", "AT", "BE", "BUY", "BY", "CEO", "DO", "ETF", "FOR",
    "GDP", "IN", "IPO", "IS", "IT", "ME", "MY", "NYSE", "OF", "ON", "OR", "SELL", "SO", "THE",
    "TO", "UP", "US", "USA", "USD", "VS", "WHAT", "WHO", "WHY",
];

/// Result of routing a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    /// Delegates to invoke, in team order
    pub delegates: Vec<DelegateId>,
    /// Ticker symbols extracted from the query
    pub symbols: Vec<String>,
}

impl RoutePlan {
    /// Whether a delegate is part of this plan
    pub fn includes(&self, id: DelegateId) -> bool {
        self.delegates.contains(&id)
    }
}

/// Route a query to the relevant subset of delegates
///
/// News-only queries select the search delegate; price/ticker queries
/// select the finance delegate; mixed queries select both. A query with no
/// signal at all also selects both, so the team never silently ignores a
/// question it might be able to answer.
pub fn route(query: &str) -> RoutePlan {
    let lower = query.to_lowercase();
    let symbols = extract_symbols(query);

    let wants_search = matches_any(&lower, keywords::SEARCH);
    let wants_finance = matches_any(&lower, keywords::FINANCE) || !symbols.is_empty();

    let delegates = match (wants_search, wants_finance) {
        (true, false) => vec![DelegateId::Search],
        (false, true) => vec![DelegateId::Finance],
        _ => vec![DelegateId::Search, DelegateId::Finance],
    };

    tracing::debug!(
        query = %query,
        ?delegates,
        ?symbols,
        "Routed query"
    );

    RoutePlan { delegates, symbols }
}

/// Extract candidate US ticker symbols (1-5 uppercase letters) from a query
pub fn extract_symbols(query: &str) -> Vec<String> {
    static SYMBOL_RE: OnceLock<Regex> = OnceLock::new();
    let re = SYMBOL_RE
        .get_or_init(|| Regex::new(r"\b[A-Z]{1,5}\b").expect("symbol regex is valid"));

    let mut symbols: Vec<String> = Vec::new();
    for m in re.find_iter(query) {
        let candidate = m.as_str();
        if SYMBOL_STOPWORDS.contains(&candidate) {
            continue;
        }
        if !symbols.iter().any(|s| s == candidate) {
            symbols.push(candidate.to_string());
        }
    }
    symbols
}

fn matches_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| query.contains(kw))
}
