//! DuckDuckGo search API client

use crate::error::{ResearchError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://api.duckduckgo.com/";

/// A single search result: a text snippet and the URL it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub snippet: String,
    pub url: String,
}

/// DuckDuckGo Instant Answer API client
///
/// Returns an ordered, finite sequence of (snippet, url) pairs for a text
/// query: the abstract first (when present), then related topics. Any
/// provider failure surfaces as a single `SearchUnavailable` condition; no
/// retries are attempted.
#[derive(Debug, Clone)]
pub struct DuckDuckGoClient {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

/// Related topics arrive either as leaf results or as named groups of
/// leaf results; both shapes carry the same (Text, FirstURL) payload.
/// Group must be tried first: every Leaf field is defaulted, so Leaf
/// matches any object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<TopicResult>,
    },
    Leaf(TopicResult),
}

#[derive(Debug, Deserialize)]
struct TopicResult {
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "FirstURL", default)]
    first_url: String,
}

impl DuckDuckGoClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResearchError::SearchUnavailable(e.to_string()))?;
        Ok(Self { client })
    }

    /// Search for a query, returning at most `limit` hits
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| ResearchError::SearchUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResearchError::SearchUnavailable(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let answer: InstantAnswer = response
            .json()
            .await
            .map_err(|e| ResearchError::SearchUnavailable(e.to_string()))?;

        Ok(Self::collect_hits(answer, limit))
    }

    /// Flatten an instant answer into ordered hits
    fn collect_hits(answer: InstantAnswer, limit: usize) -> Vec<SearchHit> {
        let mut hits = Vec::new();

        if !answer.abstract_text.is_empty() && !answer.abstract_url.is_empty() {
            hits.push(SearchHit {
                snippet: answer.abstract_text,
                url: answer.abstract_url,
            });
        }

        for topic in answer.related_topics {
            match topic {
                RelatedTopic::Leaf(result) => push_result(&mut hits, result),
                RelatedTopic::Group { topics } => {
                    for result in topics {
                        push_result(&mut hits, result);
                    }
                }
            }
        }

        hits.truncate(limit);
        hits
    }
}

fn push_result(hits: &mut Vec<SearchHit>, result: TopicResult) {
    if !result.text.is_empty() && !result.first_url.is_empty() {
        hits.push(SearchHit {
            snippet: result.text,
            url: result.first_url,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> InstantAnswer {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_abstract_becomes_first_hit() {
        let answer = parse(
            r#"{
                "AbstractText": "Tesla, Inc. is an American electric vehicle company.",
                "AbstractURL": "https://en.wikipedia.org/wiki/Tesla,_Inc.",
                "RelatedTopics": [
                    {"Text": "Tesla Model 3", "FirstURL": "https://duckduckgo.com/Tesla_Model_3"}
                ]
            }"#,
        );

        let hits = DuckDuckGoClient::collect_hits(answer, 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://en.wikipedia.org/wiki/Tesla,_Inc.");
        assert_eq!(hits[1].url, "https://duckduckgo.com/Tesla_Model_3");
    }

    #[test]
    fn test_grouped_topics_are_flattened() {
        let answer = parse(
            r#"{
                "AbstractText": "",
                "AbstractURL": "",
                "RelatedTopics": [
                    {
                        "Name": "Companies",
                        "Topics": [
                            {"Text": "A", "FirstURL": "https://example.com/a"},
                            {"Text": "B", "FirstURL": "https://example.com/b"}
                        ]
                    }
                ]
            }"#,
        );

        let hits = DuckDuckGoClient::collect_hits(answer, 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].snippet, "A");
    }

    #[test]
    fn test_limit_is_applied() {
        let answer = parse(
            r#"{
                "AbstractText": "",
                "AbstractURL": "",
                "RelatedTopics": [
                    {"Text": "A", "FirstURL": "https://example.com/a"},
                    {"Text": "B", "FirstURL": "https://example.com/b"},
                    {"Text": "C", "FirstURL": "https://example.com/c"}
                ]
            }"#,
        );

        let hits = DuckDuckGoClient::collect_hits(answer, 2);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_entries_without_url_are_skipped() {
        let answer = parse(
            r#"{
                "AbstractText": "orphan text",
                "AbstractURL": "",
                "RelatedTopics": [
                    {"Text": "no url", "FirstURL": ""}
                ]
            }"#,
        );

        let hits = DuckDuckGoClient::collect_hits(answer, 10);
        assert!(hits.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_search() {
        let client = DuckDuckGoClient::new(Duration::from_secs(30)).unwrap();
        let hits = client.search("Tesla Inc", 5).await.unwrap();
        assert!(!hits.is_empty());
    }
}
