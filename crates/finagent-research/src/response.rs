//! Merged response assembly and Markdown rendering

use finagent_core::AgentReply;

/// Fixed message returned when no delegate produced a result
pub const NO_RESULTS_MESSAGE: &str =
    "No information found for this query. Please try rephrasing or ask about a specific stock.";

/// One named section of a merged response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// The merged answer assembled from delegate replies
///
/// Sections keep insertion order; sources are deduplicated by literal
/// string equality, first occurrence wins. Rendering is a pure function of
/// the struct's state: calling [`Response::render`] twice yields
/// byte-identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    sections: Vec<Section>,
    sources: Vec<String>,
    failures: Vec<String>,
}

impl Response {
    /// Create an empty response
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delegate's reply as a named section
    ///
    /// Replies with blank content are skipped entirely; their sources are
    /// not recorded either, since nothing in the document cites them.
    pub fn push_reply(&mut self, title: impl Into<String>, reply: AgentReply) {
        if reply.is_empty() {
            return;
        }

        self.sections.push(Section {
            title: title.into(),
            body: reply.content.trim().to_string(),
        });

        for source in reply.sources {
            if !self.sources.contains(&source) {
                self.sources.push(source);
            }
        }
    }

    /// Record a failed capability, e.g. "web search" or "market data"
    pub fn push_failure(&mut self, capability: impl Into<String>) {
        self.failures.push(capability.into());
    }

    /// Whether any delegate contributed content
    pub fn has_content(&self) -> bool {
        !self.sections.is_empty()
    }

    /// The deduplicated source list, in first-citation order
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Render the response as a Markdown document
    ///
    /// Sections appear in insertion order, followed by a note for each
    /// failed capability, followed by a `## Sources` list. When no section
    /// has content, the fixed fallback message is returned verbatim.
    pub fn render(&self) -> String {
        if !self.has_content() {
            return NO_RESULTS_MESSAGE.to_string();
        }

        let mut out = String::new();

        for section in &self.sections {
            out.push_str(&format!("## {}\n\n", section.title));
            out.push_str(&section.body);
            out.push_str("\n\n");
        }

        for capability in &self.failures {
            out.push_str(&format!(
                "> Note: {capability} was unavailable for this query.\n\n"
            ));
        }

        if !self.sources.is_empty() {
            out.push_str("## Sources\n\n");
            for source in &self.sources {
                out.push_str(&format!("- {source}\n"));
            }
        }

        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(content: &str, sources: &[&str]) -> AgentReply {
        AgentReply::with_sources(
            content,
            sources.iter().map(|s| (*s).to_string()).collect(),
        )
    }

    #[test]
    fn test_empty_response_renders_fallback_verbatim() {
        let response = Response::new();
        assert_eq!(response.render(), NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_failures_alone_still_render_fallback() {
        let mut response = Response::new();
        response.push_failure("web search");
        response.push_failure("market data");
        assert_eq!(response.render(), NO_RESULTS_MESSAGE);
    }

    #[test]
    fn test_sections_render_in_order() {
        let mut response = Response::new();
        response.push_reply("Market Data", reply("AAPL closed at $201.50", &[]));
        response.push_reply("Web Findings", reply("Apple launched a product", &[]));

        let md = response.render();
        let market_pos = md.find("## Market Data").unwrap();
        let web_pos = md.find("## Web Findings").unwrap();
        assert!(market_pos < web_pos);
    }

    #[test]
    fn test_sources_deduplicated_by_literal_equality() {
        let mut response = Response::new();
        response.push_reply(
            "Market Data",
            reply("numbers", &["https://finance.yahoo.com/quote/AAPL"]),
        );
        response.push_reply(
            "Web Findings",
            reply(
                "news",
                &[
                    "https://finance.yahoo.com/quote/AAPL",
                    "https://example.com/apple",
                ],
            ),
        );

        assert_eq!(
            response.sources(),
            &[
                "https://finance.yahoo.com/quote/AAPL".to_string(),
                "https://example.com/apple".to_string(),
            ]
        );

        let md = response.render();
        assert_eq!(md.matches("https://finance.yahoo.com/quote/AAPL").count(), 1);
    }

    #[test]
    fn test_blank_reply_is_skipped() {
        let mut response = Response::new();
        response.push_reply("Web Findings", reply("   \n", &["https://example.com"]));

        assert!(!response.has_content());
        assert!(response.sources().is_empty());
    }

    #[test]
    fn test_failure_note_names_capability() {
        let mut response = Response::new();
        response.push_reply("Market Data", reply("numbers", &[]));
        response.push_failure("web search");

        let md = response.render();
        assert!(md.contains("web search was unavailable"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut response = Response::new();
        response.push_reply(
            "Market Data",
            reply("AAPL closed at $201.50", &["https://finance.yahoo.com/quote/AAPL"]),
        );
        response.push_failure("web search");

        let first = response.render();
        let second = response.render();
        assert_eq!(first, second);
    }
}
