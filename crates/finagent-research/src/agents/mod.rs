//! The research team's agents

mod finance;
mod team;
mod web_search;

pub use finance::FinanceAgent;
pub use team::ResearchTeamAgent;
pub use web_search::WebSearchAgent;
