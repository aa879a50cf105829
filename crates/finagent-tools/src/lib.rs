//! Tool framework for finagent-rs
//!
//! Tools are the adapters agents use to reach the outside world. Every tool
//! returns a [`ToolOutput`]: a JSON payload plus the source identifiers
//! (URLs or ticker references) the payload came from, so the calling agent
//! can attribute what it summarizes.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{Tool, ToolOutput};
