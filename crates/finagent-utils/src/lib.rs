//! Shared utilities for finagent-rs

pub mod logging;

pub use logging::init_tracing;
