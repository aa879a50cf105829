//! Agent runtime for finagent-rs
//!
//! This crate wires an LLM provider and a tool registry into runnable
//! agents:
//!
//! - [`AgentExecutor`] runs the LLM ⇄ tool loop and accumulates the sources
//!   cited by tool outputs
//! - [`DelegateAgent`] wraps an executor behind the [`finagent_core::Agent`]
//!   trait
//! - [`AgentRuntime`] holds the shared provider and registry and builds
//!   delegate agents

pub mod agents;
pub mod executor;
pub mod runtime;

pub use agents::DelegateAgent;
pub use executor::{AgentExecutor, ExecutorConfig};
pub use runtime::{AgentRuntime, AgentRuntimeBuilder, RuntimeConfig};
