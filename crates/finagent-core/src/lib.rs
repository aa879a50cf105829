//! Core abstractions for finagent-rs
//!
//! This crate defines the fundamental traits and types used throughout the
//! finagent research team: the [`Agent`] trait, the sourced [`AgentReply`]
//! every agent produces, the [`Context`] passed through an invocation, and
//! the core [`Error`] type.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::{Agent, AgentReply};
pub use context::Context;
pub use error::{Error, Result};
