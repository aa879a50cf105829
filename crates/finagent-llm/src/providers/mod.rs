//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait for
//! various LLM services.

#[cfg(feature = "groq")]
pub mod groq;

#[cfg(feature = "groq")]
pub use groq::{GroqConfig, GroqProvider};
