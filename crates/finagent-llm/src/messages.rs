//! Message types for LLM communication
//!
//! This module defines the core message types used for LLM interactions,
//! with support for tool use. Content is text-only: nothing in this system
//! sends or receives images.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// System message (handled separately in some providers)
    System,
}

/// Content block in a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content
    Text {
        /// Text content
        text: String,
    },

    /// Tool use request from assistant
    ToolUse {
        /// Unique ID for this tool use
        id: String,
        /// Tool name
        name: String,
        /// Tool input parameters (JSON)
        input: serde_json::Value,
    },

    /// Tool result from user
    ToolResult {
        /// ID of the tool use this is responding to
        tool_use_id: String,
        /// Result content
        content: String,
        /// Whether this is an error result
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

/// Message content: either simple text or structured blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),
    /// Structured content blocks
    Blocks(Vec<ContentBlock>),
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Message content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create a user message with tool result
    pub fn tool_result(tool_use_id: String, result: String) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Blocks(vec![ContentBlock::ToolResult {
                tool_use_id,
                content: result,
                is_error: None,
            }])),
        }
    }

    /// Create a user message with error tool result
    pub fn tool_error(tool_use_id: String, error: String) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Blocks(vec![ContentBlock::ToolResult {
                tool_use_id,
                content: error,
                is_error: Some(true),
            }])),
        }
    }

    /// Extract text content from the message (convenience method)
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Some(MessageContent::Text(s)) => Some(s),
            Some(MessageContent::Blocks(blocks)) => blocks.iter().find_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            }),
            None => None,
        }
    }

    /// Extract tool use requests from assistant messages
    pub fn tool_uses(&self) -> Vec<&ContentBlock> {
        match &self.content {
            Some(MessageContent::Blocks(blocks)) => blocks
                .iter()
                .filter(|b| matches!(b, ContentBlock::ToolUse { .. }))
                .collect(),
            _ => vec![],
        }
    }

    /// Check if this message contains any tool uses
    pub fn has_tool_uses(&self) -> bool {
        !self.tool_uses().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text(), Some("Hello"));
    }

    #[test]
    fn test_assistant_message() {
        let msg = Message::assistant("Hi there");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.text(), Some("Hi there"));
    }

    #[test]
    fn test_tool_result() {
        let msg = Message::tool_result("tool_123".to_string(), "result".to_string());
        assert_eq!(msg.role, Role::User);
        assert!(!msg.has_tool_uses());
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::user("Test");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.text(), Some("Test"));
    }

    #[test]
    fn test_tool_uses_extraction() {
        let msg = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![
                ContentBlock::Text {
                    text: "Looking that up".to_string(),
                },
                ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: "web_search".to_string(),
                    input: serde_json::json!({"query": "tesla news"}),
                },
            ])),
        };

        assert!(msg.has_tool_uses());
        assert_eq!(msg.tool_uses().len(), 1);
    }
}
