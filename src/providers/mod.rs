//! LLM provider abstraction.
//!
//! [`LLMProvider`] is the seam between the agent loop and a hosted completion
//! endpoint. The only production implementation is
//! [`azure::AzureOpenAiProvider`]; tests substitute mock providers.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::session::Message;

pub mod azure;

pub use azure::AzureOpenAiProvider;

/// A tool surfaced to the LLM through the provider's function-calling API.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's arguments.
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, parameters: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }
}

/// Per-request generation options.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    pub fn total(&self) -> u32 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LLMToolCall {
    pub id: String,
    pub name: String,
    /// JSON-encoded arguments as returned by the model.
    pub arguments: String,
}

impl LLMToolCall {
    pub fn new(id: &str, name: &str, arguments: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }
}

/// One model response: text, requested tool calls, and optional usage.
#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub tool_calls: Vec<LLMToolCall>,
    pub usage: Option<Usage>,
}

impl LLMResponse {
    /// A plain text response with no tool calls.
    pub fn text(content: &str) -> Self {
        Self {
            content: content.to_string(),
            tool_calls: Vec::new(),
            usage: None,
        }
    }

    /// A response that requests tool invocations.
    pub fn with_tools(content: &str, tool_calls: Vec<LLMToolCall>) -> Self {
        Self {
            content: content.to_string(),
            tool_calls,
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A hosted chat-completion endpoint.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send a conversation plus tool definitions; return the model's turn.
    async fn chat(
        &self,
        messages: Vec<Message>,
        tools: Vec<ToolDefinition>,
        options: ChatOptions,
    ) -> Result<LLMResponse>;

    /// Short provider identifier for logging.
    fn name(&self) -> &str;

    /// Model the provider targets when none is chosen per call.
    fn default_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_response_has_no_tool_calls() {
        let response = LLMResponse::text("hello");
        assert!(!response.has_tool_calls());
        assert_eq!(response.content, "hello");
    }

    #[test]
    fn test_with_tools_response() {
        let response =
            LLMResponse::with_tools("", vec![LLMToolCall::new("c1", "team_info", "{}")]);
        assert!(response.has_tool_calls());
        assert_eq!(response.tool_calls[0].name, "team_info");
    }

    #[test]
    fn test_usage_total_saturates() {
        assert_eq!(Usage::new(10, 20).total(), 30);
        assert_eq!(Usage::new(u32::MAX, 1).total(), u32::MAX);
    }

    #[test]
    fn test_chat_options_builder() {
        let options = ChatOptions::new().with_max_tokens(512).with_temperature(0.2);
        assert_eq!(options.max_tokens, Some(512));
        assert_eq!(options.temperature, Some(0.2));
    }
}
