//! Azure OpenAI chat-completions provider with tool calling.
//!
//! Speaks the Azure-flavored OpenAI REST API: requests are routed to a
//! deployment (`/openai/deployments/{deployment}/chat/completions`),
//! authenticated with an `api-key` header, and versioned through the
//! `api-version` query parameter.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::AzureConfig;
use crate::error::{PitchsideError, Result};
use crate::providers::{ChatOptions, LLMProvider, LLMResponse, LLMToolCall, ToolDefinition, Usage};
use crate::session::{Message, Role};

/// Azure OpenAI provider.
pub struct AzureOpenAiProvider {
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: String,
    model_name: String,
    client: Client,
}

impl std::fmt::Debug for AzureOpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiProvider")
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("api_key", &"[REDACTED]")
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl AzureOpenAiProvider {
    /// Build a provider from validated configuration.
    pub fn from_config(config: &AzureConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            api_key: config.api_key.clone(),
            model_name: config.model_name.clone(),
            client: Self::build_client(),
        }
    }

    fn build_client() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to build HTTP client")
    }

    /// Deployment-routed completions URL, without the `api-version` query.
    fn api_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.deployment
        )
    }

    /// Build the request body from session messages, tool definitions, and
    /// generation options.
    pub fn build_request_body(
        messages: &[Message],
        tools: &[ToolDefinition],
        options: &ChatOptions,
    ) -> Value {
        let rendered: Vec<Value> = messages.iter().map(message_to_json).collect();
        let mut body = json!({ "messages": rendered });

        if !tools.is_empty() {
            let defs: Vec<Value> = tools
                .iter()
                .map(|t| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters,
                        }
                    })
                })
                .collect();
            body["tools"] = Value::Array(defs);
            body["tool_choice"] = json!("auto");
        }

        if let Some(max_tokens) = options.max_tokens {
            body["max_completion_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = options.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }

    /// Parse `choices[0].message` into text content and tool calls.
    ///
    /// `content` is null when the model answers purely with tool calls; both
    /// shapes are accepted.
    pub fn extract_message(response: &Value) -> (String, Vec<LLMToolCall>) {
        let message = &response["choices"][0]["message"];
        let content = message["content"].as_str().unwrap_or_default().to_string();

        let tool_calls = message["tool_calls"]
            .as_array()
            .map(|calls| {
                calls
                    .iter()
                    .filter_map(|call| {
                        let id = call["id"].as_str()?;
                        let name = call["function"]["name"].as_str()?;
                        let arguments = call["function"]["arguments"].as_str().unwrap_or("{}");
                        Some(LLMToolCall::new(id, name, arguments))
                    })
                    .collect()
            })
            .unwrap_or_default();

        (content, tool_calls)
    }

    fn extract_usage(response: &Value) -> Option<Usage> {
        let usage = response.get("usage")?;
        let prompt = usage["prompt_tokens"].as_u64()? as u32;
        let completion = usage["completion_tokens"].as_u64()? as u32;
        Some(Usage::new(prompt, completion))
    }

    /// Pull a readable message out of an Azure error body when present.
    pub fn parse_error_body(status: u16, body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v["error"]["message"]
                    .as_str()
                    .map(|msg| format!("Azure OpenAI error (HTTP {status}): {msg}"))
            })
            .unwrap_or_else(|| format!("Azure OpenAI error (HTTP {status}): {body}"))
    }
}

/// Render a session message in the OpenAI wire format.
fn message_to_json(message: &Message) -> Value {
    let role = match message.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    };

    let mut rendered = json!({ "role": role, "content": message.content });

    if !message.tool_calls.is_empty() {
        let calls: Vec<Value> = message
            .tool_calls
            .iter()
            .map(|tc| {
                json!({
                    "id": tc.id,
                    "type": "function",
                    "function": { "name": tc.name, "arguments": tc.arguments }
                })
            })
            .collect();
        rendered["tool_calls"] = Value::Array(calls);
    }

    if let Some(id) = &message.tool_call_id {
        rendered["tool_call_id"] = json!(id);
    }

    rendered
}

#[async_trait]
impl LLMProvider for AzureOpenAiProvider {
    async fn chat(
        &self,
        messages: Vec<Message>,
        tools: Vec<ToolDefinition>,
        options: ChatOptions,
    ) -> Result<LLMResponse> {
        let body = Self::build_request_body(&messages, &tools, &options);

        debug!(
            deployment = %self.deployment,
            messages = messages.len(),
            tools = tools.len(),
            "Azure OpenAI request"
        );

        let response = self
            .client
            .post(self.api_url())
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PitchsideError::Provider(format!("Azure OpenAI request failed: {e}")))?;

        if response.status().is_success() {
            let json: Value = response.json().await.map_err(|e| {
                PitchsideError::Provider(format!("Failed to parse Azure OpenAI response: {e}"))
            })?;

            let (content, tool_calls) = Self::extract_message(&json);
            let mut llm_response = LLMResponse::with_tools(&content, tool_calls);
            if let Some(usage) = Self::extract_usage(&json) {
                llm_response = llm_response.with_usage(usage);
            }
            return Ok(llm_response);
        }

        let status = response.status().as_u16();
        let error_text = response.text().await.unwrap_or_default();
        Err(PitchsideError::Provider(Self::parse_error_body(
            status,
            &error_text,
        )))
    }

    fn name(&self) -> &str {
        "azure-openai"
    }

    fn default_model(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ToolCall;

    fn provider() -> AzureOpenAiProvider {
        AzureOpenAiProvider::from_config(&AzureConfig {
            endpoint: "https://example.openai.azure.com/".into(),
            model_name: "gpt-5-mini".into(),
            deployment: "gpt-5-mini".into(),
            api_key: "secret".into(),
            api_version: "2024-12-01-preview".into(),
        })
    }

    #[test]
    fn test_api_url_routes_to_deployment() {
        assert_eq!(
            provider().api_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-5-mini/chat/completions"
        );
    }

    #[test]
    fn test_request_body_renders_messages() {
        let messages = vec![Message::system("rules"), Message::user("Who plays in goal?")];
        let body =
            AzureOpenAiProvider::build_request_body(&messages, &[], &ChatOptions::new());
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Who plays in goal?");
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_request_body_includes_tool_definitions() {
        let tools = vec![ToolDefinition::new(
            "team_info",
            "Look up a team",
            json!({"type": "object"}),
        )];
        let body = AzureOpenAiProvider::build_request_body(
            &[Message::user("hi")],
            &tools,
            &ChatOptions::new(),
        );
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "team_info");
        assert_eq!(body["tool_choice"], "auto");
    }

    #[test]
    fn test_request_body_sets_completion_cap() {
        let body = AzureOpenAiProvider::build_request_body(
            &[Message::user("hi")],
            &[],
            &ChatOptions::new().with_max_tokens(2048),
        );
        assert_eq!(body["max_completion_tokens"], 2048);
    }

    #[test]
    fn test_assistant_tool_calls_round_trip_to_wire_format() {
        let message = Message::assistant_with_tools(
            "",
            vec![ToolCall::new("c1", "player_info", r#"{"player_name":"Saka"}"#)],
        );
        let body = AzureOpenAiProvider::build_request_body(
            &[message],
            &[],
            &ChatOptions::new(),
        );
        let call = &body["messages"][0]["tool_calls"][0];
        assert_eq!(call["id"], "c1");
        assert_eq!(call["function"]["name"], "player_info");
    }

    #[test]
    fn test_tool_result_carries_call_id_on_wire() {
        let body = AzureOpenAiProvider::build_request_body(
            &[Message::tool_result("c1", "{\"name\":\"Bukayo Saka\"}")],
            &[],
            &ChatOptions::new(),
        );
        assert_eq!(body["messages"][0]["role"], "tool");
        assert_eq!(body["messages"][0]["tool_call_id"], "c1");
    }

    #[test]
    fn test_extract_plain_text_message() {
        let response = json!({
            "choices": [{ "message": { "role": "assistant", "content": "Arsenal play at the Emirates." } }]
        });
        let (content, tool_calls) = AzureOpenAiProvider::extract_message(&response);
        assert_eq!(content, "Arsenal play at the Emirates.");
        assert!(tool_calls.is_empty());
    }

    #[test]
    fn test_extract_tool_call_message_with_null_content() {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": { "name": "team_info", "arguments": "{\"team_name\":\"Arsenal\"}" }
                    }]
                }
            }]
        });
        let (content, tool_calls) = AzureOpenAiProvider::extract_message(&response);
        assert!(content.is_empty());
        assert_eq!(tool_calls.len(), 1);
        assert_eq!(tool_calls[0].id, "call_abc");
        assert_eq!(tool_calls[0].name, "team_info");
        assert!(tool_calls[0].arguments.contains("Arsenal"));
    }

    #[test]
    fn test_extract_usage() {
        let response = json!({
            "choices": [{ "message": { "content": "ok" } }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150 }
        });
        let usage = AzureOpenAiProvider::extract_usage(&response).unwrap();
        assert_eq!(usage.prompt_tokens, 120);
        assert_eq!(usage.completion_tokens, 30);
        assert_eq!(usage.total(), 150);
    }

    #[test]
    fn test_error_body_message_unwrapped() {
        let body = r#"{"error":{"code":"429","message":"Rate limit exceeded"}}"#;
        let rendered = AzureOpenAiProvider::parse_error_body(429, body);
        assert!(rendered.contains("HTTP 429"));
        assert!(rendered.contains("Rate limit exceeded"));
    }

    #[test]
    fn test_error_body_falls_back_to_raw_text() {
        let rendered = AzureOpenAiProvider::parse_error_body(502, "Bad Gateway");
        assert!(rendered.contains("Bad Gateway"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", provider());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
