//! The Premier League agent: a tool-calling loop over an LLM provider.
//!
//! `Agent` holds a provider, the lookup tools, a grounding system prompt, and
//! persistent conversation history behind a `Mutex`. One user query produces
//! one agent turn, which executes tool calls sequentially until the model
//! answers in plain text (or the iteration cap is reached).

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{PitchsideError, Result};
use crate::providers::{ChatOptions, LLMProvider, ToolDefinition};
use crate::session::{Message, ToolCall};
use crate::tools::Tool;

const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Grounding rules: answers must come from tool output, never from the
/// model's general football knowledge.
const SYSTEM_PROMPT: &str = "\
You are a helpful assistant for Premier League information.

IMPORTANT RULES:
1. You MUST use the provided tools to get information about players, teams, and positions.
2. You should ONLY provide information that comes from the tool outputs.
3. Do NOT use your general knowledge about football - only use what the tools return.
4. If the tools don't return information about something, say so explicitly.
5. Always start your response by referencing what the tool found.
6. If asked about information not available in the tools (like recent news, transfers, \
current season performance, match results, league tables), clearly state that this \
information is not available in your data source.
7. Be helpful and try to suggest alternative searches if the initial search doesn't find results.
8. When presenting player or team information, format it in a clear, readable way.
9. If a user asks for multiple pieces of information, use the appropriate tools for each request.

Available information:
- Player details (name, position, nationality, age, team, date of birth)
- Team details (name, short name, TLA, venue, founding year, colors, squad)
- Players by team and position search

Your responses should be based EXCLUSIVELY on the tool outputs.";

/// Conversational agent over a provider and a set of tools.
pub struct Agent {
    provider: Arc<dyn LLMProvider>,
    tools: Vec<Box<dyn Tool>>,
    system_prompt: String,
    options: ChatOptions,
    max_iterations: usize,
    history: Mutex<Vec<Message>>,
}

impl Agent {
    /// Create a new builder.
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// The default Premier League grounding prompt.
    pub fn default_system_prompt() -> &'static str {
        SYSTEM_PROMPT
    }

    /// Send a user question and get the assistant's answer.
    ///
    /// History is maintained across calls. Tool calls are executed until the
    /// model returns a plain text response or the iteration cap is reached.
    pub async fn chat(&self, question: &str) -> Result<String> {
        let mut history = self.history.lock().await;

        history.push(Message::user(question));

        let mut messages = vec![Message::system(&self.system_prompt)];
        messages.extend(history.iter().cloned());

        let tool_defs: Vec<ToolDefinition> = self
            .tools
            .iter()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.parameters()))
            .collect();

        for _ in 0..self.max_iterations {
            let response = self
                .provider
                .chat(messages.clone(), tool_defs.clone(), self.options.clone())
                .await?;

            if !response.has_tool_calls() {
                history.push(Message::assistant(&response.content));
                return Ok(response.content);
            }

            let session_tool_calls: Vec<ToolCall> = response
                .tool_calls
                .iter()
                .map(|tc| ToolCall::new(&tc.id, &tc.name, &tc.arguments))
                .collect();

            let assistant_msg =
                Message::assistant_with_tools(&response.content, session_tool_calls);
            messages.push(assistant_msg.clone());
            history.push(assistant_msg);

            for tc in &response.tool_calls {
                let args: Value = serde_json::from_str(&tc.arguments).unwrap_or(Value::Null);
                debug!(tool = %tc.name, "Executing tool call");

                let result = if let Some(tool) = self.tools.iter().find(|t| t.name() == tc.name) {
                    match tool.execute(args).await {
                        Ok(output) => output.for_llm,
                        Err(e) => format!("Tool error: {e}"),
                    }
                } else {
                    warn!(tool = %tc.name, "Model requested an unknown tool");
                    format!("Unknown tool: {}", tc.name)
                };

                let tool_msg = Message::tool_result(&tc.id, &result);
                messages.push(tool_msg.clone());
                history.push(tool_msg);
            }
        }

        // Iteration cap reached without a plain answer.
        let cap_msg = "I've completed the requested lookups.".to_string();
        history.push(Message::assistant(&cap_msg));
        Ok(cap_msg)
    }

    /// Clear all conversation history.
    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
    }

    /// Number of messages in the conversation history.
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

/// Builder for [`Agent`].
pub struct AgentBuilder {
    provider: Option<Box<dyn LLMProvider>>,
    tools: Vec<Box<dyn Tool>>,
    system_prompt: Option<String>,
    options: ChatOptions,
    max_iterations: usize,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: Vec::new(),
            system_prompt: None,
            options: ChatOptions::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the LLM provider (required).
    pub fn provider(mut self, provider: impl LLMProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Add a single tool.
    pub fn tool(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    /// Override the system prompt (defaults to the Premier League rules).
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set per-request generation options.
    pub fn options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the maximum number of tool-call iterations per query.
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Build the [`Agent`]. Fails when no provider was set.
    pub fn build(self) -> Result<Agent> {
        let provider = self.provider.ok_or_else(|| {
            PitchsideError::Config(
                "Agent requires a provider. Call .provider() on the builder.".into(),
            )
        })?;

        Ok(Agent {
            provider: Arc::from(provider),
            tools: self.tools,
            system_prompt: self.system_prompt.unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
            options: self.options,
            max_iterations: self.max_iterations,
            history: Mutex::new(Vec::new()),
        })
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
