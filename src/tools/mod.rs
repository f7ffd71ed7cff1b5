//! Agent tools: the lookups the LLM can invoke.
//!
//! Every tool shares the [`Tool`] trait and a handle to the cached
//! [`TeamService`](crate::football::TeamService). Lookup misses and upstream
//! failures are reported as readable strings in the tool output rather than
//! errors, so the agent can relay them to the user.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod player_info;
pub mod position;
pub mod team_info;

#[cfg(test)]
pub(crate) mod test_support;

pub use player_info::PlayerInfoTool;
pub use position::PlayersByPositionTool;
pub use team_info::TeamInfoTool;

/// Result of a tool execution, destined for the LLM.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Text fed back to the model as the tool-result message.
    pub for_llm: String,
}

impl ToolOutput {
    pub fn llm_only(for_llm: impl Into<String>) -> Self {
        Self {
            for_llm: for_llm.into(),
        }
    }
}

/// A function the LLM can call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable tool name surfaced to the model.
    fn name(&self) -> &str;

    /// Description shown to the LLM so it knows when to call this tool.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters(&self) -> Value;

    /// Run the tool with JSON arguments from the model.
    async fn execute(&self, args: Value) -> Result<ToolOutput>;
}

/// Shared phrasing for an unavailable data layer, so every tool reports the
/// same way and the model can relay it verbatim.
pub(crate) fn data_unavailable(err: &crate::error::PitchsideError) -> ToolOutput {
    ToolOutput::llm_only(format!(
        "Premier League data is currently unavailable ({err}). \
         Tell the user the data source cannot be reached right now."
    ))
}
