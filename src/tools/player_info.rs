//! Player lookup tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::Result;
use crate::football::TeamService;
use crate::search;
use crate::tools::{data_unavailable, Tool, ToolOutput};

/// Fuzzy player lookup across every squad in the competition.
pub struct PlayerInfoTool {
    service: Arc<TeamService>,
}

impl PlayerInfoTool {
    pub fn new(service: Arc<TeamService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for PlayerInfoTool {
    fn name(&self) -> &str {
        "player_info"
    }

    fn description(&self) -> &str {
        "Get detailed information about a specific Premier League player by name: \
         team, position, date of birth, age, and nationality. \
         Use this when asked about a specific player."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "player_name": {
                    "type": "string",
                    "description": "The player's name as given by the user; variants and misspellings are tolerated"
                }
            },
            "required": ["player_name"]
        })
    }

    async fn execute(&self, args: Value) -> Result<ToolOutput> {
        let Some(query) = args.get("player_name").and_then(|v| v.as_str()) else {
            return Ok(ToolOutput::llm_only(
                "Error: 'player_name' is required".to_string(),
            ));
        };

        let teams = match self.service.teams().await {
            Ok(teams) => teams,
            Err(e) => return Ok(data_unavailable(&e)),
        };

        debug!(%query, "Player lookup");
        let Some((player, team)) = search::find_player(&teams, query) else {
            return Ok(ToolOutput::llm_only(format!(
                "No player found matching '{query}'."
            )));
        };

        let info = json!({
            "name": player.name,
            "team": team.name,
            "position": player.position,
            "date_of_birth": player.date_of_birth,
            "age": player.age,
            "nationality": player.nationality,
        });

        Ok(ToolOutput::llm_only(
            serde_json::to_string_pretty(&info).unwrap_or_default(),
        ))
    }
}
