//! Squad position filter tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::Result;
use crate::football::TeamService;
use crate::search;
use crate::tools::{data_unavailable, Tool, ToolOutput};

/// List a team's players in a given position.
pub struct PlayersByPositionTool {
    service: Arc<TeamService>,
}

impl PlayersByPositionTool {
    pub fn new(service: Arc<TeamService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for PlayersByPositionTool {
    fn name(&self) -> &str {
        "players_by_position"
    }

    fn description(&self) -> &str {
        "Find all players who play in a specific position (e.g. 'Goalkeeper', \
         'Defender', 'Midfielder', 'Forward') for a given Premier League team. \
         Use this when asked about players in a certain position on a team."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "team_name": {
                    "type": "string",
                    "description": "The team whose squad to filter"
                },
                "position": {
                    "type": "string",
                    "description": "Position to filter by; matched as a case-insensitive substring"
                }
            },
            "required": ["team_name", "position"]
        })
    }

    async fn execute(&self, args: Value) -> Result<ToolOutput> {
        let Some(team_name) = args.get("team_name").and_then(|v| v.as_str()) else {
            return Ok(ToolOutput::llm_only(
                "Error: 'team_name' is required".to_string(),
            ));
        };
        let Some(position) = args.get("position").and_then(|v| v.as_str()) else {
            return Ok(ToolOutput::llm_only(
                "Error: 'position' is required".to_string(),
            ));
        };

        let teams = match self.service.teams().await {
            Ok(teams) => teams,
            Err(e) => return Ok(data_unavailable(&e)),
        };

        debug!(%team_name, %position, "Position lookup");
        let players = search::players_by_position(&teams, team_name, position);
        if players.is_empty() {
            return Ok(ToolOutput::llm_only(format!(
                "No players found in position '{position}' for '{team_name}'."
            )));
        }

        let listed: Vec<Value> = players
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "nationality": p.nationality,
                    "date_of_birth": p.date_of_birth,
                    "age": p.age,
                })
            })
            .collect();

        let info = json!({
            "position": position,
            "count": listed.len(),
            "players": listed,
        });

        Ok(ToolOutput::llm_only(
            serde_json::to_string_pretty(&info).unwrap_or_default(),
        ))
    }
}
