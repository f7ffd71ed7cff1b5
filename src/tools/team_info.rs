//! Team lookup tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::Result;
use crate::football::TeamService;
use crate::search;
use crate::tools::{data_unavailable, Tool, ToolOutput};

/// Fuzzy team lookup: club details plus the full squad.
pub struct TeamInfoTool {
    service: Arc<TeamService>,
}

impl TeamInfoTool {
    pub fn new(service: Arc<TeamService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for TeamInfoTool {
    fn name(&self) -> &str {
        "team_info"
    }

    fn description(&self) -> &str {
        "Get detailed information about a specific Premier League team: stadium, \
         founding year, club colors, and the current squad. \
         Use this when asked about a specific team."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "team_name": {
                    "type": "string",
                    "description": "The team's name as given by the user; short names like 'Man United' are tolerated"
                }
            },
            "required": ["team_name"]
        })
    }

    async fn execute(&self, args: Value) -> Result<ToolOutput> {
        let Some(query) = args.get("team_name").and_then(|v| v.as_str()) else {
            return Ok(ToolOutput::llm_only(
                "Error: 'team_name' is required".to_string(),
            ));
        };

        let teams = match self.service.teams().await {
            Ok(teams) => teams,
            Err(e) => return Ok(data_unavailable(&e)),
        };

        debug!(%query, "Team lookup");
        let Some(team) = search::find_team(&teams, query) else {
            return Ok(ToolOutput::llm_only(format!(
                "No team found matching '{query}'."
            )));
        };

        let squad: Vec<Value> = team
            .squad
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "position": p.position,
                    "date_of_birth": p.date_of_birth,
                    "age": p.age,
                    "nationality": p.nationality,
                })
            })
            .collect();

        let info = json!({
            "name": team.name,
            "short_name": team.short_name,
            "tla": team.tla,
            "founded": team.founded,
            "club_colors": team.club_colors,
            "venue": team.venue,
            "squad": squad,
        });

        Ok(ToolOutput::llm_only(
            serde_json::to_string_pretty(&info).unwrap_or_default(),
        ))
    }
}
