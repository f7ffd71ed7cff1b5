//! HTTP client for the football-data.org v4 REST API.
//!
//! [`TeamsApi`] is the injection seam between the cached [`super::TeamService`]
//! and the network; tests substitute mock implementations.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::FootballApiConfig;
use crate::error::{PitchsideError, Result};
use crate::football::model::{Team, TeamData};

/// Upstream source of team data.
#[async_trait]
pub trait TeamsApi: Send + Sync {
    /// Fetch all teams (with squads) for the configured competition.
    async fn fetch_teams(&self) -> Result<Vec<Team>>;
}

/// Wire format of the `competitions/{code}/teams` response.
#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<TeamData>,
}

/// reqwest-backed [`TeamsApi`] implementation.
pub struct FootballApiClient {
    base_url: String,
    competition: String,
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for FootballApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FootballApiClient")
            .field("base_url", &self.base_url)
            .field("competition", &self.competition)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl FootballApiClient {
    pub fn new(config: &FootballApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            competition: config.competition.clone(),
            api_key: config.api_key.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    fn teams_url(&self) -> String {
        format!("{}/competitions/{}/teams", self.base_url, self.competition)
    }

    /// Pull a readable message out of a football-data error body when present.
    ///
    /// The API reports errors as `{"message": "...", "errorCode": ...}`.
    fn parse_error_body(status: u16, body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v["message"]
                    .as_str()
                    .map(|msg| format!("football-data.org error (HTTP {status}): {msg}"))
            })
            .unwrap_or_else(|| format!("football-data.org error (HTTP {status}): {body}"))
    }
}

#[async_trait]
impl TeamsApi for FootballApiClient {
    async fn fetch_teams(&self) -> Result<Vec<Team>> {
        let url = self.teams_url();
        debug!(%url, "Fetching teams");

        let response = self
            .client
            .get(&url)
            .header("X-Auth-Token", &self.api_key)
            .send()
            .await
            .map_err(|e| PitchsideError::Api(format!("Request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PitchsideError::Api(Self::parse_error_body(status, &body)));
        }

        let parsed: TeamsResponse = response
            .json()
            .await
            .map_err(|e| PitchsideError::Api(format!("Invalid JSON response from {url}: {e}")))?;

        Ok(parsed.teams.into_iter().map(Team::from_api).collect())
    }
}
