//! Shared fixtures for tool tests: a two-team league behind a mock API.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{PitchsideError, Result};
use crate::football::model::{Player, Team};
use crate::football::{TeamService, TeamsApi};

fn player(id: u64, name: &str, position: &str, nationality: &str, dob: &str) -> Player {
    Player {
        id,
        name: name.to_string(),
        position: Some(position.to_string()),
        nationality: Some(nationality.to_string()),
        date_of_birth: Some(dob.to_string()),
        age: None,
    }
}

pub(crate) fn fixture_teams() -> Vec<Team> {
    vec![
        Team {
            id: 57,
            name: "Arsenal FC".to_string(),
            short_name: Some("Arsenal".to_string()),
            tla: Some("ARS".to_string()),
            founded: Some(1886),
            club_colors: Some("Red / White".to_string()),
            venue: Some("Emirates Stadium".to_string()),
            squad: vec![
                player(1, "Bukayo Saka", "Right Winger", "England", "2001-09-05"),
                player(2, "Gabriel Martinelli", "Left Winger", "Brazil", "2001-06-18"),
                player(3, "David Raya", "Goalkeeper", "Spain", "1995-09-15"),
            ],
        },
        Team {
            id: 66,
            name: "Manchester United FC".to_string(),
            short_name: Some("Man United".to_string()),
            tla: Some("MUN".to_string()),
            founded: Some(1878),
            club_colors: Some("Red / White".to_string()),
            venue: Some("Old Trafford".to_string()),
            squad: vec![
                player(
                    4,
                    "Bruno Fernandes",
                    "Attacking Midfield",
                    "Portugal",
                    "1994-09-08",
                ),
                player(5, "Lisandro Martínez", "Centre-Back", "Argentina", "1998-01-18"),
            ],
        },
    ]
}

struct FixtureApi;

#[async_trait]
impl TeamsApi for FixtureApi {
    async fn fetch_teams(&self) -> Result<Vec<Team>> {
        Ok(fixture_teams())
    }
}

struct FailingApi;

#[async_trait]
impl TeamsApi for FailingApi {
    async fn fetch_teams(&self) -> Result<Vec<Team>> {
        Err(PitchsideError::Api("connection refused".into()))
    }
}

/// A service that always serves the fixture league.
pub(crate) fn fixture_service() -> Arc<TeamService> {
    Arc::new(TeamService::new(Arc::new(FixtureApi), 24))
}

/// A service whose upstream is down and whose cache is cold.
pub(crate) fn failing_service() -> Arc<TeamService> {
    Arc::new(TeamService::new(Arc::new(FailingApi), 24))
}
