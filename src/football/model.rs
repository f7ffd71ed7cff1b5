//! Domain records for teams and players.
//!
//! Both are immutable value records built from football-data.org responses:
//! once constructed, nothing mutates them. A player's age is derived from the
//! date of birth at construction time.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Wire format of a squad member in the teams response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerData {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
}

/// Wire format of a team in the teams response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeamData {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub short_name: Option<String>,
    pub tla: Option<String>,
    pub founded: Option<u32>,
    pub club_colors: Option<String>,
    pub venue: Option<String>,
    #[serde(default)]
    pub squad: Vec<PlayerData>,
}

/// A Premier League player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    pub name: String,
    pub position: Option<String>,
    pub nationality: Option<String>,
    /// ISO date string as delivered by the API, e.g. `1998-09-05`.
    pub date_of_birth: Option<String>,
    /// Whole years, derived from `date_of_birth` at construction time.
    pub age: Option<u32>,
}

impl Player {
    pub(crate) fn from_api(data: PlayerData) -> Self {
        let age = data
            .date_of_birth
            .as_deref()
            .and_then(|dob| age_on(dob, Local::now().date_naive()));
        Self {
            id: data.id,
            name: data.name,
            position: data.position,
            nationality: data.nationality,
            date_of_birth: data.date_of_birth,
            age,
        }
    }
}

/// A Premier League team and its squad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub short_name: Option<String>,
    /// Three-letter abbreviation, e.g. `ARS`.
    pub tla: Option<String>,
    pub founded: Option<u32>,
    pub club_colors: Option<String>,
    pub venue: Option<String>,
    pub squad: Vec<Player>,
}

impl Team {
    pub(crate) fn from_api(data: TeamData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            short_name: data.short_name,
            tla: data.tla,
            founded: data.founded,
            club_colors: data.club_colors,
            venue: data.venue,
            squad: data.squad.into_iter().map(Player::from_api).collect(),
        }
    }
}

/// Whole years between `dob` (ISO `YYYY-MM-DD`) and `today`.
///
/// Returns `None` for unparsable dates and dates in the future.
fn age_on(dob: &str, today: NaiveDate) -> Option<u32> {
    let birth = NaiveDate::parse_from_str(dob, "%Y-%m-%d").ok()?;
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}
