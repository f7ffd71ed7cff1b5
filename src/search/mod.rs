//! Fuzzy lookups over the cached teams.
//!
//! Jaro-Winkler similarity on lowercased strings tolerates the name variants
//! users actually type ("Man United", a misspelled surname). A candidate must
//! clear the threshold to count; the best-scoring candidate wins.

use strsim::jaro_winkler;

use crate::football::model::{Player, Team};

/// Minimum similarity for a team name, short name, or TLA to match.
const TEAM_MATCH_THRESHOLD: f64 = 0.6;

/// Minimum similarity for a player name to match. Stricter than teams:
/// squads are large and surnames collide.
const PLAYER_MATCH_THRESHOLD: f64 = 0.7;

fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(&a.to_lowercase(), &b.to_lowercase())
}

/// Best score for `query` across a team's name, short name, and TLA.
fn team_score(team: &Team, query: &str) -> f64 {
    let mut score = similarity(query, &team.name);
    if let Some(short_name) = &team.short_name {
        score = score.max(similarity(query, short_name));
    }
    if let Some(tla) = &team.tla {
        score = score.max(similarity(query, tla));
    }
    score
}

/// Find the team best matching `query`, or `None` when nothing clears the
/// threshold.
pub fn find_team<'a>(teams: &'a [Team], query: &str) -> Option<&'a Team> {
    let mut best: Option<(&Team, f64)> = None;
    for team in teams {
        let score = team_score(team, query);
        if score >= TEAM_MATCH_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
            best = Some((team, score));
        }
    }
    best.map(|(team, _)| team)
}

/// Find the player best matching `query` across every squad, together with
/// the team they play for.
pub fn find_player<'a>(teams: &'a [Team], query: &str) -> Option<(&'a Player, &'a Team)> {
    let mut best: Option<(&Player, &Team, f64)> = None;
    for team in teams {
        for player in &team.squad {
            let score = similarity(query, &player.name);
            if score >= PLAYER_MATCH_THRESHOLD && best.map_or(true, |(_, _, s)| score > s) {
                best = Some((player, team, score));
            }
        }
    }
    best.map(|(player, team, _)| (player, team))
}

/// All players of the team matching `team_query` whose position contains
/// `position` (case-insensitive). Empty when the team doesn't resolve.
pub fn players_by_position<'a>(
    teams: &'a [Team],
    team_query: &str,
    position: &str,
) -> Vec<&'a Player> {
    let Some(team) = find_team(teams, team_query) else {
        return Vec::new();
    };
    let needle = position.to_lowercase();
    team.squad
        .iter()
        .filter(|p| {
            p.position
                .as_deref()
                .is_some_and(|pos| pos.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Sorted, deduplicated list of every position present across all squads.
pub fn list_positions(teams: &[Team]) -> Vec<String> {
    let mut positions: Vec<String> = teams
        .iter()
        .flat_map(|t| t.squad.iter())
        .filter_map(|p| p.position.clone())
        .collect();
    positions.sort();
    positions.dedup();
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u64, name: &str, position: &str) -> Player {
        Player {
            id,
            name: name.to_string(),
            position: Some(position.to_string()),
            nationality: None,
            date_of_birth: None,
            age: None,
        }
    }

    fn team(id: u64, name: &str, short_name: &str, tla: &str, squad: Vec<Player>) -> Team {
        Team {
            id,
            name: name.to_string(),
            short_name: Some(short_name.to_string()),
            tla: Some(tla.to_string()),
            founded: None,
            club_colors: None,
            venue: None,
            squad,
        }
    }

    fn premier_league() -> Vec<Team> {
        vec![
            team(
                57,
                "Arsenal FC",
                "Arsenal",
                "ARS",
                vec![
                    player(1, "Bukayo Saka", "Right Winger"),
                    player(2, "Gabriel Jesus", "Centre-Forward"),
                    player(3, "Gabriel Martinelli", "Left Winger"),
                    player(4, "David Raya", "Goalkeeper"),
                ],
            ),
            team(
                65,
                "Manchester City FC",
                "Man City",
                "MCI",
                vec![player(5, "Erling Haaland", "Centre-Forward")],
            ),
            team(
                66,
                "Manchester United FC",
                "Man United",
                "MUN",
                vec![
                    player(6, "Bruno Fernandes", "Attacking Midfield"),
                    player(7, "Lisandro Martínez", "Centre-Back"),
                ],
            ),
            team(
                64,
                "Liverpool FC",
                "Liverpool",
                "LIV",
                vec![player(8, "Virgil van Dijk", "Centre-Back")],
            ),
        ]
    }

    #[test]
    fn test_known_variant_resolves_to_canonical_team() {
        let teams = premier_league();
        let found = find_team(&teams, "Man United").unwrap();
        assert_eq!(found.name, "Manchester United FC");
    }

    #[test]
    fn test_full_name_and_tla_both_match() {
        let teams = premier_league();
        assert_eq!(find_team(&teams, "Arsenal").unwrap().id, 57);
        assert_eq!(find_team(&teams, "ARS").unwrap().id, 57);
    }

    #[test]
    fn test_best_scoring_team_wins() {
        let teams = premier_league();
        // "Man City" scores 1.0 on Manchester City's short name; the weaker
        // fuzzy hit on Manchester United must not win.
        assert_eq!(find_team(&teams, "man city").unwrap().id, 65);
    }

    #[test]
    fn test_team_below_threshold_is_none() {
        let teams = premier_league();
        assert!(find_team(&teams, "qwxz").is_none());
    }

    #[test]
    fn test_find_player_exact_name() {
        let teams = premier_league();
        let (player, team) = find_player(&teams, "Bruno Fernandes").unwrap();
        assert_eq!(player.id, 6);
        assert_eq!(team.name, "Manchester United FC");
    }

    #[test]
    fn test_find_player_tolerates_misspelling() {
        let teams = premier_league();
        let (player, _) = find_player(&teams, "Bruno Fernandez").unwrap();
        assert_eq!(player.name, "Bruno Fernandes");
    }

    #[test]
    fn test_find_player_case_insensitive() {
        let teams = premier_league();
        let (player, _) = find_player(&teams, "erling haaland").unwrap();
        assert_eq!(player.id, 5);
    }

    #[test]
    fn test_find_player_picks_best_of_similar_names() {
        let teams = premier_league();
        let (player, _) = find_player(&teams, "Gabriel Jesus").unwrap();
        assert_eq!(player.id, 2, "exact name must beat the sibling Gabriel");
    }

    #[test]
    fn test_find_player_unknown_is_none() {
        let teams = premier_league();
        assert!(find_player(&teams, "Zlatan Ibrahimović").is_none());
    }

    #[test]
    fn test_players_by_position_substring_match() {
        let teams = premier_league();
        let wingers = players_by_position(&teams, "Arsenal", "winger");
        let names: Vec<&str> = wingers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bukayo Saka", "Gabriel Martinelli"]);
    }

    #[test]
    fn test_players_by_position_unknown_team_is_empty() {
        let teams = premier_league();
        assert!(players_by_position(&teams, "qwxz", "Goalkeeper").is_empty());
    }

    #[test]
    fn test_players_by_position_no_hits_is_empty() {
        let teams = premier_league();
        assert!(players_by_position(&teams, "Liverpool", "Goalkeeper").is_empty());
    }

    #[test]
    fn test_list_positions_sorted_and_deduplicated() {
        let teams = premier_league();
        let positions = list_positions(&teams);
        assert_eq!(
            positions,
            vec![
                "Attacking Midfield",
                "Centre-Back",
                "Centre-Forward",
                "Goalkeeper",
                "Left Winger",
                "Right Winger",
            ]
        );
    }
}
