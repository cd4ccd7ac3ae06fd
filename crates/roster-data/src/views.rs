//! Derived views over repository state. Recomputed on every call, never stored.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::schema::{Game, TeamMember};

/// Games starting at or after `now`, in storage order.
pub fn upcoming_games_at(games: &[Game], now: DateTime<Utc>) -> Vec<&Game> {
    games.iter().filter(|g| g.is_upcoming(now)).collect()
}

/// Games starting at or after the current time.
pub fn upcoming_games(games: &[Game]) -> Vec<&Game> {
    upcoming_games_at(games, Utc::now())
}

/// Team totals shown on the summary screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_members: usize,
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
}

impl Summary {
    pub fn compute(members: &[TeamMember], games: &[Game]) -> Self {
        Self {
            total_members: members.len(),
            total_games: games.len(),
            wins: games.iter().filter(|g| g.is_win()).count(),
            losses: games.iter().filter(|g| g.is_loss()).count(),
        }
    }
}
