//! Roster schema: team members and games.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Results a game form conventionally offers. Not enforced.
pub const RESULT_CHOICES: [&str; 4] = ["Win", "Loss", "Draw", "Pending"];

/// Result assigned to newly scheduled games.
pub const DEFAULT_RESULT: &str = "Pending";

/// A player or staff member on the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Unique identifier
    pub id: Uuid,

    pub name: String,

    /// Playing position (free text)
    pub position: String,

    /// Jersey number as entered; not validated as a number
    pub jersey_number: String,

    /// Reserved. No operation populates or reads it, but stored records carry it.
    #[serde(default)]
    pub attendance: Vec<DateTime<Utc>>,
}

impl TeamMember {
    /// Create a new team member with a fresh identity.
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        jersey_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position: position.into(),
            jersey_number: jersey_number.into(),
            attendance: Vec::new(),
        }
    }
}

/// A scheduled or played game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Unique identifier
    pub id: Uuid,

    pub opponent: String,

    /// Start time
    pub date: DateTime<Utc>,

    pub location: String,

    /// Free text, conventionally one of [`RESULT_CHOICES`]
    pub result: String,

    pub notes: String,
}

impl Game {
    /// Create a new pending game with a fresh identity.
    pub fn new(opponent: impl Into<String>, date: DateTime<Utc>, location: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            opponent: opponent.into(),
            date,
            location: location.into(),
            result: DEFAULT_RESULT.to_string(),
            notes: String::new(),
        }
    }

    /// Set result.
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = result.into();
        self
    }

    /// Set notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Whether the result reads as a win.
    ///
    /// Case-insensitive substring match: "Winning" counts, and so does "Winless".
    pub fn is_win(&self) -> bool {
        self.result.to_lowercase().contains("win")
    }

    /// Whether the result reads as a loss (same substring rule as [`Game::is_win`]).
    pub fn is_loss(&self) -> bool {
        self.result.to_lowercase().contains("loss")
    }

    /// Whether the game starts at or after `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date >= now
    }
}
