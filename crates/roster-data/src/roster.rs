//! The roster: both repositories behind one call-in surface.

use anyhow::Result;
use chrono::{DateTime, Utc};
use roster_common::config::RosterConfig;
use roster_common::debug::DebugLog;
use roster_common::store::{FileStore, KeyValueStore};

use crate::repository::{Repository, Upserted};
use crate::schema::{Game, TeamMember};
use crate::views::{self, Summary};

/// Team members and games for one installation.
///
/// Construct once at startup and pass by reference to whatever needs it.
#[derive(Debug)]
pub struct Roster<S> {
    members: Repository<TeamMember, S>,
    games: Repository<Game, S>,
}

impl<S: KeyValueStore + Clone> Roster<S> {
    /// Open both collections from `store`, hydrating each once.
    pub fn open(store: S) -> Self {
        Self {
            members: Repository::open(store.clone()),
            games: Repository::open(store),
        }
    }

    /// Journal every mutation to `journal`.
    pub fn with_journal(self, journal: Option<DebugLog>) -> Self {
        Self {
            members: self.members.with_journal(journal.clone()),
            games: self.games.with_journal(journal),
        }
    }

    pub fn list_team_members(&self) -> &[TeamMember] {
        self.members.items()
    }

    pub fn upsert_team_member(&mut self, member: TeamMember) -> Result<Upserted> {
        self.members.upsert(member)
    }

    /// Delete the team member at `position` in [`Roster::list_team_members`].
    pub fn delete_team_member(&mut self, position: usize) -> Result<Option<TeamMember>> {
        self.members.remove_at(position)
    }

    pub fn list_games(&self) -> &[Game] {
        self.games.items()
    }

    pub fn upsert_game(&mut self, game: Game) -> Result<Upserted> {
        self.games.upsert(game)
    }

    /// Delete the game at `position` in [`Roster::list_games`].
    pub fn delete_game(&mut self, position: usize) -> Result<Option<Game>> {
        self.games.remove_at(position)
    }

    pub fn upcoming_games(&self) -> Vec<&Game> {
        views::upcoming_games(self.games.items())
    }

    pub fn upcoming_games_at(&self, now: DateTime<Utc>) -> Vec<&Game> {
        views::upcoming_games_at(self.games.items(), now)
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(self.members.items(), self.games.items())
    }

    pub fn team_members(&self) -> &Repository<TeamMember, S> {
        &self.members
    }

    pub fn games(&self) -> &Repository<Game, S> {
        &self.games
    }
}

impl Roster<FileStore> {
    /// Open the roster stored in the configured data directory.
    pub fn from_config(config: &RosterConfig) -> Self {
        tracing::debug!(data_dir = %config.data_dir, debug = config.debug, "opening roster");
        Self::open(FileStore::new(config.data_dir.clone()))
            .with_journal(DebugLog::from_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use chrono::TimeZone;
    use roster_common::store::MemoryStore;
    use tempfile::tempdir;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, day, 19, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::open(MemoryStore::new());
        assert!(roster.list_team_members().is_empty());
        assert!(roster.list_games().is_empty());
        assert!(roster.upcoming_games().is_empty());
        assert_eq!(roster.summary(), Summary::default());
    }

    #[test]
    fn test_full_flow() {
        let store = MemoryStore::new();
        let mut roster = Roster::open(store.clone());

        roster.upsert_team_member(TeamMember::new("Alex", "Goalie", "31")).unwrap();
        roster.upsert_team_member(TeamMember::new("Sam", "Center", "12")).unwrap();

        for (day, result) in [(1, "Win"), (5, "Loss"), (9, "Win"), (13, "Draw")] {
            roster
                .upsert_game(Game::new("Ravens", at(day), "Home").with_result(result))
                .unwrap();
        }

        let summary = roster.summary();
        assert_eq!(summary.total_members, 2);
        assert_eq!(summary.total_games, 4);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);

        let upcoming: Vec<DateTime<Utc>> =
            roster.upcoming_games_at(at(9)).iter().map(|g| g.date).collect();
        assert_eq!(upcoming, vec![at(9), at(13)]);

        roster.delete_game(0).unwrap();
        roster.delete_team_member(1).unwrap();

        let reopened = Roster::open(store);
        assert_eq!(reopened.list_games(), roster.list_games());
        assert_eq!(reopened.list_team_members().len(), 1);
        assert_eq!(reopened.list_team_members()[0].name, "Alex");
        assert_eq!(reopened.summary().wins, 1);
    }

    #[test]
    fn test_edit_game_result() {
        let mut roster = Roster::open(MemoryStore::new());
        let game = Game::new("Hawks", at(2), "Away");
        let id = game.id;
        roster.upsert_game(game.clone()).unwrap();
        assert_eq!(roster.summary().wins, 0);

        let outcome = roster.upsert_game(game.with_result("Win")).unwrap();
        assert_eq!(outcome, Upserted::Replaced(0));
        assert_eq!(roster.list_games().len(), 1);
        assert_eq!(roster.summary().wins, 1);
        assert_eq!(roster.games().position_of(id), Some(0));
        assert!(roster.team_members().find(id).is_none());
    }

    #[test]
    fn test_from_config() {
        let dir = tempdir().unwrap();
        let config = RosterConfig {
            data_dir: Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap(),
            debug: true,
        };

        let mut roster = Roster::from_config(&config);
        roster.upsert_team_member(TeamMember::new("Alex", "Goalie", "31")).unwrap();

        assert!(config.data_dir.join("teamMembers.json").exists());
        assert!(config.debug_log_path().exists());

        let reopened = Roster::from_config(&config);
        assert_eq!(reopened.list_team_members(), roster.list_team_members());
    }
}
