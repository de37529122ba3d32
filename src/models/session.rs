//! Session (the root object), SessionStatus and SessionError.

use crate::models::matchup::Matchup;
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Smallest roster a match can start with.
pub const MIN_PLAYERS: usize = 2;
/// Largest roster a match can start with.
pub const MAX_PLAYERS: usize = 8;

/// Clamp a requested roster size into `MIN_PLAYERS..=MAX_PLAYERS`.
pub fn clamp_roster_size(count: usize) -> usize {
    count.clamp(MIN_PLAYERS, MAX_PLAYERS)
}

/// Errors from session state transitions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// The session is not in a status that allows this transition.
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },
    /// Roster size outside `MIN_PLAYERS..=MAX_PLAYERS`.
    RosterSize { count: usize },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidTransition { from, to } => {
                write!(f, "Cannot go from {} to {}", from, to)
            }
            SessionError::RosterSize { count } => write!(
                f,
                "Need between {} and {} players (got {})",
                MIN_PLAYERS, MAX_PLAYERS, count
            ),
        }
    }
}

impl std::error::Error for SessionError {}

/// Which screen the session is on.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Choosing players.
    #[default]
    Setup,
    /// Scoring matchups.
    Playing,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Setup => write!(f, "SETUP"),
            SessionStatus::Playing => write!(f, "PLAYING"),
        }
    }
}

/// What happens to matchup scores when a match is ended.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EndMatchPolicy {
    /// Scores stay as they are; only starting a new match discards them.
    #[default]
    KeepScores,
    /// Scores are zeroed on the way back to setup.
    ClearScores,
}

/// The whole scoreboard state. This is exactly what gets persisted.
///
/// Every field is optional when decoding so a partially written slot still
/// restores whatever it does contain.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub matchups: Vec<Matchup>,
    #[serde(default)]
    pub status: SessionStatus,
}

impl Session {
    /// Empty session in Setup.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn matchup(&self, id: &str) -> Option<&Matchup> {
        self.matchups.iter().find(|m| m.id == id)
    }

    pub fn matchup_mut(&mut self, id: &str) -> Option<&mut Matchup> {
        self.matchups.iter_mut().find(|m| m.id == id)
    }

    /// Matchups reference known players, ids match their keys, and player ids are unique.
    pub fn is_consistent(&self) -> bool {
        let mut ids = HashSet::new();
        if !self.players.iter().all(|p| ids.insert(p.id)) {
            return false;
        }
        let mut keys = HashSet::new();
        self.matchups.iter().all(|m| {
            m.player1_id < m.player2_id
                && ids.contains(&m.player1_id)
                && ids.contains(&m.player2_id)
                && m.id == Matchup::key(m.player1_id, m.player2_id)
                && keys.insert(m.id.as_str())
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
