//! Matchup: one pairing of two players and their running scores.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Composite key of a matchup, `"{player1_id}-{player2_id}"`.
pub type MatchupId = String;

/// Which side of a matchup a player is on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

/// A single pairing. `player1_id < player2_id` by construction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub id: MatchupId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub score1: u32,
    pub score2: u32,
}

impl Matchup {
    /// New matchup at 0-0.
    pub fn new(player1_id: PlayerId, player2_id: PlayerId) -> Self {
        Self {
            id: Self::key(player1_id, player2_id),
            player1_id,
            player2_id,
            score1: 0,
            score2: 0,
        }
    }

    pub fn key(player1_id: PlayerId, player2_id: PlayerId) -> MatchupId {
        format!("{}-{}", player1_id, player2_id)
    }

    /// Side the player is on, or None if they don't play in this matchup.
    pub fn side_of(&self, player_id: PlayerId) -> Option<Side> {
        if player_id == self.player1_id {
            Some(Side::One)
        } else if player_id == self.player2_id {
            Some(Side::Two)
        } else {
            None
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::One => self.score1,
            Side::Two => self.score2,
        }
    }

    pub fn score_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::One => &mut self.score1,
            Side::Two => &mut self.score2,
        }
    }

    /// (own score, opponent score) from the given player's point of view.
    pub fn scores_for(&self, player_id: PlayerId) -> Option<(u32, u32)> {
        match self.side_of(player_id)? {
            Side::One => Some((self.score1, self.score2)),
            Side::Two => Some((self.score2, self.score1)),
        }
    }

    /// The side currently ahead, None when level.
    pub fn leader(&self) -> Option<Side> {
        match self.score1.cmp(&self.score2) {
            std::cmp::Ordering::Greater => Some(Side::One),
            std::cmp::Ordering::Less => Some(Side::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.score1) + u64::from(self.score2)
    }
}
