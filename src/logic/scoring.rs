//! Scoring: per-matchup increments, decrements and reset.
//!
//! A reference to an unknown matchup, or to a player outside the matchup,
//! is not an error: the operation is a no-op and reports `false`.

use crate::models::{PlayerId, Session};

/// Add a point to `player_id`'s side of the matchup. Returns whether anything changed.
/// A side already at `u32::MAX` stays there.
pub fn increment_score(session: &mut Session, matchup_id: &str, player_id: PlayerId) -> bool {
    let Some(matchup) = session.matchup_mut(matchup_id) else {
        return false;
    };
    let Some(side) = matchup.side_of(player_id) else {
        return false;
    };
    let score = matchup.score_mut(side);
    match score.checked_add(1) {
        Some(next) => {
            *score = next;
            true
        }
        None => false,
    }
}

/// Take a point from `player_id`'s side. Scores never drop below zero.
pub fn decrement_score(session: &mut Session, matchup_id: &str, player_id: PlayerId) -> bool {
    let Some(matchup) = session.matchup_mut(matchup_id) else {
        return false;
    };
    let Some(side) = matchup.side_of(player_id) else {
        return false;
    };
    let score = matchup.score_mut(side);
    if *score == 0 {
        return false;
    }
    *score -= 1;
    true
}

/// Zero both scores of every matchup. Roster, status and matchup ids are untouched.
pub fn reset_scores(session: &mut Session) {
    for m in &mut session.matchups {
        m.score1 = 0;
        m.score2 = 0;
    }
}
