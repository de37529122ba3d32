//! Roster phase: set players, generate the round robin, start and end a match.

use crate::models::{
    EndMatchPolicy, Matchup, Player, Session, SessionError, SessionStatus, MAX_PLAYERS,
    MIN_PLAYERS,
};

/// Replace the whole roster and regenerate every matchup at 0-0.
///
/// Ids are assigned 1.. in the given order; blank names get a placeholder.
/// All previous scores are discarded. Status is left unchanged.
pub fn set_players<S: AsRef<str>>(session: &mut Session, names: &[S]) {
    session.players = names
        .iter()
        .enumerate()
        .map(|(i, name)| Player::from_position(i, name.as_ref()))
        .collect();
    session.matchups = generate_matchups(&session.players);
}

/// Every unordered pair (i < j) in roster order: C(n, 2) matchups.
pub fn generate_matchups(players: &[Player]) -> Vec<Matchup> {
    players
        .iter()
        .enumerate()
        .flat_map(|(i, p1)| players[i + 1..].iter().map(move |p2| Matchup::new(p1.id, p2.id)))
        .collect()
}

/// Finalize the roster: Setup -> Playing.
pub fn start_match<S: AsRef<str>>(session: &mut Session, names: &[S]) -> Result<(), SessionError> {
    if session.status != SessionStatus::Setup {
        return Err(SessionError::InvalidTransition {
            from: session.status,
            to: SessionStatus::Playing,
        });
    }
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()) {
        return Err(SessionError::RosterSize { count: names.len() });
    }
    set_players(session, names);
    session.status = SessionStatus::Playing;
    Ok(())
}

/// Leave the scoreboard: Playing -> Setup. The roster is kept so setup can pre-fill it.
pub fn end_match(session: &mut Session, policy: EndMatchPolicy) -> Result<(), SessionError> {
    if session.status != SessionStatus::Playing {
        return Err(SessionError::InvalidTransition {
            from: session.status,
            to: SessionStatus::Setup,
        });
    }
    if policy == EndMatchPolicy::ClearScores {
        crate::logic::reset_scores(session);
    }
    session.status = SessionStatus::Setup;
    Ok(())
}
