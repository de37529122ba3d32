//! Data structures for the scoreboard: players, matchups, session state.

mod matchup;
mod player;
mod session;

pub use matchup::{Matchup, MatchupId, Side};
pub use player::{Player, PlayerId};
pub use session::{
    clamp_roster_size, EndMatchPolicy, Session, SessionError, SessionStatus, MAX_PLAYERS,
    MIN_PLAYERS,
};
