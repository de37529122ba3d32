//! Scoreboard business logic: roster, scoring, statistics.

mod roster;
mod scoring;
mod stats;

pub use roster::{end_match, generate_matchups, set_players, start_match};
pub use scoring::{decrement_score, increment_score, reset_scores};
pub use stats::{compute_stats, Standing, Stats};
