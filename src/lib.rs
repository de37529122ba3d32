//! Billiards round-robin scoreboard: library with models, logic, storage and views.

pub mod config;
pub mod export;
pub mod logic;
pub mod models;
pub mod scoreboard;
pub mod storage;
pub mod view;

pub use logic::{
    compute_stats, decrement_score, end_match, generate_matchups, increment_score, reset_scores,
    set_players, start_match, Standing, Stats,
};
pub use models::{
    clamp_roster_size, EndMatchPolicy, Matchup, MatchupId, Player, PlayerId, Session,
    SessionError, SessionStatus, Side, MAX_PLAYERS, MIN_PLAYERS,
};
pub use scoreboard::{Scoreboard, STORAGE_KEY};
pub use storage::{FileSlotStore, MemorySlotStore, SlotStore, StorageError};
