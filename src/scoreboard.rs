//! The state store: one session bound to one persistent slot.
//!
//! Every successful mutation writes the whole session back to the slot.
//! Storage problems never fail an operation: a bad slot on load falls back
//! to an empty session, and a failed write leaves the in-memory session as
//! the source of truth.

use crate::logic::{self, Stats};
use crate::models::{EndMatchPolicy, Player, PlayerId, Session, SessionError};
use crate::storage::SlotStore;
use std::sync::Arc;

/// Slot name for scoreboard data.
pub const STORAGE_KEY: &str = "billiards_score_data";

pub struct Scoreboard {
    session: Session,
    store: Arc<dyn SlotStore>,
    key: String,
}

impl Scoreboard {
    /// Bind to `key` in `store` and restore whatever it holds.
    pub fn open(store: Arc<dyn SlotStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let session = load_session(store.as_ref(), &key);
        Self {
            session,
            store,
            key,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.session.player(id)
    }

    pub fn stats(&self) -> Stats {
        logic::compute_stats(&self.session)
    }

    /// Replace the roster; all previous matchups and scores are dropped.
    pub fn set_players<S: AsRef<str>>(&mut self, names: &[S]) {
        logic::set_players(&mut self.session, names);
        self.persist();
    }

    pub fn start_match<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), SessionError> {
        logic::start_match(&mut self.session, names)?;
        self.persist();
        Ok(())
    }

    pub fn end_match(&mut self, policy: EndMatchPolicy) -> Result<(), SessionError> {
        logic::end_match(&mut self.session, policy)?;
        self.persist();
        Ok(())
    }

    pub fn increment_score(&mut self, matchup_id: &str, player_id: PlayerId) -> bool {
        let changed = logic::increment_score(&mut self.session, matchup_id, player_id);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn decrement_score(&mut self, matchup_id: &str, player_id: PlayerId) -> bool {
        let changed = logic::decrement_score(&mut self.session, matchup_id, player_id);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn reset_scores(&mut self) {
        logic::reset_scores(&mut self.session);
        self.persist();
    }

    fn persist(&self) {
        let raw = match self.session.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Save failed for slot {}: {}", self.key, e);
                return;
            }
        };
        if let Err(e) = self.store.write(&self.key, &raw) {
            log::warn!("Save failed for slot {}: {}", self.key, e);
        }
    }
}

/// Read and decode a slot. Anything unusable is logged and replaced by an empty session.
fn load_session(store: &dyn SlotStore, key: &str) -> Session {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Session::new(),
        Err(e) => {
            log::error!("Load failed for slot {}: {}", key, e);
            return Session::new();
        }
    };
    match Session::from_json(&raw) {
        Ok(session) if session.is_consistent() => {
            log::debug!(
                "Restored slot {}: {} players, status {}",
                key,
                session.players.len(),
                session.status
            );
            session
        }
        Ok(_) => {
            log::error!("Load failed for slot {}: stored matchups do not match the roster", key);
            Session::new()
        }
        Err(e) => {
            log::error!("Load failed for slot {}: {}", key, e);
            Session::new()
        }
    }
}
