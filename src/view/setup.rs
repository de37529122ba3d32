//! Setup screen: roster size and player names.

use super::escape_html;
use crate::models::{clamp_roster_size, Player, PlayerId, Session, MAX_PLAYERS, MIN_PLAYERS};
use std::collections::HashMap;
use std::fmt::Write;

/// Button pressed on the setup form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SetupAction {
    More,
    Fewer,
    Start,
}

impl SetupAction {
    /// Anything unrecognised (e.g. pressing Enter in a name field) starts the match.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("more") => SetupAction::More,
            Some("fewer") => SetupAction::Fewer,
            _ => SetupAction::Start,
        }
    }
}

/// Names typed on the setup screen before the roster is committed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetupDraft {
    pub names: Vec<String>,
}

impl SetupDraft {
    /// Pre-fill from the stored roster; at least `MIN_PLAYERS` slots.
    pub fn from_session(session: &Session) -> Self {
        let count = clamp_roster_size(session.players.len().max(MIN_PLAYERS));
        let names = (0..count)
            .map(|i| match session.players.get(i) {
                Some(p) => p.name.clone(),
                None => Player::placeholder_name(i as PlayerId + 1),
            })
            .collect();
        Self { names }
    }

    /// Read `count` and `player_1..player_{count}` from submitted form fields.
    pub fn from_form(fields: &HashMap<String, String>) -> Self {
        let count = fields
            .get("count")
            .and_then(|c| c.trim().parse::<usize>().ok())
            .map(clamp_roster_size)
            .unwrap_or(MIN_PLAYERS);
        let names = (1..=count)
            .map(|n| match fields.get(&format!("player_{}", n)) {
                Some(name) => name.trim().to_string(),
                None => Player::placeholder_name(n as PlayerId),
            })
            .collect();
        Self { names }
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    /// Grow or shrink by one slot, staying within the roster bounds.
    pub fn resize(&mut self, action: SetupAction) {
        let target = match action {
            SetupAction::More => clamp_roster_size(self.count() + 1),
            SetupAction::Fewer => clamp_roster_size(self.count().saturating_sub(1)),
            SetupAction::Start => return,
        };
        self.names.truncate(target);
        while self.names.len() < target {
            let id = self.names.len() as PlayerId + 1;
            self.names.push(Player::placeholder_name(id));
        }
    }
}

/// Render the setup screen. `error` is shown above the form when present.
pub fn render_setup(draft: &SetupDraft, error: Option<&str>) -> String {
    let count = draft.count();
    let mut inputs = String::new();
    for (i, name) in draft.names.iter().enumerate() {
        let n = i + 1;
        let _ = write!(
            inputs,
            r#"<div class="input-group"><label for="player_{n}">Player {n}</label><input type="text" id="player_{n}" name="player_{n}" value="{value}" placeholder="Enter name" class="player-name-input"></div>"#,
            n = n,
            value = escape_html(name),
        );
    }
    let error_html = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();
    let fewer_disabled = if count <= MIN_PLAYERS { " disabled" } else { "" };
    let more_disabled = if count >= MAX_PLAYERS { " disabled" } else { "" };

    // The start button comes first in the form so Enter starts the match.
    format!(
        r#"<section id="setup-screen" class="screen active glass-panel">
<h1>Billiards Scoreboard</h1>
{error_html}<form method="post" action="/setup" class="setup-form">
<input type="hidden" name="count" value="{count}">
<button type="submit" name="action" value="start" id="btn-start-match" class="primary">Start match</button>
<div class="player-count">
<button type="submit" name="action" value="fewer" id="btn-decrease-players"{fewer_disabled}>&minus;</button>
<span id="player-count">{count}</span>
<button type="submit" name="action" value="more" id="btn-increase-players"{more_disabled}>+</button>
</div>
<div id="player-inputs-container">{inputs}</div>
</form>
</section>"#,
    )
}
