//! Server-rendered HTML: the setup screen and the scoreboard screen.
//!
//! Exactly one screen is rendered per page, chosen by the session status.

mod board;
mod setup;

pub use board::render_scoreboard;
pub use setup::{render_setup, SetupAction, SetupDraft};

use crate::logic::Stats;
use crate::models::{Session, SessionStatus};

const PAGE_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Full page for the current status.
pub fn render_page(session: &Session, stats: &Stats) -> String {
    let content = match session.status {
        SessionStatus::Setup => render_setup(&SetupDraft::from_session(session), None),
        SessionStatus::Playing => render_scoreboard(session, stats),
    };
    wrap_page(&content)
}

/// Put a rendered screen into the page shell.
pub fn wrap_page(content: &str) -> String {
    PAGE_TEMPLATE.replace("{{content}}", content)
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
