//! Scoreboard screen: matchup cards, summary and ranking.
//!
//! The whole list is re-rendered on every change so the leading side of each
//! card and the ranking always agree with the scores.

use super::escape_html;
use crate::logic::Stats;
use crate::models::{Matchup, PlayerId, Session, Side};
use std::fmt::Write;

pub fn render_scoreboard(session: &Session, stats: &Stats) -> String {
    let mut cards = String::new();
    for m in &session.matchups {
        cards.push_str(&render_matchup(session, m));
    }

    let mut rows = String::new();
    for s in &stats.ranking {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:+}</td><td>{}</td></tr>",
            s.rank,
            escape_html(&s.name),
            s.wins,
            s.losses,
            s.net,
            s.total
        );
    }

    let details = stats
        .ranking
        .iter()
        .map(|s| format!("{} {} pts", escape_html(&s.name), s.wins))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"<section id="scoreboard-screen" class="screen active">
<header>
<h1>Scoreboard</h1>
<p id="match-summary"><span class="accent">{total}</span> games played</p>
<p id="player-details">{details}</p>
</header>
<div id="matchups-list">{cards}</div>
<table id="ranking" class="glass-panel">
<thead><tr><th>#</th><th>Player</th><th>Won</th><th>Lost</th><th>Net</th><th>Played</th></tr></thead>
<tbody>{rows}</tbody>
</table>
<div class="controls">
<form method="post" action="/scores/reset" onsubmit="return confirm('Reset all scores?')"><button type="submit" id="btn-reset-scores">Reset scores</button></form>
<form method="post" action="/match/end" onsubmit="return confirm('End the match and return to setup?')"><button type="submit" id="btn-end-match">End match</button></form>
<a href="/export/standings.csv" class="export-link">Download standings (CSV)</a>
</div>
</section>"#,
        total = stats.total_games,
    )
}

fn render_matchup(session: &Session, m: &Matchup) -> String {
    let leader = m.leader();
    format!(
        r#"<div class="matchup-card glass-panel" id="matchup-{id}">{left}<div class="matchup-divider">:</div>{right}</div>"#,
        id = m.id,
        left = render_side(session, m, m.player1_id, Side::One, leader == Some(Side::One)),
        right = render_side(session, m, m.player2_id, Side::Two, leader == Some(Side::Two)),
    )
}

fn render_side(
    session: &Session,
    m: &Matchup,
    player_id: PlayerId,
    side: Side,
    leading: bool,
) -> String {
    let name = escape_html(session.player(player_id).map_or("?", |p| p.name.as_str()));
    let position = match side {
        Side::One => "left",
        Side::Two => "right",
    };
    let leading = if leading { " leading" } else { "" };
    format!(
        r#"<div class="matchup-side {position}{leading}">
<form method="post" action="/matchups/{id}/decrement"><input type="hidden" name="player" value="{player_id}"><button type="submit" class="matchup-btn-minus" aria-label="Take a point from {name}">&minus;</button></form>
<form method="post" action="/matchups/{id}/increment"><input type="hidden" name="player" value="{player_id}"><button type="submit" class="matchup-tap"><span class="matchup-name">{name}</span><span class="matchup-score" id="score-{id}-{player_id}">{score}</span></button></form>
</div>"#,
        id = m.id,
        score = m.score(side),
    )
}
