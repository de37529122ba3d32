//! Derived statistics: league-wide point total and the ranking.

use crate::models::{PlayerId, Session};
use serde::{Deserialize, Serialize};

/// One row of the ranking.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    /// Points this player scored across all their matchups.
    pub wins: u64,
    /// Points scored against this player.
    pub losses: u64,
    pub net: i64,
    pub total: u64,
}

/// Derived view of a session, recomputed on demand.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Sum of every score field of every matchup (points, not games).
    pub total_games: u64,
    pub ranking: Vec<Standing>,
}

/// Compute totals and the ranking.
///
/// Order: net descending, then wins descending; remaining ties keep roster order.
/// Sums are widened to `u64` so stored scores near `u32::MAX` cannot overflow.
pub fn compute_stats(session: &Session) -> Stats {
    let total_games = session
        .matchups
        .iter()
        .fold(0u64, |sum, m| sum.saturating_add(m.total()));

    let mut ranking: Vec<Standing> = session
        .players
        .iter()
        .map(|player| {
            let (wins, losses) = session
                .matchups
                .iter()
                .filter_map(|m| m.scores_for(player.id))
                .fold((0u64, 0u64), |(w, l), (own, other)| {
                    (w.saturating_add(own.into()), l.saturating_add(other.into()))
                });
            Standing {
                rank: 0,
                player_id: player.id,
                name: player.name.clone(),
                wins,
                losses,
                net: signed(wins).saturating_sub(signed(losses)),
                total: wins.saturating_add(losses),
            }
        })
        .collect();

    // sort_by is stable, which gives the roster-order tie-break
    ranking.sort_by(|a, b| b.net.cmp(&a.net).then(b.wins.cmp(&a.wins)));
    for (i, s) in ranking.iter_mut().enumerate() {
        s.rank = i + 1;
    }

    Stats {
        total_games,
        ranking,
    }
}

fn signed(points: u64) -> i64 {
    i64::try_from(points).unwrap_or(i64::MAX)
}
