//! Integration tests for totals and ranking.

use billiards_scoreboard_web::{
    compute_stats, decrement_score, increment_score, start_match, Session,
};

fn session(names: &[&str]) -> Session {
    let mut s = Session::new();
    start_match(&mut s, names).unwrap();
    s
}

fn score(s: &mut Session, matchup: &str, player: u32, times: usize) {
    for _ in 0..times {
        assert!(increment_score(s, matchup, player));
    }
}

#[test]
fn empty_session_has_no_stats() {
    let stats = compute_stats(&Session::new());
    assert_eq!(stats.total_games, 0);
    assert!(stats.ranking.is_empty());
}

#[test]
fn wins_losses_net_and_total() {
    let mut s = session(&["A", "B", "C"]);
    score(&mut s, "1-2", 1, 3); // A 3 - 0 B
    score(&mut s, "1-2", 2, 1); // A 3 - 1 B
    score(&mut s, "2-3", 3, 2); // B 0 - 2 C

    let stats = compute_stats(&s);
    assert_eq!(stats.total_games, 6);

    let a = stats.ranking.iter().find(|r| r.name == "A").unwrap();
    assert_eq!((a.wins, a.losses, a.net, a.total), (3, 1, 2, 4));
    let b = stats.ranking.iter().find(|r| r.name == "B").unwrap();
    assert_eq!((b.wins, b.losses, b.net, b.total), (1, 5, -4, 6));
    let c = stats.ranking.iter().find(|r| r.name == "C").unwrap();
    assert_eq!((c.wins, c.losses, c.net, c.total), (2, 0, 2, 2));

    // A and C tie on net +2; A has more wins
    let order: Vec<_> = stats.ranking.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["A", "C", "B"]);
    let ranks: Vec<_> = stats.ranking.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn exact_ties_keep_roster_order() {
    let mut s = session(&["A", "B", "C", "D"]);
    score(&mut s, "1-2", 1, 1);
    score(&mut s, "1-2", 2, 1);
    let order: Vec<_> = compute_stats(&s)
        .ranking
        .iter()
        .map(|r| r.name.clone())
        .collect();
    assert_eq!(order, vec!["A", "B", "C", "D"]);
}

#[test]
fn total_games_tracks_every_change() {
    let mut s = session(&["A", "B", "C", "D"]);
    let ops: &[(&str, u32, bool)] = &[
        ("1-2", 1, true),
        ("1-2", 2, true),
        ("3-4", 4, true),
        ("1-2", 1, false),
        ("2-4", 2, true),
        ("2-4", 4, false),
        ("1-3", 3, true),
        ("3-4", 4, false),
        ("3-4", 4, false),
    ];
    for &(m, p, up) in ops {
        if up {
            increment_score(&mut s, m, p);
        } else {
            decrement_score(&mut s, m, p);
        }
        let expected: u64 = s.matchups.iter().map(|m| m.total()).sum();
        let stats = compute_stats(&s);
        assert_eq!(stats.total_games, expected);
        for pair in stats.ranking.windows(2) {
            assert!(
                pair[0].net > pair[1].net
                    || (pair[0].net == pair[1].net && pair[0].wins >= pair[1].wins)
            );
        }
    }
}
