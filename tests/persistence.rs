//! Integration tests for the state store and its persisted slot.

use billiards_scoreboard_web::{
    EndMatchPolicy, FileSlotStore, MemorySlotStore, Scoreboard, Session, SessionStatus,
    SlotStore, StorageError, STORAGE_KEY,
};
use std::sync::Arc;

fn memory_store() -> Arc<MemorySlotStore> {
    Arc::new(MemorySlotStore::new())
}

fn open(store: &Arc<MemorySlotStore>) -> Scoreboard {
    Scoreboard::open(store.clone(), STORAGE_KEY)
}

#[test]
fn missing_slot_gives_empty_setup_session() {
    let store = memory_store();
    let sb = open(&store);
    assert_eq!(sb.session(), &Session::new());
    assert_eq!(sb.session().status, SessionStatus::Setup);
    assert_eq!(store.read(STORAGE_KEY).unwrap(), None);
}

#[test]
fn mutations_survive_reopen() {
    let store = memory_store();
    let mut sb = open(&store);
    sb.start_match(&["A", "B", "C"]).unwrap();
    assert!(sb.increment_score("1-2", 1));
    assert!(sb.increment_score("2-3", 3));
    assert!(sb.decrement_score("2-3", 3));
    assert!(sb.increment_score("1-3", 3));

    let reopened = open(&store);
    assert_eq!(reopened.session(), sb.session());
    assert_eq!(reopened.session().status, SessionStatus::Playing);
    assert_eq!(reopened.player(2).unwrap().name, "B");
    assert_eq!(reopened.stats(), sb.stats());
}

#[test]
fn scenario_from_fresh_roster() {
    let store = memory_store();
    let mut sb = open(&store);
    sb.set_players(&["A", "B", "C"]);
    assert_eq!(sb.session().matchups.len(), 3);
    assert!(sb.increment_score("1-2", 1));
    let m = sb.session().matchup("1-2").unwrap();
    assert_eq!((m.score1, m.score2), (1, 0));
    assert!(!sb.increment_score("1-2", 99));
    assert!(!sb.decrement_score("1-2", 2));
    assert_eq!(sb.stats().total_games, 1);
}

#[test]
fn failed_mutations_do_not_write() {
    let store = memory_store();
    let mut sb = open(&store);
    sb.set_players(&["A", "B"]);
    let saved = store.read(STORAGE_KEY).unwrap();

    // Replace the slot behind the store's back; a no-op must not overwrite it.
    store.write(STORAGE_KEY, "{}").unwrap();
    assert!(!sb.increment_score("1-2", 7));
    assert!(!sb.decrement_score("1-2", 1));
    assert_eq!(store.read(STORAGE_KEY).unwrap().as_deref(), Some("{}"));

    assert!(sb.increment_score("1-2", 1));
    assert_ne!(store.read(STORAGE_KEY).unwrap(), saved);
}

#[test]
fn end_match_and_reset_are_persisted() {
    let store = memory_store();
    let mut sb = open(&store);
    sb.start_match(&["A", "B"]).unwrap();
    sb.increment_score("1-2", 2);
    sb.end_match(EndMatchPolicy::KeepScores).unwrap();

    let reopened = open(&store);
    assert_eq!(reopened.session().status, SessionStatus::Setup);
    assert_eq!(reopened.session().matchup("1-2").unwrap().score2, 1);

    sb.reset_scores();
    let reopened = open(&store);
    assert_eq!(reopened.session().matchup("1-2").unwrap().score2, 0);
}

#[test]
fn slot_uses_the_documented_layout() {
    let store = memory_store();
    let mut sb = open(&store);
    sb.start_match(&["A", "B"]).unwrap();
    sb.increment_score("1-2", 2);

    let raw = store.read(STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["status"], "PLAYING");
    assert_eq!(json["players"][0]["id"], 1);
    assert_eq!(json["players"][0]["name"], "A");
    assert_eq!(json["matchups"][0]["id"], "1-2");
    assert_eq!(json["matchups"][0]["player1Id"], 1);
    assert_eq!(json["matchups"][0]["player2Id"], 2);
    assert_eq!(json["matchups"][0]["score1"], 0);
    assert_eq!(json["matchups"][0]["score2"], 1);
}

#[test]
fn corrupt_slot_falls_back_to_defaults() {
    let store = memory_store();
    for raw in [
        "not json",
        r#"{"players": 5}"#,
        r#"{"status": "PAUSED"}"#,
        r#"{"players":[{"id":1,"name":"A"},{"id":2,"name":"B"}],"matchups":[{"id":"1-2","player1Id":1,"player2Id":2,"score1":-1,"score2":0}]}"#,
    ] {
        store.write(STORAGE_KEY, raw).unwrap();
        let sb = open(&store);
        assert_eq!(sb.session(), &Session::new(), "slot {raw:?} should be discarded");
    }
}

#[test]
fn inconsistent_slot_falls_back_to_defaults() {
    let store = memory_store();
    let raw = r#"{"players":[{"id":1,"name":"A"}],"matchups":[{"id":"1-2","player1Id":1,"player2Id":2,"score1":0,"score2":0}],"status":"PLAYING"}"#;
    store.write(STORAGE_KEY, raw).unwrap();
    assert_eq!(open(&store).session(), &Session::new());
}

#[test]
fn partial_slot_keeps_present_fields() {
    let store = memory_store();
    store
        .write(STORAGE_KEY, r#"{"players":[{"id":1,"name":"A"},{"id":2,"name":"B"}]}"#)
        .unwrap();
    let sb = open(&store);
    assert_eq!(sb.session().players.len(), 2);
    assert!(sb.session().matchups.is_empty());
    assert_eq!(sb.session().status, SessionStatus::Setup);
}

#[test]
fn quota_exceeded_keeps_memory_state() {
    let store = Arc::new(MemorySlotStore::with_quota(64));
    let mut sb = Scoreboard::open(store.clone(), STORAGE_KEY);
    sb.start_match(&["Alexandra", "Bartholomew", "Cornelius"]).unwrap();

    assert_eq!(sb.session().status, SessionStatus::Playing);
    assert!(sb.increment_score("1-2", 1));
    assert_eq!(sb.session().matchup("1-2").unwrap().score1, 1);
    assert_eq!(store.read(STORAGE_KEY).unwrap(), None);
    assert!(matches!(
        store.write(STORAGE_KEY, &"x".repeat(100)),
        Err(StorageError::QuotaExceeded { limit: 64, .. })
    ));
}

#[test]
fn file_store_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSlotStore::open(tmp.path().join("slots")).unwrap());

    let mut sb = Scoreboard::open(store.clone(), "billiards_score_data-test");
    sb.start_match(&["A", "B", "C", "D"]).unwrap();
    sb.increment_score("2-4", 4);
    assert!(tmp.path().join("slots").join("billiards_score_data-test.json").exists());

    let reopened = Scoreboard::open(store, "billiards_score_data-test");
    assert_eq!(reopened.session(), sb.session());
}

#[test]
fn file_store_missing_and_corrupt_slots() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSlotStore::open(tmp.path()).unwrap());
    assert_eq!(store.read("absent").unwrap(), None);

    std::fs::write(tmp.path().join("broken.json"), "{").unwrap();
    let sb = Scoreboard::open(store, "broken");
    assert_eq!(sb.session(), &Session::new());
}

#[test]
fn file_store_rejects_path_like_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileSlotStore::open(tmp.path()).unwrap();
    assert!(matches!(
        store.write("../escape", "{}"),
        Err(StorageError::InvalidKey(_))
    ));
    assert!(matches!(store.read(""), Err(StorageError::InvalidKey(_))));
}

#[test]
fn unwritable_file_store_keeps_memory_state() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSlotStore::open(tmp.path()).unwrap());
    // A directory where the slot file should go makes every write fail.
    std::fs::create_dir(tmp.path().join("blocked.json")).unwrap();

    let mut sb = Scoreboard::open(store, "blocked");
    sb.start_match(&["A", "B"]).unwrap();
    assert!(sb.increment_score("1-2", 1));
    assert_eq!(sb.stats().total_games, 1);
}

#[test]
fn scores_at_u32_max_do_not_overflow() {
    let store = memory_store();
    let raw = r#"{"players":[{"id":1,"name":"A"},{"id":2,"name":"B"}],"matchups":[{"id":"1-2","player1Id":1,"player2Id":2,"score1":4294967295,"score2":1}],"status":"PLAYING"}"#;
    store.write(STORAGE_KEY, raw).unwrap();
    let mut sb = open(&store);
    assert_eq!(sb.session().players.len(), 2);

    let stats = sb.stats();
    assert_eq!(stats.total_games, 4_294_967_296);
    let a = &stats.ranking[0];
    assert_eq!(a.name, "A");
    assert_eq!((a.wins, a.losses, a.total), (4_294_967_295, 1, 4_294_967_296));
    assert_eq!(a.net, 4_294_967_294);

    assert!(!sb.increment_score("1-2", 1));
    assert_eq!(sb.session().matchup("1-2").unwrap().score1, u32::MAX);
    assert!(sb.increment_score("1-2", 2));
    assert!(sb.decrement_score("1-2", 1));
    assert_eq!(sb.session().matchup("1-2").unwrap().score1, u32::MAX - 1);
}
