use std::time::{Duration, SystemTime};

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use word_guesser::{Alphabet, GameSession, Peg, SessionState, Words};

fn played_session(seed: u64, moves: usize) -> GameSession {
    let mut rng = SmallRng::seed_from_u64(seed);
    let words = Words::from_words(["MOON", "NOON", "SOON", "BEAR", "DEER", "LION", "MOAN"]);
    let mut session = GameSession::new(&words, &mut rng, Alphabet::english(), 4);
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    session.start_timing_at(start);
    let mut clock = start;
    for _ in 0..moves {
        if let Some(word) = words.random_word(&mut rng, 4) {
            for (i, c) in word.chars().enumerate() {
                session.set_guess_peg(Peg::new(c), i);
            }
            clock += Duration::from_secs(7);
            session.submit_guess_at(clock);
        }
    }
    session.stop_timing_at(clock + Duration::from_secs(3));
    session
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn session_bincode_roundtrip(seed in any::<u64>(), moves in 0usize..6) {
        let session = played_session(seed, moves);
        let bytes = bincode::serialize(&session).unwrap();
        let restored: GameSession = bincode::deserialize(&bytes).unwrap();
        prop_assert_eq!(restored.state(), session.state());
        prop_assert_eq!(restored.started_at(), None);
    }
}

#[test]
fn json_snapshot_keeps_history_and_flags() {
    let session = played_session(42, 4);
    let json = serde_json::to_string(&session).unwrap();
    let restored: GameSession = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.attempts(), session.attempts());
    assert_eq!(restored.is_completed(), session.is_completed());
    assert_eq!(restored.elapsed(), session.elapsed());
    assert_eq!(restored.secret().is_hidden(), session.secret().is_hidden());
}

#[test]
fn restored_history_is_most_recent_first() {
    let session = played_session(7, 5);
    let mut state: SessionState = session.clone().into();
    state.attempts.reverse();
    let restored = GameSession::from_state(state);
    let times: Vec<_> = restored.attempts().iter().map(|a| a.created_at()).collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn malformed_role_decodes_to_unknown() {
    let session = played_session(1, 1);
    let mut value = serde_json::to_value(&session).unwrap();
    value["guess"]["role"] = serde_json::Value::from("riddle");
    let restored: GameSession = serde_json::from_value(value).unwrap();
    assert_eq!(restored.guess().role(), &word_guesser::Role::Unknown);
}

#[test]
fn attempt_with_short_results_restores_as_unknown() {
    let session = played_session(3, 2);
    let mut value = serde_json::to_value(&session).unwrap();
    let attempts = value["attempts"].as_array_mut().unwrap();
    assert!(!attempts.is_empty());
    attempts[0]["role"] = serde_json::Value::from("attempt(exact)");
    let restored: GameSession = serde_json::from_value(value).unwrap();
    for attempt in restored.attempts() {
        if let Some(results) = attempt.match_results() {
            assert_eq!(results.len(), attempt.len());
        }
    }
    assert!(restored
        .attempts()
        .iter()
        .any(|a| a.role() == &word_guesser::Role::Unknown));
}
