//! Game session: the secret, the guess being composed, the scored history,
//! play-time tracking and completion.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::{Duration, SystemTime};
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::core::code::Code;
use crate::core::config::SAMPLE_LENGTHS;
use crate::core::dictionary::{WordSupply, WordValidator};
use crate::core::matching::MatchResult;
use crate::core::peg::{Alphabet, Peg};
use crate::core::role::Role;

/// Stable identity of a session for storage and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn random() -> Self {
        SessionId(rand::random())
    }
}

/// Coarse lifecycle of a session, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Paused,
    Completed,
}

/// Which sessions a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionFilter {
    #[default]
    All,
    Completed,
}

/// Best result seen so far for one alphabet symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub peg: Peg,
    /// `None` when the symbol was never part of an attempt.
    pub best_match: Option<MatchResult>,
}

/// Serializable snapshot of a session.
///
/// The start timestamp is transient and not part of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub id: SessionId,
    pub alphabet: Alphabet,
    pub secret: Code,
    pub guess: Code,
    pub attempts: Vec<Code>,
    pub elapsed: Duration,
    pub ended_at: Option<SystemTime>,
    pub last_attempt_at: Option<SystemTime>,
    pub completed: bool,
}

/// One word-guessing game.
///
/// All mutators expect a single owner calling them serially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SessionState", from = "SessionState")]
pub struct GameSession {
    id: SessionId,
    alphabet: Alphabet,
    secret: Code,
    guess: Code,
    /// Most recent first.
    attempts: Vec<Code>,
    elapsed: Duration,
    started_at: Option<SystemTime>,
    ended_at: Option<SystemTime>,
    last_attempt_at: Option<SystemTime>,
    completed: bool,
}

impl GameSession {
    /// Create a session whose hidden secret is drawn from `words`.
    ///
    /// Timing does not start until [`GameSession::start_timing`].
    pub fn new(
        words: &dyn WordSupply,
        rng: &mut SmallRng,
        alphabet: Alphabet,
        code_length: usize,
    ) -> Self {
        let mut secret = Code::with_length(Role::Secret { hidden: true }, code_length);
        secret.randomize(words, rng, &alphabet);
        Self {
            id: SessionId::random(),
            alphabet,
            secret,
            guess: Code::with_length(Role::Guess, code_length),
            attempts: Vec::new(),
            elapsed: Duration::ZERO,
            started_at: None,
            ended_at: None,
            last_attempt_at: None,
            completed: false,
        }
    }

    /// Sample sessions for a new player: one per sample length, each with
    /// `length - 2` random attempts already made.
    pub fn samples(words: &dyn WordSupply, rng: &mut SmallRng) -> Vec<GameSession> {
        SAMPLE_LENGTHS
            .map(|length| {
                let mut session = GameSession::new(words, rng, Alphabet::english(), length);
                session.attempt_words(length.saturating_sub(2), || words.random_word(rng, length));
                session
            })
            .collect()
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn secret(&self) -> &Code {
        &self.secret
    }

    pub fn guess(&self) -> &Code {
        &self.guess
    }

    /// Scored attempts, most recent first.
    pub fn attempts(&self) -> &[Code] {
        &self.attempts
    }

    pub fn code_length(&self) -> usize {
        self.secret.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Play time accumulated by finished intervals.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<SystemTime> {
        self.ended_at
    }

    pub fn last_attempt_at(&self) -> Option<SystemTime> {
        self.last_attempt_at
    }

    pub fn last_attempt(&self) -> Option<&Code> {
        self.attempts.first()
    }

    /// The last attempt, or an all-missing `Unknown` code of the session length.
    pub fn last_attempt_or_placeholder(&self) -> Code {
        self.last_attempt()
            .cloned()
            .unwrap_or_else(|| Code::with_length(Role::Unknown, self.code_length()))
    }

    pub fn status(&self) -> SessionStatus {
        if self.completed {
            SessionStatus::Completed
        } else if self.started_at.is_some() {
            SessionStatus::InProgress
        } else if self.attempts.is_empty() && self.elapsed.is_zero() {
            SessionStatus::NotStarted
        } else {
            SessionStatus::Paused
        }
    }

    /// Start a fresh game of `length`: new secret, empty history, empty
    /// guess, timing restarted from zero.
    pub fn select_length(&mut self, words: &dyn WordSupply, rng: &mut SmallRng, length: usize) {
        self.select_length_at(words, rng, length, SystemTime::now());
    }

    pub fn select_length_at(
        &mut self,
        words: &dyn WordSupply,
        rng: &mut SmallRng,
        length: usize,
        now: SystemTime,
    ) {
        let mut secret = Code::with_length(Role::Secret { hidden: true }, length);
        secret.randomize(words, rng, &self.alphabet);
        self.secret = secret;
        self.attempts.clear();
        self.guess = Code::with_length(Role::Guess, length);
        self.started_at = Some(now);
        self.ended_at = None;
        self.last_attempt_at = None;
        self.elapsed = Duration::ZERO;
        self.completed = false;
        log::debug!("Session {} restarted with length {}", self.id.0, length);
    }

    /// [`GameSession::select_length`] with the current length.
    pub fn restart(&mut self, words: &dyn WordSupply, rng: &mut SmallRng) {
        let length = self.code_length();
        self.select_length(words, rng, length);
    }

    /// Re-roll the secret while no attempt has been made.
    ///
    /// Returns `true` if the secret changed. Meant for when the dictionary
    /// finishes loading after the session was created from seed words.
    pub fn refresh_secret(&mut self, words: &dyn WordSupply, rng: &mut SmallRng) -> bool {
        if !self.attempts.is_empty() {
            return false;
        }
        match words.random_word(rng, self.code_length()) {
            Some(word) => {
                self.secret.write_word(&word, &self.alphabet);
                true
            }
            None => false,
        }
    }

    /// Put `peg` at `index` of the guess; out-of-range indices are ignored.
    pub fn set_guess_peg(&mut self, peg: Peg, index: usize) {
        if let Err(e) = self.guess.set_peg(index, peg) {
            log::debug!("Ignoring guess peg: {}", e);
        }
    }

    /// Clear `index` of the guess; out-of-range indices are ignored.
    pub fn clear_guess_peg(&mut self, index: usize) {
        self.set_guess_peg(Peg::MISSING, index);
    }

    /// Score the guess and record it as an attempt.
    ///
    /// Returns `false`, changing nothing, when the guess has a missing peg or
    /// repeats an earlier attempt. Word validity is the caller's concern, see
    /// [`GameSession::submit_validated_guess`].
    pub fn submit_guess(&mut self) -> bool {
        self.submit_guess_at(SystemTime::now())
    }

    pub fn submit_guess_at(&mut self, now: SystemTime) -> bool {
        if !self.guess.is_complete() {
            log::debug!("Rejected incomplete guess {:?}", self.guess.word());
            return false;
        }
        if self.attempts.iter().any(|a| a.pegs() == self.guess.pegs()) {
            log::debug!("Rejected repeated guess {:?}", self.guess.word());
            return false;
        }

        let results = self.guess.match_against(&self.secret);
        let attempt =
            Code::new(Role::Attempt(results), self.guess.pegs().to_vec()).with_created_at(now);
        let solved = attempt.pegs() == self.secret.pegs();

        self.attempts.insert(0, attempt);
        self.last_attempt_at = Some(now);
        self.guess.reset();

        if solved {
            self.completed = true;
            self.ended_at = Some(now);
            self.secret.reveal();
            log::info!(
                "Session {} solved in {} attempts",
                self.id.0,
                self.attempts.len()
            );
        }
        true
    }

    /// Like [`GameSession::submit_guess`], but a complete guess must also
    /// pass `validator`.
    pub fn submit_validated_guess(&mut self, validator: &dyn WordValidator) -> bool {
        if self.guess.is_complete() && !validator.is_word(&self.guess.word()) {
            log::debug!("Rejected non-word {:?}", self.guess.word());
            return false;
        }
        self.submit_guess()
    }

    /// Replace the guess with `word` and submit it.
    ///
    /// Returns `false` when the word has the wrong length or submission fails.
    pub fn attempt_word(&mut self, word: &str) -> bool {
        if self.guess.set_word(word).is_err() {
            return false;
        }
        self.submit_guess()
    }

    /// Call `generate` `count` times, attempting every word it yields.
    pub fn attempt_words<F>(&mut self, count: usize, mut generate: F)
    where
        F: FnMut() -> Option<String>,
    {
        for _ in 0..count {
            if let Some(word) = generate() {
                self.attempt_word(&word);
            }
        }
    }

    /// Begin a timed interval unless the game is over.
    pub fn start_timing(&mut self) {
        self.start_timing_at(SystemTime::now());
    }

    pub fn start_timing_at(&mut self, now: SystemTime) {
        if !self.completed {
            self.started_at = Some(now);
        }
    }

    /// Close the running interval, folding it into the elapsed total.
    ///
    /// The interval ends at the completion time if there is one, else `now`.
    pub fn stop_timing(&mut self) {
        self.stop_timing_at(SystemTime::now());
    }

    pub fn stop_timing_at(&mut self, now: SystemTime) {
        self.elapsed += self.running_interval(now);
        self.started_at = None;
        self.ended_at = None;
    }

    /// Elapsed total including the interval still running at `now`.
    pub fn total_elapsed_at(&self, now: SystemTime) -> Duration {
        self.elapsed + self.running_interval(now)
    }

    pub fn total_elapsed(&self) -> Duration {
        self.total_elapsed_at(SystemTime::now())
    }

    fn running_interval(&self, now: SystemTime) -> Duration {
        match self.started_at {
            Some(start) => self
                .ended_at
                .unwrap_or(now)
                .duration_since(start)
                .unwrap_or_default(),
            None => Duration::ZERO,
        }
    }

    /// Best result per alphabet symbol across all attempts, in alphabet order.
    pub fn choices(&self) -> Vec<Choice> {
        let mut best: HashMap<Peg, MatchResult> = HashMap::new();
        for attempt in &self.attempts {
            if let Some(results) = attempt.match_results() {
                for (&peg, &result) in attempt.pegs().iter().zip(results) {
                    let entry = best.entry(peg).or_insert(result);
                    *entry = (*entry).max(result);
                }
            }
        }
        self.alphabet
            .pegs()
            .iter()
            .map(|&peg| Choice {
                peg,
                best_match: best.get(&peg).copied(),
            })
            .collect()
    }

    /// Best result for one symbol, `None` if it was never attempted.
    pub fn best_match(&self, peg: Peg) -> Option<MatchResult> {
        self.attempts
            .iter()
            .filter_map(|a| a.match_results().map(|r| (a.pegs(), r)))
            .flat_map(|(pegs, results)| pegs.iter().zip(results))
            .filter(|(&p, _)| p == peg)
            .map(|(_, &r)| r)
            .max()
    }

    /// Whether this session belongs in a listing with `filter` and a
    /// case-insensitive search over attempted words and the current guess.
    pub fn matches(&self, filter: SessionFilter, substring: &str) -> bool {
        if filter == SessionFilter::Completed && !self.completed {
            return false;
        }
        let needle = substring.to_uppercase();
        needle.is_empty()
            || self.attempts.iter().any(|a| a.word().contains(&needle))
            || self.guess.word().contains(&needle)
    }

    /// Listing order: sessions never attempted first, then most recent attempt first.
    pub fn by_recency(a: &GameSession, b: &GameSession) -> Ordering {
        match (a.last_attempt_at, b.last_attempt_at) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => b.cmp(&a),
        }
    }

    /// Snapshot for persistence.
    pub fn state(&self) -> SessionState {
        SessionState {
            id: self.id,
            alphabet: self.alphabet.clone(),
            secret: self.secret.clone(),
            guess: self.guess.clone(),
            attempts: self.attempts.clone(),
            elapsed: self.elapsed,
            ended_at: self.ended_at,
            last_attempt_at: self.last_attempt_at,
            completed: self.completed,
        }
    }

    /// Restore a session from a snapshot, ordering history most recent first.
    ///
    /// Everything is measured against the secret's length: a guess of
    /// another length is replaced by an empty one, and attempts of another
    /// length lose their role.
    pub fn from_state(state: SessionState) -> Self {
        let length = state.secret.len();
        let mut attempts = state.attempts;
        for attempt in attempts.iter_mut().filter(|a| a.len() != length) {
            log::debug!("Restored attempt {:?} does not fit length {}", attempt.word(), length);
            attempt.clear_role();
        }
        attempts.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        let guess = if state.guess.len() == length {
            state.guess
        } else {
            Code::with_length(Role::Guess, length)
        };
        Self {
            id: state.id,
            alphabet: state.alphabet,
            secret: state.secret,
            guess,
            attempts,
            elapsed: state.elapsed,
            started_at: None,
            ended_at: state.ended_at,
            last_attempt_at: state.last_attempt_at,
            completed: state.completed,
        }
    }
}

impl From<GameSession> for SessionState {
    fn from(session: GameSession) -> Self {
        session.state()
    }
}

impl From<SessionState> for GameSession {
    fn from(state: SessionState) -> Self {
        GameSession::from_state(state)
    }
}
