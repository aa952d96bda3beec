//! Dictionary service
//!
//! [`Words`] maps word length to the set of known (uppercased) words. It
//! starts from a built-in seed set and is populated once, in the background,
//! from a [`LineSource`]. Readers always see a whole snapshot: either the
//! mapping before the load or the one produced by it.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::bail;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use tokio::task::JoinHandle;

use crate::core::{WordSupply, WordValidator, WordsError, SEED_WORDS};

mod in_memory;
mod reader;
mod source;

pub use in_memory::InMemorySource;
pub use reader::{FileSource, ReaderSource};
pub use source::LineSource;

/// Where the dictionary is in its one-shot load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Only the built-in seed words are available; no load has begun.
    #[default]
    Seed,
    /// A load is in flight; queries are served from the seed mapping.
    Loading,
    /// The loaded mapping replaced the seed.
    Loaded,
    /// The load failed; the prior mapping stays in place for good.
    Failed,
}

impl LoadState {
    /// True while the mapping still holds only pre-load data.
    pub fn is_pending(self) -> bool {
        matches!(self, LoadState::Seed | LoadState::Loading)
    }
}

#[derive(Debug, Default)]
struct Snapshot {
    words: HashMap<usize, BTreeSet<String>>,
    state: LoadState,
}

impl Snapshot {
    fn build<I, S>(words: I, state: LoadState) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut snapshot = Snapshot {
            words: HashMap::new(),
            state,
        };
        for word in words {
            snapshot.insert(word.as_ref());
        }
        snapshot
    }

    fn insert(&mut self, line: &str) -> bool {
        match normalize(line) {
            Some(word) => self
                .words
                .entry(word.chars().count())
                .or_default()
                .insert(word),
            None => false,
        }
    }

    fn total_count(&self) -> usize {
        self.words.values().map(BTreeSet::len).sum()
    }
}

fn normalize(line: &str) -> Option<String> {
    let word = line.trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_uppercase())
    }
}

/// Shared, concurrently readable dictionary.
///
/// Wrap it in an [`Arc`] to hand it to [`Words::spawn_load`] and to every
/// session that needs secrets or word validation.
#[derive(Debug)]
pub struct Words {
    snapshot: RwLock<Arc<Snapshot>>,
    load_started: AtomicBool,
}

impl Default for Words {
    fn default() -> Self {
        Self::new()
    }
}

impl Words {
    /// A dictionary holding the built-in seed words, one per selectable
    /// length.
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::build(SEED_WORDS, LoadState::Seed), false)
    }

    /// A dictionary with no words at all, not yet loaded.
    pub fn empty() -> Self {
        Self::with_snapshot(Snapshot::default(), false)
    }

    /// An already loaded dictionary; further loads are refused.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_snapshot(Snapshot::build(words, LoadState::Loaded), true)
    }

    fn with_snapshot(snapshot: Snapshot, load_started: bool) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            load_started: AtomicBool::new(load_started),
        }
    }

    fn current(&self) -> Arc<Snapshot> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    fn replace(&self, snapshot: Snapshot) {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(snapshot);
    }

    fn set_state(&self, state: LoadState) {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(Snapshot {
            words: guard.words.clone(),
            state,
        });
    }

    pub fn state(&self) -> LoadState {
        self.current().state
    }

    pub fn is_loaded(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        let Some(word) = normalize(word) else {
            return false;
        };
        self.current()
            .words
            .get(&word.chars().count())
            .is_some_and(|set| set.contains(&word))
    }

    pub fn total_count(&self) -> usize {
        self.current().total_count()
    }

    pub fn count_of_length(&self, length: usize) -> usize {
        self.current().words.get(&length).map_or(0, BTreeSet::len)
    }

    /// A random word of exactly `length` characters, or the reason there
    /// is none.
    pub fn try_random_word(&self, rng: &mut SmallRng, length: usize) -> Result<String, WordsError> {
        let snapshot = self.current();
        if let Some(word) = snapshot
            .words
            .get(&length)
            .and_then(|set| set.iter().choose(rng))
        {
            return Ok(word.clone());
        }
        if snapshot.state.is_pending() {
            Err(WordsError::NotLoaded { length })
        } else {
            Err(WordsError::NoWordOfLength(length))
        }
    }

    /// Like [`Words::try_random_word`], logging absence instead of
    /// returning it.
    pub fn random_word(&self, rng: &mut SmallRng, length: usize) -> Option<String> {
        match self.try_random_word(rng, length) {
            Ok(word) => Some(word),
            Err(e) => {
                log::warn!("Words could not find a random word: {}", e);
                None
            }
        }
    }

    fn begin_load(&self) -> bool {
        if self.load_started.swap(true, Ordering::SeqCst) {
            log::warn!("Words load already started; ignoring second request");
            return false;
        }
        self.set_state(LoadState::Loading);
        true
    }

    /// Load the dictionary from `source`, replacing the current mapping in
    /// one step once every line has been read. Returns the number of words
    /// now known.
    ///
    /// A failure leaves the prior mapping in place and marks the load
    /// [`LoadState::Failed`]. Only the first call on a dictionary loads;
    /// later calls return an error without touching the mapping.
    pub async fn load<S>(&self, source: S) -> anyhow::Result<usize>
    where
        S: LineSource,
    {
        if !self.begin_load() {
            bail!("dictionary load already started");
        }
        self.run_load(source).await
    }

    async fn run_load<S>(&self, mut source: S) -> anyhow::Result<usize>
    where
        S: LineSource,
    {
        let origin = source.describe();
        let mut loaded = Snapshot {
            words: HashMap::new(),
            state: LoadState::Loaded,
        };
        loop {
            match source.next_line().await {
                Ok(Some(line)) => {
                    loaded.insert(&line);
                }
                Ok(None) => break,
                Err(e) => {
                    log::warn!("Words could not load words from {}: {:#}", origin, e);
                    self.set_state(LoadState::Failed);
                    return Err(e);
                }
            }
        }
        let count = loaded.total_count();
        self.replace(loaded);
        log::info!("Words loaded {} words from {}", count, origin);
        Ok(count)
    }

    /// Start the one-shot background load. Returns `None` (and logs) when
    /// a load was already started. Errors are logged by the task, never
    /// propagated.
    pub fn spawn_load<S>(self: &Arc<Self>, source: S) -> Option<JoinHandle<()>>
    where
        S: LineSource + 'static,
    {
        if !self.begin_load() {
            return None;
        }
        let words = Arc::clone(self);
        Some(tokio::spawn(async move {
            let _ = words.run_load(source).await;
        }))
    }
}

impl WordSupply for Words {
    fn random_word(&self, rng: &mut SmallRng, length: usize) -> Option<String> {
        Words::random_word(self, rng, length)
    }
}

impl WordValidator for Words {
    fn is_word(&self, word: &str) -> bool {
        self.contains(word)
    }
}
