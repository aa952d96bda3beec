//! Pegs and the alphabet they are drawn from.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::core::common::PegError;
use crate::core::config::ENGLISH_KEYBOARD;

/// One position of a code: a symbol, or the missing sentinel for an unfilled slot.
///
/// Persisted as a string: `""` for missing, otherwise the symbol itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Peg(Option<char>);

impl Peg {
    /// The unfilled slot.
    pub const MISSING: Peg = Peg(None);

    pub const fn new(symbol: char) -> Self {
        Peg(Some(symbol))
    }

    pub const fn symbol(self) -> Option<char> {
        self.0
    }

    pub const fn is_missing(self) -> bool {
        self.0.is_none()
    }
}

impl Default for Peg {
    fn default() -> Self {
        Peg::MISSING
    }
}

impl From<char> for Peg {
    fn from(symbol: char) -> Self {
        Peg::new(symbol)
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(c) => write!(f, "{}", c),
            None => Ok(()),
        }
    }
}

impl From<Peg> for String {
    fn from(peg: Peg) -> Self {
        peg.to_string()
    }
}

impl TryFrom<String> for Peg {
    type Error = PegError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Peg {
    type Err = PegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Peg::MISSING),
            (Some(c), None) => Ok(Peg::new(c)),
            _ => Err(PegError::InvalidPeg(s.to_string())),
        }
    }
}

/// Concatenate pegs into a word; missing pegs contribute nothing.
pub fn join_pegs(pegs: &[Peg]) -> String {
    pegs.iter().filter_map(|p| p.symbol()).collect()
}

/// Split a word into one peg per character.
pub fn split_word(word: &str) -> Vec<Peg> {
    word.chars().map(Peg::new).collect()
}

/// The fixed, ordered set of symbols selectable for pegs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    pegs: Vec<Peg>,
}

impl Alphabet {
    /// Build an alphabet from pegs, dropping missing sentinels and repeats.
    pub fn new(pegs: impl IntoIterator<Item = Peg>) -> Self {
        let mut unique: Vec<Peg> = Vec::new();
        for peg in pegs {
            if !peg.is_missing() && !unique.contains(&peg) {
                unique.push(peg);
            }
        }
        Self { pegs: unique }
    }

    /// A–Z in keyboard order.
    pub fn english() -> Self {
        Self::from_symbols(ENGLISH_KEYBOARD)
    }

    /// One peg per character of `symbols`.
    pub fn from_symbols(symbols: &str) -> Self {
        Self::new(symbols.chars().map(Peg::new))
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    pub fn len(&self) -> usize {
        self.pegs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pegs.is_empty()
    }

    pub fn contains(&self, peg: Peg) -> bool {
        self.pegs.contains(&peg)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::english()
    }
}
