//! Codes: fixed-length peg sequences tagged with a role.

use std::time::SystemTime;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::core::common::CodeError;
use crate::core::dictionary::WordSupply;
use crate::core::matching::{match_pegs, MatchResult};
use crate::core::peg::{join_pegs, split_word, Alphabet, Peg};
use crate::core::role::Role;

/// Stable identity of a code for storage and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeId(pub u64);

impl CodeId {
    pub fn random() -> Self {
        CodeId(rand::random())
    }
}

/// An ordered sequence of pegs with a role.
///
/// The pegs are the single source of truth; the word is derived on read and
/// every mutator keeps the length fixed. An `Attempt` role always carries
/// exactly one result per peg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CodeRecord")]
pub struct Code {
    id: CodeId,
    role: Role,
    pegs: Vec<Peg>,
    created_at: SystemTime,
}

/// Persisted form of a [`Code`], checked on the way in.
#[derive(Deserialize)]
struct CodeRecord {
    id: CodeId,
    role: Role,
    pegs: Vec<Peg>,
    created_at: SystemTime,
}

impl From<CodeRecord> for Code {
    fn from(record: CodeRecord) -> Self {
        Self {
            id: record.id,
            role: fitted_role(record.role, record.pegs.len()),
            pegs: record.pegs,
            created_at: record.created_at,
        }
    }
}

fn check_role(role: &Role, length: usize) -> Result<(), CodeError> {
    match role.match_results() {
        Some(results) if results.len() != length => Err(CodeError::ResultsLengthMismatch {
            pegs: length,
            results: results.len(),
        }),
        _ => Ok(()),
    }
}

/// `role`, or `Unknown` when it cannot describe `length` pegs.
fn fitted_role(role: Role, length: usize) -> Role {
    match check_role(&role, length) {
        Ok(()) => role,
        Err(e) => {
            log::debug!("Dropping role {}: {}", role, e);
            Role::Unknown
        }
    }
}

impl Code {
    /// A code with `role` and `pegs`. An attempt role whose results do not
    /// line up with the pegs becomes `Unknown`.
    pub fn new(role: Role, pegs: Vec<Peg>) -> Self {
        Self {
            id: CodeId::random(),
            role: fitted_role(role, pegs.len()),
            pegs,
            created_at: SystemTime::now(),
        }
    }

    /// A code of `length` missing pegs.
    pub fn with_length(role: Role, length: usize) -> Self {
        Self::new(role, vec![Peg::MISSING; length])
    }

    /// A code with one peg per character of `word`.
    pub fn from_word(role: Role, word: &str) -> Self {
        Self::new(role, split_word(word))
    }

    /// Override the creation time, used when restoring history.
    pub fn with_created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> CodeId {
        self.id
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn set_role(&mut self, role: Role) -> Result<(), CodeError> {
        check_role(&role, self.pegs.len())?;
        self.role = role;
        Ok(())
    }

    /// Show a hidden secret; other roles are left alone.
    pub fn reveal(&mut self) {
        if let Role::Secret { hidden } = &mut self.role {
            *hidden = false;
        }
    }

    pub fn clear_role(&mut self) {
        self.role = Role::Unknown;
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

    /// Concatenation of the pegs in order.
    pub fn word(&self) -> String {
        join_pegs(&self.pegs)
    }

    /// `true` when no peg is missing.
    pub fn is_complete(&self) -> bool {
        !self.pegs.iter().any(|p| p.is_missing())
    }

    pub fn is_hidden(&self) -> bool {
        self.role.is_hidden()
    }

    /// Results attached to an attempt, `None` for other roles.
    pub fn match_results(&self) -> Option<&[MatchResult]> {
        self.role.match_results()
    }

    pub fn set_peg(&mut self, index: usize, peg: Peg) -> Result<(), CodeError> {
        let length = self.pegs.len();
        let slot = self
            .pegs
            .get_mut(index)
            .ok_or(CodeError::IndexOutOfBounds { index, length })?;
        *slot = peg;
        Ok(())
    }

    pub fn clear_peg(&mut self, index: usize) -> Result<(), CodeError> {
        self.set_peg(index, Peg::MISSING)
    }

    /// Replace all pegs; the length must not change.
    pub fn set_pegs(&mut self, pegs: Vec<Peg>) -> Result<(), CodeError> {
        if pegs.len() != self.pegs.len() {
            return Err(CodeError::LengthMismatch {
                expected: self.pegs.len(),
                actual: pegs.len(),
            });
        }
        self.pegs = pegs;
        Ok(())
    }

    /// Replace the word, re-splitting it into pegs.
    pub fn set_word(&mut self, word: &str) -> Result<(), CodeError> {
        self.set_pegs(split_word(word))
    }

    /// Fill every position with the missing peg.
    pub fn reset(&mut self) {
        self.pegs.fill(Peg::MISSING);
    }

    /// Overwrite pegs with a random word of the current length.
    ///
    /// Positions are written left to right, at most `alphabet.len()` of them.
    /// With no word of this length available every peg becomes missing.
    pub fn randomize(&mut self, words: &dyn WordSupply, rng: &mut SmallRng, alphabet: &Alphabet) {
        match words.random_word(rng, self.pegs.len()) {
            Some(word) => self.write_word(&word, alphabet),
            None => self.reset(),
        }
    }

    /// Write `word` over the pegs left to right, at most `alphabet.len()`
    /// positions. Pegs beyond the word or the limit keep their value.
    pub fn write_word(&mut self, word: &str, alphabet: &Alphabet) {
        let limit = alphabet.len();
        for (slot, symbol) in self.pegs.iter_mut().zip(word.chars()).take(limit) {
            *slot = Peg::new(symbol);
        }
    }

    /// Score this code against `other`.
    pub fn match_against(&self, other: &Code) -> Vec<MatchResult> {
        match_pegs(&self.pegs, &other.pegs)
    }
}
