//! Common error types for pegs, codes and the dictionary.

use std::fmt;

/// Errors returned when a persisted peg string cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PegError {
    /// The string was neither empty nor a single symbol.
    InvalidPeg(String),
}

impl fmt::Display for PegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PegError::InvalidPeg(s) => write!(f, "Invalid peg {:?}: expected empty or one symbol", s),
        }
    }
}

impl std::error::Error for PegError {}

/// Errors returned by checked `Code` mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeError {
    /// Specified index is out of range.
    IndexOutOfBounds { index: usize, length: usize },
    /// New pegs or word would change the code length.
    LengthMismatch { expected: usize, actual: usize },
    /// An attempt role must carry one result per peg.
    ResultsLengthMismatch { pegs: usize, results: usize },
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeError::IndexOutOfBounds { index, length } => {
                write!(f, "Index {} is out of range for code of length {}", index, length)
            }
            CodeError::LengthMismatch { expected, actual } => {
                write!(f, "Code length is fixed at {}, got {}", expected, actual)
            }
            CodeError::ResultsLengthMismatch { pegs, results } => {
                write!(f, "Attempt has {} pegs but {} match results", pegs, results)
            }
        }
    }
}

impl std::error::Error for CodeError {}

/// Reasons the dictionary could not produce a word.
///
/// Both variants mean "no word"; they are kept apart so callers can tell a
/// dictionary that is still loading from one that simply lacks the length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordsError {
    /// Only seed data is available and it has no word of this length.
    NotLoaded { length: usize },
    /// The dictionary is loaded (or failed to load) and has no word of this length.
    NoWordOfLength(usize),
}

impl fmt::Display for WordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordsError::NotLoaded { length } => {
                write!(f, "Dictionary not loaded yet, no word of length {}", length)
            }
            WordsError::NoWordOfLength(length) => {
                write!(f, "Dictionary has no word of length {}", length)
            }
        }
    }
}

impl std::error::Error for WordsError {}
