//! Commonly used types and utilities for ease of import.

pub use crate::core::{
    match_pegs, Alphabet, Code, GameSession, MatchResult, Peg, Role, SessionFilter,
    SessionStatus, WordSupply, WordValidator,
};
pub use crate::words::{FileSource, InMemorySource, LineSource, LoadState, ReaderSource, Words};
pub use crate::init_logging;
