//! Core word-guessing game logic
//!
//! Pegs, scoring, code roles, codes and the session state machine. Nothing
//! here performs I/O; words come in through the [`WordSupply`] seam.

pub mod code;
pub mod common;
pub mod config;
pub mod dictionary;
pub mod matching;
pub mod peg;
pub mod role;
pub mod session;

// Re-export commonly used types
pub use code::{Code, CodeId};
pub use common::{CodeError, PegError, WordsError};
pub use config::*;
pub use dictionary::{WordSupply, WordValidator};
pub use matching::{match_pegs, MatchResult};
pub use peg::{join_pegs, split_word, Alphabet, Peg};
pub use role::Role;
pub use session::{Choice, GameSession, SessionFilter, SessionId, SessionState, SessionStatus};
