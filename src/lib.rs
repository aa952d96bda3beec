pub mod cli;
pub mod core;
mod logging;
pub mod prelude;
pub mod words;

pub use crate::core::*;
pub use logging::{init_logging, parse_level, LOG_ENV};
pub use words::{FileSource, InMemorySource, LineSource, LoadState, ReaderSource, Words};
