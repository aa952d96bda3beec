//! The role a code plays in a game, and its persisted tag form.
//!
//! Tag formats:
//! - `master(true)` / `master(false)` for the secret, argument is the hidden flag
//! - `guess`
//! - `attempt(exact,inexact,nomatch)` with one result tag per position, no spaces
//! - `unknown`
//!
//! Anything else decodes to [`Role::Unknown`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::core::matching::MatchResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Role {
    /// The code to be guessed.
    Secret { hidden: bool },
    /// The code currently being composed.
    Guess,
    /// A finalized guess with its per-position results.
    Attempt(Vec<MatchResult>),
    /// No semantic role, also what malformed tags decode to.
    Unknown,
}

impl Role {
    /// Decode a tag, falling back to `Unknown` for anything unrecognized.
    pub fn parse(tag: &str) -> Role {
        if tag == "guess" {
            Role::Guess
        } else if let Some(hidden) = argument(tag, "master(").and_then(parse_bool) {
            Role::Secret { hidden }
        } else if let Some(results) = argument(tag, "attempt(").and_then(parse_results) {
            Role::Attempt(results)
        } else {
            Role::Unknown
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Role::Secret { hidden: true })
    }

    pub fn match_results(&self) -> Option<&[MatchResult]> {
        match self {
            Role::Attempt(results) => Some(results),
            _ => None,
        }
    }
}

/// The text between `prefix` and a closing `)`.
fn argument<'a>(tag: &'a str, prefix: &str) -> Option<&'a str> {
    tag.strip_prefix(prefix)?.strip_suffix(')')
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// All tags must parse; one bad element rejects the whole list.
fn parse_results(s: &str) -> Option<Vec<MatchResult>> {
    if s.is_empty() {
        return Some(Vec::new());
    }
    s.split(',').map(|t| t.parse().ok()).collect()
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Secret { hidden } => write!(f, "master({})", hidden),
            Role::Guess => f.write_str("guess"),
            Role::Attempt(results) => {
                f.write_str("attempt(")?;
                for (i, m) in results.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(m.tag())?;
                }
                f.write_str(")")
            }
            Role::Unknown => f.write_str("unknown"),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        Role::parse(&tag)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MatchResult::*;

    #[test]
    fn tags_match_persisted_format() {
        assert_eq!(Role::Secret { hidden: true }.to_string(), "master(true)");
        assert_eq!(Role::Guess.to_string(), "guess");
        assert_eq!(
            Role::Attempt(vec![Exact, Inexact, NoMatch]).to_string(),
            "attempt(exact,inexact,nomatch)"
        );
        assert_eq!(Role::Attempt(vec![]).to_string(), "attempt()");
        assert_eq!(Role::Unknown.to_string(), "unknown");
    }

    #[test]
    fn malformed_tags_decode_to_unknown() {
        for tag in [
            "",
            "master",
            "master(yes)",
            "master(true",
            "attempt(exact,green)",
            "attempt(exact,,inexact)",
            "Guess",
            "secret(true)",
        ] {
            assert_eq!(Role::parse(tag), Role::Unknown, "tag {:?}", tag);
        }
    }

    #[test]
    fn empty_attempt_parses() {
        assert_eq!(Role::parse("attempt()"), Role::Attempt(vec![]));
    }

    #[test]
    fn derived_accessors() {
        assert!(Role::Secret { hidden: true }.is_hidden());
        assert!(!Role::Secret { hidden: false }.is_hidden());
        assert!(!Role::Guess.is_hidden());
        assert_eq!(Role::Attempt(vec![Exact]).match_results(), Some(&[Exact][..]));
        assert_eq!(Role::Guess.match_results(), None);
    }
}
