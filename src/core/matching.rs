//! Mastermind-style scoring of one peg sequence against another.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::core::peg::Peg;

/// Per-position outcome of scoring a guess.
///
/// Variants are declared worst to best, so the derived order is
/// `NoMatch < Inexact < Exact`. As an `Option`, `None` (never attempted)
/// sorts below all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchResult {
    /// Symbol absent, or every occurrence already consumed.
    NoMatch,
    /// Symbol present elsewhere in the secret.
    Inexact,
    /// Correct symbol in the correct position.
    Exact,
}

impl MatchResult {
    /// Every result, worst to best.
    pub const ALL: [MatchResult; 3] = [
        MatchResult::NoMatch,
        MatchResult::Inexact,
        MatchResult::Exact,
    ];

    /// Tag used in persisted role strings.
    pub const fn tag(self) -> &'static str {
        match self {
            MatchResult::NoMatch => "nomatch",
            MatchResult::Exact => "exact",
            MatchResult::Inexact => "inexact",
        }
    }

    /// The better of two optional results.
    pub fn best(a: Option<MatchResult>, b: Option<MatchResult>) -> Option<MatchResult> {
        a.max(b)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MatchResult {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatchResult::ALL
            .into_iter()
            .find(|m| m.tag() == s)
            .ok_or(())
    }
}

/// Score `guess` against `secret`.
///
/// The result has one entry per guess position. Exact matches are taken
/// first and consume their secret occurrence; remaining positions are then
/// scanned left to right, each consuming the first unconsumed occurrence of
/// its symbol. A symbol guessed more often than it remains in the secret is
/// only credited up to the remaining count. Missing pegs never match.
pub fn match_pegs(guess: &[Peg], secret: &[Peg]) -> Vec<MatchResult> {
    let mut remaining: Vec<Option<Peg>> = secret
        .iter()
        .map(|&p| if p.is_missing() { None } else { Some(p) })
        .collect();
    let mut results = vec![MatchResult::NoMatch; guess.len()];

    for (i, &peg) in guess.iter().enumerate() {
        if peg.is_missing() {
            continue;
        }
        if let Some(slot) = remaining.get_mut(i) {
            if *slot == Some(peg) {
                *slot = None;
                results[i] = MatchResult::Exact;
            }
        }
    }

    for (i, &peg) in guess.iter().enumerate() {
        if results[i] == MatchResult::Exact || peg.is_missing() {
            continue;
        }
        if let Some(slot) = remaining.iter_mut().find(|slot| **slot == Some(peg)) {
            *slot = None;
            results[i] = MatchResult::Inexact;
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::peg::split_word;
    use MatchResult::*;

    fn score(guess: &str, secret: &str) -> Vec<MatchResult> {
        match_pegs(&split_word(guess), &split_word(secret))
    }

    #[test]
    fn ordering_best_wins() {
        assert!(NoMatch < Inexact && Inexact < Exact);
        assert!(None < Some(NoMatch));
        assert_eq!(MatchResult::best(Some(Inexact), Some(Exact)), Some(Exact));
        assert_eq!(MatchResult::best(None, Some(NoMatch)), Some(NoMatch));
        assert_eq!(MatchResult::best(None, None), None);
    }

    #[test]
    fn exact_consumes_before_inexact() {
        // the only N is claimed by the exact match at index 3
        assert_eq!(score("NOON", "MOON"), vec![NoMatch, Exact, Exact, Exact]);
    }

    #[test]
    fn duplicates_credited_up_to_secret_count() {
        assert_eq!(
            score("AAAAA", "LLAMA"),
            vec![NoMatch, NoMatch, Exact, NoMatch, Exact]
        );
        assert_eq!(
            score("EERIE", "SPEED"),
            vec![Inexact, Inexact, NoMatch, NoMatch, NoMatch]
        );
    }

    #[test]
    fn inexact_left_to_right() {
        assert_eq!(score("OOXX", "ABOC"), vec![Inexact, NoMatch, NoMatch, NoMatch]);
    }

    #[test]
    fn missing_pegs_never_match() {
        let guess = [Peg::MISSING, Peg::new('O')];
        let secret = [Peg::MISSING, Peg::MISSING];
        assert_eq!(match_pegs(&guess, &secret), vec![NoMatch, NoMatch]);
    }

    #[test]
    fn longer_guess_than_secret() {
        assert_eq!(score("KEYS", "KEY"), vec![Exact, Exact, Exact, NoMatch]);
    }

    #[test]
    fn tags_parse_back() {
        for m in MatchResult::ALL {
            assert_eq!(m.tag().parse::<MatchResult>(), Ok(m));
        }
        assert!("green".parse::<MatchResult>().is_err());
    }

    #[test]
    fn all_is_sorted_worst_to_best() {
        assert!(MatchResult::ALL.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(MatchResult::ALL.iter().max(), Some(&Exact));
    }
}
