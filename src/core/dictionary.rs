//! Seams between the game core and whatever supplies and checks words.

use rand::rngs::SmallRng;

/// Supplies random words for secrets.
pub trait WordSupply {
    /// An arbitrary word with exactly `length` characters, if any is known.
    fn random_word(&self, rng: &mut SmallRng, length: usize) -> Option<String>;
}

/// Decides whether a composed guess is a real word.
///
/// Submission only enforces completeness and uniqueness; callers that want
/// dictionary or spell-checker validation plug it in here.
pub trait WordValidator {
    fn is_word(&self, word: &str) -> bool;
}

impl<F> WordValidator for F
where
    F: Fn(&str) -> bool,
{
    fn is_word(&self, word: &str) -> bool {
        self(word)
    }
}
