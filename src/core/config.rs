use std::ops::RangeInclusive;

/// Code length used when none is chosen.
pub const DEFAULT_CODE_LENGTH: usize = 4;
/// Shortest code a player may select.
pub const MIN_CODE_LENGTH: usize = 3;
/// Longest code a player may select.
pub const MAX_CODE_LENGTH: usize = 6;

/// English letters in keyboard order.
pub const ENGLISH_KEYBOARD: &str = "QWERTYUIOPASDFGHJKLZXCVBNM";

/// Built-in words available before the dictionary finishes loading, one per
/// selectable length.
pub const SEED_WORDS: [&str; 4] = ["KEY", "MOON", "QUEUE", "POWDER"];

/// Lengths of the sample sessions offered to a new player.
pub const SAMPLE_LENGTHS: RangeInclusive<usize> = 3..=5;

/// Lengths a player may select.
pub fn selectable_lengths() -> RangeInclusive<usize> {
    MIN_CODE_LENGTH..=MAX_CODE_LENGTH
}
