//! Text presentation and command parsing for the terminal game.

use std::time::Duration;

use crate::core::{Choice, Code, GameSession, MatchResult, Peg};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the guess with this word and submit it.
    Guess(String),
    /// Put a symbol at a position of the guess (`:set 2 A`).
    Set { index: usize, peg: Peg },
    /// Clear a position of the guess (`:clear 2`).
    Clear(usize),
    /// Submit the guess as currently composed (`:submit`).
    Submit,
    /// New secret of the current length.
    Restart,
    /// New secret of another length.
    Length(usize),
    /// Toggle the play clock.
    Pause,
    Resume,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return if line.is_empty() || line.contains(char::is_whitespace) {
            Command::Invalid(line.to_string())
        } else {
            Command::Guess(line.to_uppercase())
        };
    };
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();
    match (name.as_str(), args.as_slice()) {
        ("q" | "quit", []) => Command::Quit,
        ("h" | "help", []) => Command::Help,
        ("r" | "restart", []) => Command::Restart,
        ("submit", []) => Command::Submit,
        ("pause", []) => Command::Pause,
        ("resume", []) => Command::Resume,
        ("length", [n]) => n
            .parse()
            .map(Command::Length)
            .unwrap_or_else(|_| Command::Invalid(line.to_string())),
        ("clear", [i]) => parse_position(i)
            .map(Command::Clear)
            .unwrap_or_else(|| Command::Invalid(line.to_string())),
        ("set", [i, symbol]) => {
            let mut chars = symbol.chars();
            match (parse_position(i), chars.next(), chars.next()) {
                (Some(index), Some(c), None) => Command::Set {
                    index,
                    peg: Peg::new(c.to_ascii_uppercase()),
                },
                _ => Command::Invalid(line.to_string()),
            }
        }
        _ => Command::Invalid(line.to_string()),
    }
}

/// Positions are typed 1-based.
fn parse_position(text: &str) -> Option<usize> {
    text.parse::<usize>().ok()?.checked_sub(1)
}

pub fn match_symbol(result: MatchResult) -> char {
    match result {
        MatchResult::Exact => '+',
        MatchResult::Inexact => '~',
        MatchResult::NoMatch => '-',
    }
}

/// Pegs separated by spaces; `_` for a missing peg, `?` for every peg of a
/// hidden secret.
pub fn render_code(code: &Code) -> String {
    code.pegs()
        .iter()
        .map(|peg| match peg.symbol() {
            _ if code.is_hidden() => '?',
            Some(c) => c,
            None => '_',
        })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// An attempt followed by its per-position score.
pub fn render_attempt(code: &Code) -> String {
    let score: String = code
        .match_results()
        .unwrap_or_default()
        .iter()
        .map(|&r| match_symbol(r))
        .collect();
    format!("{}   {}", render_code(code), score)
}

/// The alphabet with each symbol's best result so far.
pub fn render_choices(choices: &[Choice]) -> String {
    choices
        .iter()
        .map(|choice| {
            let mark = choice.best_match.map_or(' ', match_symbol);
            format!("{}{}", choice.peg, mark)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn render_session(session: &GameSession) -> String {
    let mut lines = vec![format!("Secret: {}", render_code(session.secret()))];
    for attempt in session.attempts().iter().rev() {
        lines.push(format!("        {}", render_attempt(attempt)));
    }
    if !session.is_completed() {
        lines.push(format!("Guess:  {}", render_code(session.guess())));
    }
    lines.push(render_choices(&session.choices()));
    lines.push(format!(
        "Time:   {}",
        format_elapsed(session.total_elapsed())
    ));
    lines.join("\n")
}

pub const HELP: &str = "\
Type a word to guess it. Commands:
  :set <pos> <letter>   put a letter in the guess
  :clear <pos>          clear a position
  :submit               submit the composed guess
  :restart              new secret, same length
  :length <n>           new secret of length n
  :pause / :resume      stop or restart the clock
  :help                 this text
  :quit                 leave";
