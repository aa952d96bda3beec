use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};

use word_guesser::cli::{self, parse_command, render_session, Command};
use word_guesser::{
    init_logging, match_pegs, selectable_lengths, split_word, Alphabet, FileSource, GameSession,
    Words, DEFAULT_CODE_LENGTH,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game on the terminal.
    Play {
        #[arg(long, help = "Dictionary file, one word per line")]
        words: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_CODE_LENGTH)]
        length: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Score one guess against a secret and print the per-position result.
    Score { guess: String, secret: String },
    /// Print sample sessions as JSON.
    Samples {
        #[arg(long, help = "Dictionary file, one word per line")]
        words: Option<PathBuf>,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            words,
            length,
            seed,
        } => play(words, length, make_rng(seed)).await?,
        Commands::Score { guess, secret } => {
            let guess = split_word(&guess.to_uppercase());
            let secret = split_word(&secret.to_uppercase());
            let results = match_pegs(&guess, &secret);
            let symbols: String = results.iter().map(|&r| cli::match_symbol(r)).collect();
            let tags: Vec<&str> = results.iter().map(|r| r.tag()).collect();
            println!("{}  {}", symbols, tags.join(","));
        }
        Commands::Samples { words, seed } => {
            let dictionary = Words::new();
            if let Some(path) = words {
                // Failures are logged by the dictionary; the seed words remain.
                let _ = dictionary.load(FileSource::new(path)).await;
            }
            let mut rng = match seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let sessions = GameSession::samples(&dictionary, &mut rng);
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
    }
    Ok(())
}

async fn play(path: Option<PathBuf>, length: usize, mut rng: SmallRng) -> anyhow::Result<()> {
    if !selectable_lengths().contains(&length) {
        bail!(
            "length must be between {} and {}",
            selectable_lengths().start(),
            selectable_lengths().end()
        );
    }

    let words = Arc::new(Words::new());
    if let Some(path) = path {
        words.spawn_load(FileSource::new(path));
    }

    let mut session = GameSession::new(words.as_ref(), &mut rng, Alphabet::english(), length);
    session.start_timing();
    let mut known_words = words.total_count();

    println!("{}\n", cli::HELP);
    println!("{}", render_session(&session));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let count = words.total_count();
        if count != known_words {
            known_words = count;
            if session.refresh_secret(words.as_ref(), &mut rng) {
                println!("Dictionary ready ({} words); drew a new secret.", count);
            }
        }

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => {
                println!("{}", cli::HELP);
                continue;
            }
            Command::Guess(word) => {
                if word.chars().count() != session.code_length() {
                    println!("Need a {}-letter word.", session.code_length());
                    continue;
                }
                if words.is_loaded() && !words.contains(&word) {
                    println!("{} is not a word.", word);
                    continue;
                }
                if !session.attempt_word(&word) {
                    println!("Already tried {}.", word);
                    continue;
                }
            }
            Command::Set { index, peg } => session.set_guess_peg(peg, index),
            Command::Clear(index) => session.clear_guess_peg(index),
            Command::Submit => {
                let accepted = if words.is_loaded() {
                    session.submit_validated_guess(words.as_ref())
                } else {
                    session.submit_guess()
                };
                if !accepted {
                    println!("Guess not accepted.");
                    continue;
                }
            }
            Command::Restart => session.restart(words.as_ref(), &mut rng),
            Command::Length(n) if selectable_lengths().contains(&n) => {
                session.select_length(words.as_ref(), &mut rng, n)
            }
            Command::Length(n) => {
                println!("No games of length {}.", n);
                continue;
            }
            Command::Pause => session.stop_timing(),
            Command::Resume => session.start_timing(),
            Command::Invalid(text) => {
                println!("Unrecognized input {:?}; :help lists commands.", text);
                continue;
            }
        }

        println!("{}", render_session(&session));
        if session.is_completed() {
            println!(
                "Solved in {} attempts! :restart or :length <n> to play again.",
                session.attempts().len()
            );
        }
    }

    session.stop_timing();
    println!("Played for {}.", cli::format_elapsed(session.elapsed()));
    Ok(())
}
