use std::sync::Arc;

use anyhow::anyhow;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use word_guesser::{
    FileSource, InMemorySource, LineSource, LoadState, ReaderSource, Words, WordsError,
};

/// Yields its lines, then fails.
struct FailingSource {
    lines: Vec<&'static str>,
}

#[async_trait::async_trait]
impl LineSource for FailingSource {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        match self.lines.pop() {
            Some(line) => Ok(Some(line.to_string())),
            None => Err(anyhow!("connection reset")),
        }
    }
}

/// Lines arrive over a channel; the source ends when the sender is dropped.
struct ChannelSource {
    rx: mpsc::Receiver<String>,
}

#[async_trait::async_trait]
impl LineSource for ChannelSource {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.rx.recv().await)
    }

    fn describe(&self) -> String {
        "channel".into()
    }
}

#[tokio::test]
async fn load_replaces_seed_words() -> anyhow::Result<()> {
    let words = Words::new();
    assert_eq!(words.state(), LoadState::Seed);
    let count = words
        .load(InMemorySource::new(["apple", "", "  pear  ", "Plum", "APPLE"]))
        .await?;
    assert_eq!(count, 3);
    assert_eq!(words.state(), LoadState::Loaded);
    assert!(words.contains("Apple"));
    assert!(words.contains("PEAR"));
    assert!(!words.contains("MOON"));
    assert_eq!(words.count_of_length(4), 2);
    Ok(())
}

#[tokio::test]
async fn failed_load_keeps_seed_words() {
    let words = Words::new();
    let result = words
        .load(FailingSource {
            lines: vec!["apple", "pear"],
        })
        .await;
    assert!(result.is_err());
    assert_eq!(words.state(), LoadState::Failed);
    assert_eq!(words.total_count(), 4);
    assert!(words.contains("moon"));
    assert!(!words.contains("apple"));

    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(
        words.try_random_word(&mut rng, 8),
        Err(WordsError::NoWordOfLength(8))
    );
}

#[tokio::test]
async fn missing_file_is_a_failed_load() {
    let words = Words::new();
    let path = std::env::temp_dir().join("word_guesser_no_such_file.txt");
    assert!(words.load(FileSource::new(&path)).await.is_err());
    assert_eq!(words.state(), LoadState::Failed);
    assert!(words.contains("QUEUE"));
}

#[tokio::test]
async fn loads_from_file() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("word_guesser_words_{}.txt", std::process::id()));
    tokio::fs::write(&path, "cat\ndog\n\nhorse\r\n").await?;
    let words = Words::new();
    let count = words.load(FileSource::new(&path)).await?;
    tokio::fs::remove_file(&path).await?;
    assert_eq!(count, 3);
    assert!(words.contains("HORSE"));
    Ok(())
}

#[tokio::test]
async fn loads_from_any_reader() -> anyhow::Result<()> {
    let text: &[u8] = b"alpha\nbeta\ngamma\n";
    let words = Words::empty();
    assert_eq!(words.total_count(), 0);
    let count = words.load(ReaderSource::new(text, "inline")).await?;
    assert_eq!(count, 3);
    assert!(words.is_loaded());
    Ok(())
}

#[tokio::test]
async fn empty_source_loads_an_empty_dictionary() -> anyhow::Result<()> {
    let words = Words::new();
    let count = words.load(InMemorySource::new(Vec::<String>::new())).await?;
    assert_eq!(count, 0);
    assert_eq!(words.state(), LoadState::Loaded);
    assert_eq!(words.total_count(), 0);
    Ok(())
}

#[tokio::test]
async fn load_happens_once() -> anyhow::Result<()> {
    let words = Arc::new(Words::new());
    words.load(InMemorySource::new(["lion"])).await?;
    assert!(words.load(InMemorySource::new(["tiger"])).await.is_err());
    assert!(words.spawn_load(InMemorySource::new(["bear"])).is_none());
    assert!(words.contains("LION"));
    assert!(!words.contains("TIGER"));
    assert!(!words.contains("BEAR"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn readers_see_seed_until_the_swap() -> anyhow::Result<()> {
    let words = Arc::new(Words::new());
    let (tx, rx) = mpsc::channel(8);
    let handle = words
        .spawn_load(ChannelSource { rx })
        .ok_or_else(|| anyhow!("load refused"))?;

    for word in ["wolf", "fox", "otter", "badger"] {
        tx.send(word.to_string()).await?;
    }
    tokio::task::yield_now().await;
    assert_eq!(words.state(), LoadState::Loading);
    assert_eq!(words.total_count(), 4);
    assert!(words.contains("MOON"));
    assert!(!words.contains("WOLF"));

    let mut rng = SmallRng::seed_from_u64(3);
    assert_eq!(
        words.try_random_word(&mut rng, 7),
        Err(WordsError::NotLoaded { length: 7 })
    );

    drop(tx);
    handle.await?;
    assert_eq!(words.state(), LoadState::Loaded);
    assert_eq!(words.total_count(), 4);
    assert!(words.contains("wolf"));
    assert!(!words.contains("MOON"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_readers_never_see_a_partial_mapping() -> anyhow::Result<()> {
    let words = Arc::new(Words::new());
    let lines: Vec<String> = (0..2000).map(|i| format!("w{:05}", i)).collect();
    let handle = words
        .spawn_load(InMemorySource::new(lines))
        .ok_or_else(|| anyhow!("load refused"))?;

    let reader = {
        let words = Arc::clone(&words);
        tokio::spawn(async move {
            loop {
                let count = words.total_count();
                assert!(count == 4 || count == 2000, "saw {} words", count);
                if count == 2000 {
                    break;
                }
                tokio::task::yield_now().await;
            }
        })
    };

    handle.await?;
    reader.await?;
    Ok(())
}
