use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::words::LineSource;

/// Lines read from any buffered async reader (file, socket, stdin...).
pub struct ReaderSource<R> {
    lines: Lines<R>,
    name: String,
}

impl<R> ReaderSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            name: name.into(),
        }
    }
}

#[async_trait::async_trait]
impl<R> LineSource for ReaderSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        self.lines
            .next_line()
            .await
            .with_context(|| format!("reading {}", self.name))
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// A word file, opened on first read so that a missing file surfaces as a
/// load failure rather than at construction.
pub struct FileSource {
    path: PathBuf,
    reader: Option<ReaderSource<BufReader<File>>>,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            reader: None,
        }
    }
}

#[async_trait::async_trait]
impl LineSource for FileSource {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        if self.reader.is_none() {
            let file = File::open(&self.path)
                .await
                .with_context(|| format!("opening {}", self.path.display()))?;
            self.reader = Some(ReaderSource::new(
                BufReader::new(file),
                self.path.display().to_string(),
            ));
        }
        match self.reader.as_mut() {
            Some(reader) => reader.next_line().await,
            None => Ok(None),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
