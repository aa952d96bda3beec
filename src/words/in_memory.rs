use std::collections::VecDeque;

use tokio::task::yield_now;

use crate::words::LineSource;

/// Serves a fixed list of lines, yielding to the runtime between them.
pub struct InMemorySource {
    lines: VecDeque<String>,
}

impl InMemorySource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait::async_trait]
impl LineSource for InMemorySource {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        yield_now().await;
        Ok(self.lines.pop_front())
    }

    fn describe(&self) -> String {
        format!("in-memory list ({} lines left)", self.lines.len())
    }
}
