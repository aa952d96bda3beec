/// An asynchronous stream of dictionary lines.
#[async_trait::async_trait]
pub trait LineSource: Send {
    /// The next raw line, `None` once the source is exhausted.
    async fn next_line(&mut self) -> anyhow::Result<Option<String>>;

    /// Human-readable origin, used in log messages.
    fn describe(&self) -> String {
        String::from("line source")
    }
}
