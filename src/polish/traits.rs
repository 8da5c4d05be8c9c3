use async_trait::async_trait;

/// Optional rewrite step applied to listing replies.
/// Implementations must hand back the input untouched on any failure.
#[async_trait]
pub trait ReplyPolisher: Send + Sync {
    /// Rewrite `text`, or return it unchanged
    async fn polish(&self, text: &str) -> String;

    /// Get the name of the polisher backend
    fn backend_name(&self) -> &'static str;
}

/// Used when no credential is configured; never leaves the process
pub struct NoopPolisher;

#[async_trait]
impl ReplyPolisher for NoopPolisher {
    async fn polish(&self, text: &str) -> String {
        text.to_string()
    }

    fn backend_name(&self) -> &'static str {
        "none"
    }
}
