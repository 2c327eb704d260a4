use crate::ScrapeEvent;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ScrapeEvent);
}

/// Sink for callers that do not track progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn emit(&self, _event: ScrapeEvent) {}
}
