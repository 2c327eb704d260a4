use docscrape_engine::{ProgressSink, ScrapeEvent};
use scrape_logging::scrape_debug;

/// Reports mode progress at debug level.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn emit(&self, event: ScrapeEvent) {
        match event {
            ScrapeEvent::Started { mode, total } => {
                scrape_debug!("{}: {} pages to visit", mode, total);
            }
            ScrapeEvent::Advanced { index, total, url } => {
                scrape_debug!("[{}/{}] {}", index + 1, total, url);
            }
            ScrapeEvent::Finished { mode } => scrape_debug!("{}: all pages visited", mode),
        }
    }
}
