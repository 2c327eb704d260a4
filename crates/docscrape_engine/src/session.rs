use scrape_logging::{scrape_debug, scrape_error, scrape_warn};
use url::Url;

use crate::decode::decode_html;
use crate::{FetchFailure, FetchOutput, Fetcher};

/// A fetched page decoded to text, tagged with the URL it was requested from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: Url,
    pub html: String,
}

/// The shared client every mode fetches through.
///
/// Transport failures stop here: they are logged once with the failing URL,
/// recorded, and surface to callers only as `None`.
pub struct Session {
    fetcher: Box<dyn Fetcher>,
    failures: Vec<FetchFailure>,
}

impl Session {
    pub fn new(fetcher: impl Fetcher + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            failures: Vec::new(),
        }
    }

    pub async fn get_response(&mut self, url: &Url) -> Option<FetchOutput> {
        match self.fetcher.fetch(url.as_str()).await {
            Ok(output) => {
                scrape_debug!(
                    "Fetched {} ({} bytes{})",
                    url,
                    output.metadata.byte_len,
                    if output.metadata.from_cache { ", cached" } else { "" }
                );
                Some(output)
            }
            Err(error) => {
                scrape_error!("Failed to load page {}: {}", url, error);
                self.failures.push(FetchFailure {
                    url: url.to_string(),
                    error,
                });
                None
            }
        }
    }

    /// Fetches `url` and decodes it as UTF-8.
    pub async fn get_page(&mut self, url: &Url) -> Option<Page> {
        let output = self.get_response(url).await?;
        let decoded = decode_html(&output.bytes);
        if decoded.had_errors {
            scrape_warn!("{} is not valid {}; replaced malformed bytes", url, decoded.encoding_label);
        }
        Some(Page {
            url: url.clone(),
            html: decoded.html,
        })
    }

    pub async fn get_bytes(&mut self, url: &Url) -> Option<Vec<u8>> {
        self.get_response(url).await.map(|output| output.bytes)
    }

    /// Failures recorded since the session was created or last drained.
    pub fn failures(&self) -> &[FetchFailure] {
        &self.failures
    }

    pub fn take_failures(&mut self) -> Vec<FetchFailure> {
        std::mem::take(&mut self.failures)
    }
}
