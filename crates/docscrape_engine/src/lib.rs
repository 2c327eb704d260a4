//! Docscrape engine: fetching, caching, tag lookup and the extraction modes.
mod cache;
mod decode;
mod error;
mod fetch;
mod filename;
pub mod locate;
pub mod modes;
mod persist;
mod progress;
mod session;
mod types;

pub use cache::{CacheError, CachedFetcher, ResponseCache};
pub use decode::{decode_html, DecodedHtml};
pub use error::{ModeError, ParseError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::{cache_key, filename_from_url, results_filename};
pub use modes::{run_mode, Mode, ModeContext, ModeOutcome, SiteUrls};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use progress::{NullProgress, ProgressSink};
pub use session::{Page, Session};
pub use types::{FailureKind, FetchError, FetchFailure, FetchMetadata, FetchOutput, ScrapeEvent};
