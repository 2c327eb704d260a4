//! The four extraction modes and the dispatcher that runs one of them.
//!
//! Every mode follows the same shape: fetch a page through the [`Session`],
//! hand the decoded text to a synchronous parse function that returns owned
//! data, then fetch whatever that data points at. Parsed trees never live
//! across an `.await`.

mod download;
mod latest_versions;
mod pep;
mod whats_new;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use docscrape_core::ResultTable;
use url::Url;

use crate::{ModeError, ParseError, ProgressSink, Session};

pub use download::{archive_link, download};
pub use latest_versions::{latest_versions, version_table, LATEST_VERSIONS_HEADER};
pub use pep::{detail_status, index_records, pep};
pub use whats_new::{version_links, version_summary, whats_new, WHATS_NEW_HEADER};

pub const DEFAULT_MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const DEFAULT_PEP_URL: &str = "https://peps.python.org/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::WhatsNew, Mode::LatestVersions, Mode::Download, Mode::Pep];

    pub fn name(self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| format!("unknown mode: {s}"))
    }
}

/// Entry points of the scraped sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    pub main_doc: Url,
    pub pep: Url,
}

impl SiteUrls {
    pub fn new(main_doc: Url, pep: Url) -> Self {
        Self { main_doc, pep }
    }
}

impl Default for SiteUrls {
    fn default() -> Self {
        Self {
            main_doc: Url::parse(DEFAULT_MAIN_DOC_URL).expect("default documentation url"),
            pep: Url::parse(DEFAULT_PEP_URL).expect("default PEP url"),
        }
    }
}

/// Everything a mode needs besides the session.
pub struct ModeContext<'a> {
    pub urls: &'a SiteUrls,
    pub downloads_dir: &'a Path,
    pub progress: &'a dyn ProgressSink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeOutcome {
    /// Rows to hand to output, header first.
    Table(ResultTable),
    /// A file was written.
    Saved(PathBuf),
    /// A foundational page could not be fetched; the failure is already logged.
    NoResult,
}

/// Runs one mode to completion.
pub async fn run_mode(
    mode: Mode,
    session: &mut Session,
    ctx: &ModeContext<'_>,
) -> Result<ModeOutcome, ModeError> {
    let outcome = match mode {
        Mode::WhatsNew => whats_new(session, ctx).await?.map(ModeOutcome::Table),
        Mode::LatestVersions => latest_versions(session, ctx).await?.map(ModeOutcome::Table),
        Mode::Download => download(session, ctx).await?.map(ModeOutcome::Saved),
        Mode::Pep => pep(session, ctx)
            .await?
            .map(|result| ModeOutcome::Table(result.to_table())),
    };
    Ok(outcome.unwrap_or(ModeOutcome::NoResult))
}

fn join(base: &Url, path: &str) -> Result<Url, ParseError> {
    base.join(path).map_err(|err| ParseError::InvalidLink {
        href: path.to_string(),
        message: err.to_string(),
    })
}
