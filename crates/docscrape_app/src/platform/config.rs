use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use docscrape_engine::modes::{DEFAULT_MAIN_DOC_URL, DEFAULT_PEP_URL};
use docscrape_engine::{FetchSettings, SiteUrls};
use serde::{Deserialize, Serialize};
use url::Url;

/// Runtime configuration. Every field is optional in the RON file; missing
/// ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub main_doc_url: String,
    pub pep_url: String,
    pub downloads_dir: PathBuf,
    pub results_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub fetch: FetchSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            main_doc_url: DEFAULT_MAIN_DOC_URL.to_string(),
            pep_url: DEFAULT_PEP_URL.to_string(),
            downloads_dir: PathBuf::from("downloads"),
            results_dir: PathBuf::from("results"),
            logs_dir: PathBuf::from("logs"),
            cache_dir: PathBuf::from(".http_cache"),
            fetch: FetchSettings::default(),
        }
    }
}

/// Directories a run reads from and writes to, resolved against the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub downloads: PathBuf,
    pub results: PathBuf,
    pub logs: PathBuf,
    pub cache: PathBuf,
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn site_urls(&self) -> anyhow::Result<SiteUrls> {
        Ok(SiteUrls::new(
            parse_base_url(&self.main_doc_url).context("main_doc_url")?,
            parse_base_url(&self.pep_url).context("pep_url")?,
        ))
    }

    pub fn paths(&self, base_dir: &Path) -> Paths {
        Paths {
            downloads: base_dir.join(&self.downloads_dir),
            results: base_dir.join(&self.results_dir),
            logs: base_dir.join(&self.logs_dir),
            cache: base_dir.join(&self.cache_dir),
        }
    }
}

/// Relative links are joined onto these URLs, so they must end in `/`.
fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(raw).with_context(|| format!("invalid url {raw:?}"))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
