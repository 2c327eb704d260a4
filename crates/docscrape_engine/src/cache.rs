//! On-disk response cache.
//!
//! Each successful response is stored as `{key}.body` with a `{key}.json`
//! metadata sidecar, where `key` is derived from the requested URL. Entries
//! never expire; [`ResponseCache::clear`] empties the cache.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use scrape_logging::{scrape_debug, scrape_warn};
use thiserror::Error;

use crate::filename::{cache_key, is_cache_key};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::{FetchError, FetchMetadata, FetchOutput, Fetcher};

const BODY_EXT: &str = "body";
const META_EXT: &str = "json";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] io::Error),
    #[error("cache write failed: {0}")]
    Persist(#[from] PersistError),
    #[error("corrupt cache metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    writer: AtomicFileWriter,
}

impl ResponseCache {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }

    pub fn dir(&self) -> &Path {
        self.writer.dir()
    }

    pub fn get(&self, url: &str) -> Result<Option<FetchOutput>, CacheError> {
        let key = cache_key(url);
        let meta_path = self.entry_path(&key, META_EXT);
        let meta_text = match fs::read_to_string(&meta_path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let mut metadata: FetchMetadata = serde_json::from_str(&meta_text)?;
        let bytes = match fs::read(self.entry_path(&key, BODY_EXT)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        metadata.from_cache = true;
        Ok(Some(FetchOutput { bytes, metadata }))
    }

    /// Stores a response; the body is written before its metadata so a reader
    /// never sees metadata without a body.
    pub fn put(&self, url: &str, output: &FetchOutput) -> Result<(), CacheError> {
        let key = cache_key(url);
        let meta = serde_json::to_string_pretty(&output.metadata)?;
        self.writer.write(&format!("{key}.{BODY_EXT}"), &output.bytes)?;
        self.writer.write(&format!("{key}.{META_EXT}"), meta)?;
        Ok(())
    }

    /// Removes every cached entry, leaving files the cache did not write.
    /// Returns how many responses were dropped.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let entries = match fs::read_dir(self.dir()) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            let is_entry = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(is_cache_key);
            if !is_entry {
                continue;
            }
            match path.extension().and_then(|ext| ext.to_str()) {
                Some(META_EXT) => {
                    fs::remove_file(&path)?;
                    removed += 1;
                }
                Some(BODY_EXT) => fs::remove_file(&path)?,
                _ => {}
            }
        }
        Ok(removed)
    }

    fn entry_path(&self, key: &str, ext: &str) -> PathBuf {
        self.dir().join(format!("{key}.{ext}"))
    }
}

/// A [`Fetcher`] that answers from a [`ResponseCache`] when it can and stores
/// successful network responses for later runs.
pub struct CachedFetcher<F> {
    inner: F,
    cache: ResponseCache,
}

impl<F: Fetcher> CachedFetcher<F> {
    pub fn new(inner: F, cache: ResponseCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

#[async_trait::async_trait]
impl<F: Fetcher> Fetcher for CachedFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        match self.cache.get(url) {
            Ok(Some(hit)) => {
                scrape_debug!("Cache hit for {}", url);
                return Ok(hit);
            }
            Ok(None) => {}
            Err(err) => scrape_warn!("Ignoring unreadable cache entry for {}: {}", url, err),
        }

        let output = self.inner.fetch(url).await?;
        if let Err(err) = self.cache.put(url, &output) {
            scrape_warn!("Failed to cache response for {}: {}", url, err);
        }
        Ok(output)
    }
}
