use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use scrape_logging::scrape_info;
use url::Url;

use super::{join, ModeContext};
use crate::filename::filename_from_url;
use crate::locate::{find_in_document, find_tag, resolve_href, Attrs};
use crate::persist::{ensure_output_dir, AtomicFileWriter};
use crate::{ModeError, Page, ParseError, Session};

static ARCHIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+pdf-a4\.zip$").expect("archive pattern"));

/// Saves the A4 PDF documentation archive into the downloads directory and
/// returns where it was written.
pub async fn download(
    session: &mut Session,
    ctx: &ModeContext<'_>,
) -> Result<Option<PathBuf>, ModeError> {
    let downloads_url = join(&ctx.urls.main_doc, "download.html")?;
    let Some(page) = session.get_page(&downloads_url).await else {
        return Ok(None);
    };
    let archive_url = archive_link(&page)?;
    let filename = filename_from_url(&archive_url).ok_or_else(|| ParseError::InvalidLink {
        href: archive_url.to_string(),
        message: "no file name in url".to_string(),
    })?;

    let Some(bytes) = session.get_bytes(&archive_url).await else {
        return Ok(None);
    };
    ensure_output_dir(ctx.downloads_dir)?;
    let path = AtomicFileWriter::new(ctx.downloads_dir.to_path_buf()).write(&filename, &bytes)?;
    scrape_info!("Archive downloaded and saved: {}", path.display());
    Ok(Some(path))
}

/// Absolute URL of the `pdf-a4.zip` archive in the downloads table.
pub fn archive_link(page: &Page) -> Result<Url, ParseError> {
    let doc = Html::parse_document(&page.html);
    let table = find_in_document(&doc, "table", &Attrs::class("docutils"))?;
    let anchor = find_tag(
        table,
        "a",
        &Attrs::new().matching("href", ARCHIVE_PATTERN.clone()),
    )?;
    resolve_href(anchor, &page.url)
}
