use std::sync::LazyLock;

use docscrape_core::ResultTable;
use regex::Regex;
use scraper::Html;

use super::ModeContext;
use crate::locate::{find_all, find_in_document, text, Attrs};
use crate::{ModeError, Page, ParseError, Session};

pub const LATEST_VERSIONS_HEADER: [&str; 3] = ["Documentation link", "Version", "Status"];

const MARKER: &str = "All versions";

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)").expect("version pattern")
});

pub async fn latest_versions(
    session: &mut Session,
    ctx: &ModeContext<'_>,
) -> Result<Option<ResultTable>, ModeError> {
    let Some(page) = session.get_page(&ctx.urls.main_doc).await else {
        return Ok(None);
    };
    Ok(Some(version_table(&page)?))
}

/// Reads the sidebar's version list. Links whose text is not of the form
/// `Python X.Y (status)` keep their full text and an empty status.
pub fn version_table(page: &Page) -> Result<ResultTable, ParseError> {
    let doc = Html::parse_document(&page.html);
    let sidebar = find_in_document(&doc, "div", &Attrs::class("sphinxsidebarwrapper"))?;
    let list = find_all(sidebar, "ul", &Attrs::new())
        .into_iter()
        .find(|ul| text(*ul).contains(MARKER))
        .ok_or_else(|| ParseError::MarkerListNotFound {
            marker: MARKER.to_string(),
        })?;

    let mut table = ResultTable::new(LATEST_VERSIONS_HEADER);
    for anchor in find_all(list, "a", &Attrs::new()) {
        let link = anchor
            .value()
            .attr("href")
            .ok_or_else(|| ParseError::MissingAttribute {
                tag: "a".to_string(),
                attr: "href".to_string(),
            })?;
        let label = text(anchor);
        let label = label.trim();
        let (version, status) = match VERSION_PATTERN.captures(label) {
            Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
            None => (label.to_string(), String::new()),
        };
        table.push([link.to_string(), version, status]);
    }
    Ok(table)
}
