use docscrape_core::ResultTable;
use scraper::Html;
use url::Url;

use super::{join, ModeContext};
use crate::locate::{find_all, find_in_document, find_tag, resolve_href, text, Attrs};
use crate::{ModeError, Page, ParseError, ScrapeEvent, Session};

pub const WHATS_NEW_HEADER: [&str; 3] = ["Link", "Title", "Editor/Author"];

const MODE: &str = "whats-new";

/// One row per "What's New" article: link, first heading, first definition list.
/// Articles that fail to load are skipped.
pub async fn whats_new(
    session: &mut Session,
    ctx: &ModeContext<'_>,
) -> Result<Option<ResultTable>, ModeError> {
    let index_url = join(&ctx.urls.main_doc, "whatsnew/")?;
    let Some(index) = session.get_page(&index_url).await else {
        return Ok(None);
    };
    let links = version_links(&index)?;

    let total = links.len();
    ctx.progress.emit(ScrapeEvent::Started { mode: MODE, total });
    let mut table = ResultTable::new(WHATS_NEW_HEADER);
    for (i, link) in links.into_iter().enumerate() {
        if let Some(page) = session.get_page(&link).await {
            let (title, summary) = version_summary(&page)?;
            table.push([link.to_string(), title, summary]);
        }
        ctx.progress.emit(ScrapeEvent::Advanced {
            index: i,
            total,
            url: link.to_string(),
        });
    }
    ctx.progress.emit(ScrapeEvent::Finished { mode: MODE });
    Ok(Some(table))
}

/// Absolute links of the per-version articles listed on the index page.
pub fn version_links(index: &Page) -> Result<Vec<Url>, ParseError> {
    let doc = Html::parse_document(&index.html);
    let main = find_in_document(&doc, "section", &Attrs::id("what-s-new-in-python"))?;
    let toc = find_tag(main, "div", &Attrs::class("toctree-wrapper"))?;
    find_all(toc, "li", &Attrs::class("toctree-l1"))
        .into_iter()
        .map(|entry| {
            let anchor = find_tag(entry, "a", &Attrs::new())?;
            resolve_href(anchor, &index.url)
        })
        .collect()
}

/// `(title, summary)` of one article.
pub fn version_summary(article: &Page) -> Result<(String, String), ParseError> {
    let doc = Html::parse_document(&article.html);
    let h1 = find_in_document(&doc, "h1", &Attrs::new())?;
    let dl = find_in_document(&doc, "dl", &Attrs::new())?;
    let title = text(h1).trim().to_string();
    let summary = text(dl).replace('\n', " ").trim().to_string();
    Ok((title, summary))
}
