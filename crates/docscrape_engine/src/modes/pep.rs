use docscrape_core::{
    abbreviation_from_cell, is_known_status, ReconciliationResult, Reconciler, StatusRecord,
};
use scrape_logging::{scrape_info, scrape_warn};
use scraper::{ElementRef, Html};
use url::Url;

use super::ModeContext;
use crate::locate::{find_all, find_in_document, find_tag, resolve_href, text, Attrs};
use crate::{ModeError, Page, ParseError, ScrapeEvent, Session};

const MODE: &str = "pep";
const STATUS_FIELD: &str = "Status";

/// Counts PEPs by the status their own page declares and reports every PEP
/// whose page disagrees with the index.
///
/// PEPs whose page cannot be fetched are left out of the counts; the session
/// has already logged and recorded the failure.
pub async fn pep(
    session: &mut Session,
    ctx: &ModeContext<'_>,
) -> Result<Option<ReconciliationResult>, ModeError> {
    let Some(index) = session.get_page(&ctx.urls.pep).await else {
        return Ok(None);
    };
    let records = index_records(&index, &ctx.urls.pep)?;

    let total = records.len();
    ctx.progress.emit(ScrapeEvent::Started { mode: MODE, total });
    let mut reconciler = Reconciler::new();
    for (i, record) in records.iter().enumerate() {
        if let Some(page) = session.get_page(&record.detail_url).await {
            let status = detail_status(&page)?;
            if !is_known_status(&status) {
                scrape_warn!("Unrecognised status {:?} on {}", status, record.detail_url);
            }
            if let Some(discrepancy) = reconciler.record(record, &status) {
                scrape_info!("{}", discrepancy);
            }
        }
        ctx.progress.emit(ScrapeEvent::Advanced {
            index: i,
            total,
            url: record.detail_url.to_string(),
        });
    }
    ctx.progress.emit(ScrapeEvent::Finished { mode: MODE });

    let skipped = total - reconciler.processed();
    if skipped > 0 {
        scrape_warn!("{} of {} PEP pages could not be loaded and were not counted", skipped, total);
    }
    Ok(Some(reconciler.finish()))
}

/// Rows of the numerical index, with detail links resolved against `pep_base`.
pub fn index_records(index: &Page, pep_base: &Url) -> Result<Vec<StatusRecord>, ParseError> {
    let doc = Html::parse_document(&index.html);
    let section = find_in_document(&doc, "section", &Attrs::id("numerical-index"))?;
    let body = find_tag(section, "tbody", &Attrs::new())?;
    find_all(body, "tr", &Attrs::new())
        .into_iter()
        .map(|row| {
            let first_cell = find_tag(row, "td", &Attrs::new())?;
            let anchor = find_tag(row, "a", &Attrs::new())?;
            Ok(StatusRecord {
                abbreviation: abbreviation_from_cell(&text(first_cell)),
                detail_url: resolve_href(anchor, pep_base)?,
            })
        })
        .collect()
}

/// The value of the `Status` field in a PEP page's header field list.
pub fn detail_status(page: &Page) -> Result<String, ParseError> {
    let doc = Html::parse_document(&page.html);
    let fields = find_in_document(&doc, "dl", &Attrs::class("field-list"))?;
    let value = find_all(fields, "dt", &Attrs::new())
        .into_iter()
        .find(|dt| text(*dt).trim().trim_end_matches(':').trim() == STATUS_FIELD)
        .and_then(next_element)
        .map(|dd| text(dd).trim().to_string())
        .filter(|status| !status.is_empty());
    value.ok_or_else(|| ParseError::FieldNotFound {
        field: STATUS_FIELD.to_string(),
        url: page.url.to_string(),
    })
}

fn next_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}
