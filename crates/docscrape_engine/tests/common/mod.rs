#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;

use docscrape_engine::{
    FetchSettings, ModeContext, ProgressSink, ReqwestFetcher, ScrapeEvent, Session, SiteUrls,
};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn session() -> Session {
    Session::new(ReqwestFetcher::new(FetchSettings::default()).expect("http client"))
}

/// Site URLs rooted on the mock server: docs under `/3/`, PEPs under `/peps/`.
pub fn site_urls(server: &MockServer) -> SiteUrls {
    SiteUrls::new(
        Url::parse(&format!("{}/3/", server.uri())).unwrap(),
        Url::parse(&format!("{}/peps/", server.uri())).unwrap(),
    )
}

pub fn context<'a>(
    urls: &'a SiteUrls,
    downloads_dir: &'a Path,
    progress: &'a dyn ProgressSink,
) -> ModeContext<'a> {
    ModeContext {
        urls,
        downloads_dir,
        progress,
    }
}

pub async fn serve_html(server: &MockServer, at: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.into(), "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

pub async fn serve_status(server: &MockServer, at: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn page(body: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>t</title></head><body>{body}</body></html>")
}

pub fn rows(table: docscrape_core::ResultTable) -> Vec<Vec<String>> {
    table.into_rows()
}

pub fn strings<const N: usize>(rows: &[[&str; N]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ScrapeEvent>>,
}

impl RecordingProgress {
    pub fn take(&self) -> Vec<ScrapeEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for RecordingProgress {
    fn emit(&self, event: ScrapeEvent) {
        self.events.lock().unwrap().push(event);
    }
}
