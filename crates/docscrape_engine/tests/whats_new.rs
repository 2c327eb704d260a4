mod common;

use std::path::Path;

use common::{context, page, rows, serve_html, serve_status, session, site_urls, strings};
use docscrape_engine::modes::version_summary;
use docscrape_engine::{run_mode, Mode, ModeOutcome, NullProgress, Page};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::MockServer;

fn index() -> String {
    page(
        r#"<section id="what-s-new-in-python"><h1>What's New in Python</h1>
        <div class="toctree-wrapper compound"><ul>
        <li class="toctree-l1"><a class="reference internal" href="3.12.html">What's New In Python 3.12</a>
            <ul><li class="toctree-l2"><a href="3.12.html#summary">Summary</a></li></ul></li>
        <li class="toctree-l1"><a class="reference internal" href="3.11.html">What's New In Python 3.11</a></li>
        <li class="toctree-l1"><a class="reference internal" href="3.10.html">What's New In Python 3.10</a></li>
        </ul></div></section>"#,
    )
}

fn article(version: &str, editor: &str) -> String {
    page(&format!(
        "<section><h1>What’s New In Python {version}<a class=\"headerlink\" href=\"#\">¶</a></h1>\n\
         <dl class=\"field-list simple\">\n<dt>Editor<span class=\"colon\">:</span></dt>\n<dd><p>{editor}</p>\n</dd>\n</dl></section>"
    ))
}

#[tokio::test]
async fn every_reachable_article_becomes_a_row() {
    let server = MockServer::start().await;
    serve_html(&server, "/3/whatsnew/", index()).await;
    serve_html(&server, "/3/whatsnew/3.12.html", article("3.12", "Adam Turner")).await;
    serve_status(&server, "/3/whatsnew/3.11.html", 500).await;
    serve_html(&server, "/3/whatsnew/3.10.html", article("3.10", "Pablo Galindo Salgado")).await;

    let urls = site_urls(&server);
    let mut session = session();
    let outcome = run_mode(
        Mode::WhatsNew,
        &mut session,
        &context(&urls, Path::new("unused"), &NullProgress),
    )
    .await
    .unwrap();

    let ModeOutcome::Table(table) = outcome else {
        panic!("expected a table, got {outcome:?}");
    };
    let base = server.uri();
    let link_312 = format!("{base}/3/whatsnew/3.12.html");
    let link_310 = format!("{base}/3/whatsnew/3.10.html");
    assert_eq!(
        rows(table),
        strings(&[
            ["Link", "Title", "Editor/Author"],
            [link_312.as_str(), "What’s New In Python 3.12¶", "Editor: Adam Turner"],
            [link_310.as_str(), "What’s New In Python 3.10¶", "Editor: Pablo Galindo Salgado"],
        ])
    );
    assert_eq!(session.failures().len(), 1);
}

#[tokio::test]
async fn unreachable_index_gives_no_result() {
    let server = MockServer::start().await;
    serve_status(&server, "/3/whatsnew/", 404).await;

    let urls = site_urls(&server);
    let outcome = run_mode(
        Mode::WhatsNew,
        &mut session(),
        &context(&urls, Path::new("unused"), &NullProgress),
    )
    .await
    .unwrap();
    assert_eq!(outcome, ModeOutcome::NoResult);
}

#[test]
fn summary_flattens_newlines() {
    let article = Page {
        url: Url::parse("https://docs.example/3/whatsnew/3.9.html").unwrap(),
        html: page("<h1>Title</h1><dl><dt>Editor:</dt>\n<dd>Łukasz\nLanga</dd></dl>"),
    };
    let (title, summary) = version_summary(&article).unwrap();
    assert_eq!(title, "Title");
    assert_eq!(summary, "Editor: Łukasz Langa");
}
