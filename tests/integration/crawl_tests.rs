//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use careers_crawl::config::Config;
use careers_crawl::crawler::{run_crawl, Coordinator};
use careers_crawl::output::{export_outcome, CsvExporter};
use careers_crawl::state::{CrawlState, StopReason};
use careers_crawl::EXPORT_COLUMNS;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server, without pacing
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.site.start_path = "/jobs/search".to_string();
    config.crawler.pacing_delay_ms = 0; // No pacing against the stub server
    config.crawler.request_timeout_secs = 5;
    config
}

/// Builds a listing page with one row per (title, href) and an optional next link
fn listing_page(entries: &[(&str, &str)], next: Option<&str>) -> String {
    let rows: String = entries
        .iter()
        .map(|(title, href)| {
            format!(
                r#"<tr><td class="cell-title"><a href="{}">{}</a></td><td>Remote</td></tr>"#,
                href, title
            )
        })
        .collect();

    let pagination = next
        .map(|href| format!(r#"<a class="paginationNextLink" href="{}">Next</a>"#, href))
        .unwrap_or_default();

    format!(
        r#"<html><head><title>Search Jobs</title></head><body>
        <table><thead><tr><th>Title</th><th>Location</th></tr></thead>
        <tbody>{}</tbody></table>
        <div class="pagination">{}</div>
        </body></html>"#,
        rows, pagination
    )
}

/// Builds a detail page with structured fields and a rich-text body
fn detail_page(fields: &[(&str, &str)], rich_text: &str) -> String {
    let fields: String = fields
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<div class="article__content__view__field">
                <div class="article__content__view__field__label">{}</div>
                <div class="article__content__view__field__value">{}</div>
                </div>"#,
                label, value
            )
        })
        .collect();

    format!(
        r#"<html><body>
        <article class="article article--details article--details--top">{}</article>
        <article class="article article--details">
          <div class="article__content article__content--rich-text">{}</div>
        </article>
        </body></html>"#,
        fields, rich_text
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_listing_without_next_link() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/jobs/search",
        listing_page(&[("Engineer I", "/jobs/123")], None),
    )
    .await;
    mount_html(&mock_server, "/jobs/123", detail_page(&[], "")).await;

    let config = create_test_config(&base_url);
    let outcome = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.stop_reason, StopReason::LastPage);
    assert_eq!(outcome.pages_visited, 1);

    let record = &outcome.records[0];
    assert_eq!(record.title(), "Engineer I");
    assert_eq!(record.url(), format!("{}/jobs/123", base_url));
}

#[tokio::test]
async fn test_detail_fields_extracted() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/jobs/search",
        listing_page(&[("Systems Engineer", "/jobs/JR00123")], None),
    )
    .await;
    mount_html(
        &mock_server,
        "/jobs/JR00123",
        detail_page(
            &[("Job Number:", "JR00123"), ("Location:", "Annapolis Junction, MD")],
            "<b>The Opportunity:</b> Build things. <p>More text.</p><b>You Have:</b> Skills.",
        ),
    )
    .await;

    let outcome = run_crawl(&create_test_config(&mock_server.uri()))
        .await
        .expect("Crawl failed");

    let record = &outcome.records[0];
    assert_eq!(record.get("Job Number"), Some("JR00123"));
    assert_eq!(record.get("Location"), Some("Annapolis Junction, MD"));
    assert_eq!(record.get("The Opportunity"), Some("Build things. More text."));
    assert_eq!(record.get("You Have"), Some("Skills."));
    assert_eq!(record.get("Job Title"), Some("Systems Engineer"));
    assert_eq!(outcome.degraded_records, 0);
}

#[tokio::test]
async fn test_pagination_until_listing_fetch_fails() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/jobs/search",
        listing_page(
            &[("Job 1", "/jobs/1"), ("Job 2", "/jobs/2")],
            Some("/jobs/search/page/2"),
        ),
    )
    .await;
    mount_html(
        &mock_server,
        "/jobs/search/page/2",
        listing_page(
            &[("Job 3", "/jobs/3"), ("Job 4", "/jobs/4")],
            Some("/jobs/search/page/3"),
        ),
    )
    .await;
    mount_html(
        &mock_server,
        "/jobs/search/page/3",
        listing_page(
            &[("Job 5", "/jobs/5"), ("Job 6", "/jobs/6")],
            Some("/jobs/search/page/4"),
        ),
    )
    .await;
    mount_status(&mock_server, "/jobs/search/page/4", 500).await;

    for n in 1..=6 {
        mount_html(
            &mock_server,
            &format!("/jobs/{}", n),
            detail_page(&[("Job Number:", &format!("JR{}", n))], ""),
        )
        .await;
    }

    let outcome = run_crawl(&create_test_config(&mock_server.uri()))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 6);
    assert_eq!(outcome.pages_visited, 3);
    assert_eq!(outcome.stop_reason, StopReason::ListingFetchFailed);

    let titles: Vec<_> = outcome.records.iter().map(|r| r.title()).collect();
    assert_eq!(titles, vec!["Job 1", "Job 2", "Job 3", "Job 4", "Job 5", "Job 6"]);
    assert_eq!(outcome.records[5].get("Job Number"), Some("JR6"));
}

#[tokio::test]
async fn test_detail_fetch_failure_degrades_record() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/jobs/search",
        listing_page(&[("Broken", "/jobs/404"), ("Working", "/jobs/200")], None),
    )
    .await;
    mount_status(&mock_server, "/jobs/404", 404).await;
    mount_html(
        &mock_server,
        "/jobs/200",
        detail_page(&[("Clearance:", "Secret")], ""),
    )
    .await;

    let outcome = run_crawl(&create_test_config(&base_url))
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.degraded_records, 1);

    let broken = &outcome.records[0];
    assert!(broken.is_metadata_only());
    assert_eq!(broken.len(), 2);
    assert_eq!(broken.url(), format!("{}/jobs/404", base_url));
    assert_eq!(broken.title(), "Broken");

    assert_eq!(outcome.records[1].get("Clearance"), Some("Secret"));
}

#[tokio::test]
async fn test_missing_table_ends_crawl() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/jobs/search",
        r#"<html><body><p>We are updating our site.</p>
        <a class="paginationNextLink" href="/jobs/search/page/2">Next</a></body></html>"#
            .to_string(),
    )
    .await;

    // The next link must not be followed
    Mock::given(method("GET"))
        .and(path("/jobs/search/page/2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = run_crawl(&create_test_config(&mock_server.uri()))
        .await
        .expect("Crawl failed");

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.stop_reason, StopReason::NoListingTable);
}

#[tokio::test]
async fn test_empty_table_ends_crawl_despite_next_link() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/jobs/search",
        listing_page(&[], Some("/jobs/search/page/2")),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/jobs/search/page/2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = run_crawl(&create_test_config(&mock_server.uri()))
        .await
        .expect("Crawl failed");

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.stop_reason, StopReason::NoEntries);
}

#[tokio::test]
async fn test_first_listing_fetch_failure() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "/jobs/search", 503).await;

    let outcome = run_crawl(&create_test_config(&mock_server.uri()))
        .await
        .expect("Crawl failed");

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.pages_visited, 0);
    assert_eq!(outcome.stop_reason, StopReason::ListingFetchFailed);
}

#[tokio::test]
async fn test_page_limit() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/jobs/search",
        listing_page(&[("Job 1", "/jobs/1")], Some("/jobs/search/page/2")),
    )
    .await;
    mount_html(&mock_server, "/jobs/1", detail_page(&[], "")).await;

    Mock::given(method("GET"))
        .and(path("/jobs/search/page/2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri());
    config.crawler.max_pages = Some(1);

    let outcome = run_crawl(&config).await.expect("Crawl failed");
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.stop_reason, StopReason::PageLimitReached);
}

#[tokio::test]
async fn test_step_transitions() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/jobs/search",
        listing_page(&[("Job 1", "/jobs/1")], Some("/jobs/search/page/2")),
    )
    .await;
    mount_html(
        &mock_server,
        "/jobs/search/page/2",
        listing_page(&[("Job 2", "/jobs/2")], None),
    )
    .await;
    mount_html(&mock_server, "/jobs/1", detail_page(&[], "")).await;
    mount_html(&mock_server, "/jobs/2", detail_page(&[], "")).await;

    let mut coordinator =
        Coordinator::new(&create_test_config(&base_url)).expect("Failed to create coordinator");

    let state = coordinator.initial_state();
    assert!(matches!(state, CrawlState::Running { page_index: 1, .. }));

    let state = coordinator.step(state).await;
    match &state {
        CrawlState::Running { url, page_index } => {
            assert_eq!(*page_index, 2);
            assert_eq!(url.as_str(), format!("{}/jobs/search/page/2", base_url));
        }
        other => panic!("expected Running, got {}", other),
    }
    assert_eq!(coordinator.records().len(), 1);

    let state = coordinator.step(state).await;
    assert_eq!(state, CrawlState::Done(StopReason::LastPage));
    assert_eq!(coordinator.records().len(), 2);
}

#[tokio::test]
async fn test_crawl_and_export_csv() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/jobs/search",
        listing_page(&[("Data Engineer", "/jobs/77")], None),
    )
    .await;
    mount_html(
        &mock_server,
        "/jobs/77",
        detail_page(
            &[("Job Number:", "R0077"), ("Remote Work:", "Yes")],
            "<b><span>Work Model:</span></b><p>Hybrid</p>",
        ),
    )
    .await;

    let outcome = run_crawl(&create_test_config(&mock_server.uri()))
        .await
        .expect("Crawl failed");

    let dir = tempfile::TempDir::new().unwrap();
    let csv_path = dir.path().join("jobs.csv");
    let written = export_outcome(&outcome, &CsvExporter::new(&csv_path)).unwrap();
    assert_eq!(written, 1);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    // First header carries the byte-order mark
    assert_eq!(headers.len(), EXPORT_COLUMNS.len());
    assert_eq!(&headers[1], "Job Number");

    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[0], "Data Engineer");
    assert_eq!(&row[1], "R0077");
    assert_eq!(&row[2], "");
    assert_eq!(&row[3], "Yes");
    assert_eq!(&row[11], "Hybrid");
}
