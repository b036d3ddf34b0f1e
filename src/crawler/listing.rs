//! Listing page walker
//!
//! Search result pages list one job per table row. The title cell links to the
//! job's detail page, and a pagination control points at the next results page.

use crate::url::resolve_href;
use scraper::{Html, Selector};
use url::Url;

const TABLE_BODY: &str = "tbody";
const ROW: &str = "tr";
const TITLE_CELL: &str = "td.cell-title";
const TITLE_LINK: &str = "a[href]";
const NEXT_LINK: &str = "a.paginationNextLink";

/// One job entry found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Link text of the title cell
    pub title: String,

    /// Absolute URL of the detail page
    pub detail_url: Url,
}

/// Everything the crawler needs from one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Whether the page had a results table body at all
    pub table_found: bool,

    /// Entries in document order
    pub entries: Vec<ListingEntry>,

    /// Absolute URL of the next results page, if any
    pub next_page: Option<Url>,
}

impl ListingPage {
    /// Returns true if the page produced no entries to visit
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses a listing page into its entries and next-page link
///
/// # Arguments
///
/// * `document` - The parsed listing page
/// * `base_url` - Site origin used to resolve relative hrefs
///
/// # Example
///
/// ```
/// use careers_crawl::crawler::parse_listing;
/// use scraper::Html;
/// use url::Url;
///
/// let html = r#"<table><tbody><tr>
///     <td class="cell-title"><a href="/jobs/123">Engineer I</a></td>
/// </tr></tbody></table>"#;
/// let base = Url::parse("https://careers.example.com/").unwrap();
/// let page = parse_listing(&Html::parse_document(html), &base);
///
/// assert_eq!(page.entries[0].title, "Engineer I");
/// assert_eq!(page.entries[0].detail_url.as_str(), "https://careers.example.com/jobs/123");
/// assert!(page.next_page.is_none());
/// ```
pub fn parse_listing(document: &Html, base_url: &Url) -> ListingPage {
    let (table_found, entries) = extract_entries(document, base_url);
    let next_page = extract_next_page(document, base_url);

    ListingPage {
        table_found,
        entries,
        next_page,
    }
}

/// Extracts job entries from the first table body
///
/// Rows whose title cell has no usable link are skipped. The boolean reports
/// whether a table body was present.
fn extract_entries(document: &Html, base_url: &Url) -> (bool, Vec<ListingEntry>) {
    let (Ok(tbody_sel), Ok(row_sel), Ok(cell_sel), Ok(link_sel)) = (
        Selector::parse(TABLE_BODY),
        Selector::parse(ROW),
        Selector::parse(TITLE_CELL),
        Selector::parse(TITLE_LINK),
    ) else {
        return (false, Vec::new());
    };

    let Some(tbody) = document.select(&tbody_sel).next() else {
        return (false, Vec::new());
    };

    let mut entries = Vec::new();
    for row in tbody.select(&row_sel) {
        let Some(link) = row
            .select(&cell_sel)
            .next()
            .and_then(|cell| cell.select(&link_sel).next())
        else {
            continue;
        };

        let Some(detail_url) = link
            .value()
            .attr("href")
            .and_then(|href| resolve_href(href, base_url))
        else {
            tracing::debug!("Skipping listing row with unusable title link");
            continue;
        };

        entries.push(ListingEntry {
            title: link.text().collect::<String>().trim().to_string(),
            detail_url,
        });
    }

    (true, entries)
}

/// Finds the "next page" pagination link
fn extract_next_page(document: &Html, base_url: &Url) -> Option<Url> {
    let selector = Selector::parse(NEXT_LINK).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|link| link.value().attr("href"))
        .and_then(|href| resolve_href(href, base_url))
}
