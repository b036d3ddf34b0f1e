//! Field extraction for job detail pages
//!
//! A detail page carries its data in two shapes:
//! - a "top details" article holding label/value pairs (`Job Number:` → `JR00123`)
//! - a rich-text region where bold headers introduce free-text sections
//!
//! Each shape has its own pure strategy function; [`extract_fields`] runs both
//! and merges the results, later writes winning.

use crate::record::is_section_header;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::BTreeMap;

const TOP_DETAILS: &str = "article.article--details--top";
const FIELD_UNIT: &str = "div.article__content__view__field";
const FIELD_LABEL: &str = "div.article__content__view__field__label";
const FIELD_VALUE: &str = "div.article__content__view__field__value";
const RICH_TEXT: &str = "div.article__content--rich-text";
const BOLD_MARKER: &str = "b, strong";

/// Extracts all fields from a detail page
///
/// # Example
///
/// ```
/// use careers_crawl::crawler::extract_fields;
/// use scraper::Html;
///
/// let html = r#"<div class="article__content--rich-text">
///     <b>Clearance:</b> <p>Secret</p>
/// </div>"#;
/// let fields = extract_fields(&Html::parse_document(html));
/// assert_eq!(fields.get("Clearance").map(String::as_str), Some("Secret"));
/// ```
pub fn extract_fields(document: &Html) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    for (key, value) in extract_structured_fields(document) {
        fields.insert(key, value);
    }

    for (key, value) in extract_sections(document) {
        fields.insert(key, value);
    }

    fields
}

/// Extracts label/value pairs from the top details region
///
/// Units missing either a label or a value are skipped. Returns an empty list
/// when the page has no top details region.
pub fn extract_structured_fields(document: &Html) -> Vec<(String, String)> {
    let (Ok(region_sel), Ok(unit_sel), Ok(label_sel), Ok(value_sel)) = (
        Selector::parse(TOP_DETAILS),
        Selector::parse(FIELD_UNIT),
        Selector::parse(FIELD_LABEL),
        Selector::parse(FIELD_VALUE),
    ) else {
        return Vec::new();
    };

    let Some(region) = document.select(&region_sel).next() else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for unit in region.select(&unit_sel) {
        let (Some(label), Some(value)) = (
            unit.select(&label_sel).next(),
            unit.select(&value_sel).next(),
        ) else {
            continue;
        };

        let key = normalize_label(&label.text().collect::<String>());
        if key.is_empty() {
            continue;
        }

        let value = value.text().collect::<String>().trim().to_string();
        pairs.push((key, value));
    }

    pairs
}

/// Extracts header-delimited free-text sections from the rich-text region
///
/// Every outermost bold marker is a candidate header; a marker nested inside
/// another one is part of that header's text. Only headers in the closed section
/// vocabulary produce an entry; the section body is the text of the marker's
/// following siblings up to, not including, the next bold sibling. Bold text
/// nested deeper inside a sibling (`<p><b>Benefits:</b> ...</p>`) does not end
/// the section and is kept as body text.
pub fn extract_sections(document: &Html) -> Vec<(String, String)> {
    let (Ok(region_sel), Ok(bold_sel)) =
        (Selector::parse(RICH_TEXT), Selector::parse(BOLD_MARKER))
    else {
        return Vec::new();
    };

    let Some(region) = document.select(&region_sel).next() else {
        return Vec::new();
    };

    let mut sections = Vec::new();
    for marker in region.select(&bold_sel) {
        if has_bold_ancestor(&marker) {
            continue;
        }

        let header = normalize_label(&marker.text().collect::<String>());
        if !is_section_header(&header) {
            continue;
        }

        sections.push((header, section_body(marker)));
    }

    sections
}

/// Concatenates the text of the siblings following a header marker
fn section_body(marker: ElementRef<'_>) -> String {
    let mut parts: Vec<String> = Vec::new();

    for sibling in marker.next_siblings() {
        match sibling.value() {
            Node::Element(_) => {
                let Some(element) = ElementRef::wrap(sibling) else {
                    continue;
                };
                if is_bold_marker(&element) {
                    break;
                }
                let text = collapse_whitespace(element.text());
                if !text.is_empty() {
                    parts.push(text);
                }
            }
            Node::Text(text) => {
                let text = collapse_whitespace(std::iter::once(&**text));
                if !text.is_empty() {
                    parts.push(text);
                }
            }
            _ => {}
        }
    }

    parts.join(" ").trim().to_string()
}

fn is_bold_marker(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "b" | "strong")
}

fn has_bold_ancestor(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_bold_marker(&ancestor))
}

/// Trims a label and strips its trailing colon
///
/// `"  Job Number: "` becomes `"Job Number"`.
fn normalize_label(raw: &str) -> String {
    let collapsed = collapse_whitespace(std::iter::once(raw));
    collapsed.trim_end_matches(':').trim_end().to_string()
}

fn collapse_whitespace<'a>(pieces: impl Iterator<Item = &'a str>) -> String {
    pieces
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
