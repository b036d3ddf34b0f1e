//! Job record definitions
//!
//! A [`JobRecord`] is the flat field map produced for one detail page. The set of
//! exported columns and the set of recognized free-text section headers are both
//! fixed here.

use std::collections::BTreeMap;

/// Key holding the detail page URL; present on every record
pub const URL_FIELD: &str = "URL";

/// Key holding the listing title; always taken from the listing page
pub const TITLE_FIELD: &str = "Job Title";

/// Export column order
pub const EXPORT_COLUMNS: [&str; 12] = [
    "Job Title",
    "Job Number",
    "Location",
    "Remote Work",
    "URL",
    "The Opportunity",
    "You Have",
    "Nice If You Have",
    "Clearance",
    "Compensation",
    "Identity Statement",
    "Work Model",
];

/// Free-text section headers recognized inside the rich-text region
///
/// Bold markers whose text is not listed here are ignored.
pub const SECTION_HEADERS: [&str; 7] = [
    "The Opportunity",
    "You Have",
    "Nice If You Have",
    "Clearance",
    "Compensation",
    "Identity Statement",
    "Work Model",
];

/// Returns true if `header` is one of the recognized section headers
pub fn is_section_header(header: &str) -> bool {
    SECTION_HEADERS.contains(&header)
}

/// Field map for a single job listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    fields: BTreeMap<String, String>,
}

impl JobRecord {
    /// Creates a record from extracted fields, stamping the detail URL and title
    ///
    /// The title overwrites any same-named field from extraction. `URL` is always
    /// the URL the detail page was requested from.
    pub fn new(detail_url: &str, title: &str, mut fields: BTreeMap<String, String>) -> Self {
        fields.insert(URL_FIELD.to_string(), detail_url.to_string());
        fields.insert(TITLE_FIELD.to_string(), title.to_string());
        Self { fields }
    }

    /// Creates a record carrying only the URL and title
    pub fn metadata_only(detail_url: &str, title: &str) -> Self {
        Self::new(detail_url, title, BTreeMap::new())
    }

    /// Gets a field value by name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The detail page URL
    pub fn url(&self) -> &str {
        self.get(URL_FIELD).unwrap_or_default()
    }

    /// The listing title
    pub fn title(&self) -> &str {
        self.get(TITLE_FIELD).unwrap_or_default()
    }

    /// Number of fields present, including URL and title
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if nothing beyond URL and title was extracted
    pub fn is_metadata_only(&self) -> bool {
        self.fields
            .keys()
            .all(|k| k == URL_FIELD || k == TITLE_FIELD)
    }

    /// Values for the export columns in order, with "" for any missing field
    pub fn to_row(&self) -> Vec<&str> {
        EXPORT_COLUMNS
            .iter()
            .map(|column| self.get(column).unwrap_or(""))
            .collect()
    }
}
