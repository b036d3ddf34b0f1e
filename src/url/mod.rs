//! URL handling for careers-crawl
//!
//! Listing pages hand out origin-relative hrefs (`/jobs/123`), so every link the
//! walker finds is resolved against the site's base origin before it is fetched.

use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a site base URL and reduces it to its origin
///
/// Only `http` and `https` are accepted, and the URL must carry a host. Path,
/// query and fragment are dropped so that joins behave as origin-relative.
///
/// # Examples
///
/// ```
/// use careers_crawl::url::parse_base_url;
///
/// let base = parse_base_url("https://careers.example.com/ignored?x=1").unwrap();
/// assert_eq!(base.as_str(), "https://careers.example.com/");
/// ```
pub fn parse_base_url(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Builds the crawl start URL from a base origin and a path such as `/jobs/search`
pub fn start_url(base: &Url, start_path: &str) -> UrlResult<Url> {
    base.join(start_path)
        .map_err(|e| UrlError::Parse(format!("Invalid start path '{}': {}", start_path, e)))
}

/// Resolves an href found on a listing page to an absolute URL
///
/// Absolute `http(s)` hrefs are kept as they are; anything else is joined onto
/// `base`. Returns None for empty hrefs, fragment-only anchors, non-navigational
/// schemes, and anything that does not resolve to an HTTP(S) URL.
pub fn resolve_href(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("tel:")
    {
        return None;
    }

    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}
