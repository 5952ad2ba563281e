//! Outbound link extraction from rendered entry HTML.

use scraper::{Html, Selector};
use url::Url;

/// Collects the external links of an HTML document.
///
/// An anchor is external when its `href` is an absolute http(s) URL whose
/// host differs from the site's host (compared case-insensitively). Relative
/// URLs, anchors, non-http(s) schemes and same-host links are excluded.
/// Duplicates are removed while preserving first-seen order.
///
/// Malformed HTML degrades to an empty list; this function never fails and
/// performs no network access.
pub fn find_external_links(html: &str, site_url: &str) -> Vec<String> {
    let Ok(site) = Url::parse(site_url) else {
        return Vec::new();
    };
    let Some(site_host) = site.host_str() else {
        return Vec::new();
    };
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        // Relative URLs fail to parse on their own and are excluded by design.
        let Ok(parsed) = Url::parse(href) else {
            continue;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            continue;
        }
        let external = parsed
            .host_str()
            .is_some_and(|h| !h.eq_ignore_ascii_case(site_host));
        if external && !links.iter().any(|l| l == href) {
            links.push(href.to_string());
        }
    }

    links
}
