//! Excerpt generation for linkback display.
//!
//! Produces a bounded-length plain-text window centered on a specific link
//! inside an HTML document. Pure functions: no I/O, no randomness.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements considered block-level when locating the anchor's container.
const BLOCK_TAGS: &[&str] = &[
    "p",
    "div",
    "li",
    "blockquote",
    "td",
    "th",
    "dd",
    "dt",
    "pre",
    "figcaption",
    "section",
    "article",
    "aside",
    "main",
    "body",
];

/// Generates a display excerpt for the link pointing at `target_url`.
///
/// Locates the anchor whose `href` matches `target_url` (verbatim, or once
/// resolved against `document_url`), takes its nearest block-level ancestor
/// stripped to plain text, and windows that text around the anchor's own
/// text:
///
/// - when the text fits in `max_length` characters it is returned verbatim;
/// - otherwise a window of at most `max_length` characters centered on the
///   link position is returned, shifted right when the link sits near the
///   start, prefixed with `"..."` when the head was cut and suffixed with
///   `"..."` when the tail was cut.
///
/// Returns `None` when the document contains no anchor matching the target.
pub fn excerpt(
    html: &str,
    document_url: &str,
    target_url: &str,
    max_length: usize,
) -> Option<String> {
    let selector = Selector::parse("a[href]").ok()?;
    let document = Html::parse_document(html);
    let anchor = document.select(&selector).find(|a| {
        a.value()
            .attr("href")
            .is_some_and(|href| href_matches(href, document_url, target_url))
    })?;

    let container = nearest_block_ancestor(anchor).unwrap_or(anchor);
    let content: String = container.text().collect();
    let link_text: String = anchor.text().collect();

    let chars: Vec<char> = content.chars().collect();
    let len = chars.len();
    if len <= max_length {
        return Some(content);
    }

    let index = content
        .find(&link_text)
        .map(|byte_idx| content[..byte_idx].chars().count())
        .unwrap_or(0);
    let half = max_length / 2;

    let start = index.saturating_sub(half);
    let mut end = index + half;
    if index < half {
        // Spend the unused head budget on the tail.
        end += half - index;
    }
    let end = end.min(len);

    let mut out = String::new();
    if start > 0 {
        out.push_str("...");
    }
    out.extend(&chars[start..end]);
    if end < len {
        out.push_str("...");
    }
    Some(out)
}

/// True when `href` designates `target_url`, comparing verbatim first and
/// then as URLs with relative hrefs resolved against `document_url`.
fn href_matches(href: &str, document_url: &str, target_url: &str) -> bool {
    if href == target_url {
        return true;
    }
    let Ok(target) = Url::parse(target_url) else {
        return false;
    };
    let resolved = match Url::parse(href) {
        Ok(absolute) => Some(absolute),
        Err(_) => Url::parse(document_url)
            .ok()
            .and_then(|base| base.join(href).ok()),
    };
    resolved.is_some_and(|url| url == target)
}

/// Extracts the document's `<title>` text, if any.
pub fn document_title(html: &str) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let document = Html::parse_document(html);
    let title: String = document.select(&selector).next()?.text().collect();
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

fn nearest_block_ancestor(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| BLOCK_TAGS.contains(&el.value().name()))
}
