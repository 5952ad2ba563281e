//! Entry entity: the local content item linkbacks attach to.

use chrono::{DateTime, Utc};

/// A published weblog entry as seen by the linkback subsystem.
///
/// The editorial side of the entry (body, authors, categories) is owned by
/// the content store; this service only reads the linkback flags, resolves
/// the canonical path, and requests counter increments.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    /// Site-relative canonical path, e.g. `/2026/08/23/my-entry/`.
    pub path: String,
    pub published: bool,
    pub pingback_enabled: bool,
    pub trackback_enabled: bool,
    pub pingback_count: i64,
    pub trackback_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Absolute URL of this entry under the given site root.
    pub fn absolute_url(&self, site_url: &str) -> String {
        format!("{}{}", site_url.trim_end_matches('/'), self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> Entry {
        Entry {
            id: 1,
            title: "My first entry".to_string(),
            path: path.to_string(),
            published: true,
            pingback_enabled: true,
            trackback_enabled: true,
            pingback_count: 0,
            trackback_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_absolute_url() {
        let e = entry("/2026/08/23/my-first-entry/");
        assert_eq!(
            e.absolute_url("http://example.com"),
            "http://example.com/2026/08/23/my-first-entry/"
        );
    }

    #[test]
    fn test_absolute_url_trims_trailing_slash() {
        let e = entry("/hello/");
        assert_eq!(
            e.absolute_url("http://example.com/"),
            "http://example.com/hello/"
        );
    }
}
