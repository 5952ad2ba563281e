//! Notification jobs enqueued by the publish workflow.

/// Snapshot of an entry at publish time, carried by notification jobs.
///
/// The content store hands this over when an entry becomes publicly visible;
/// the background worker never reads the entry back from the database, so a
/// later edit cannot race the notification run.
#[derive(Debug, Clone)]
pub struct PublishedEntry {
    pub title: String,
    /// Absolute URL of the entry.
    pub url: String,
    /// Rendered HTML of the entry body, scanned for outbound links.
    pub html: String,
    pub categories: Vec<String>,
}

/// One fire-and-forget unit of outbound notification work.
#[derive(Debug, Clone)]
pub enum NotifyJob {
    /// Notify a single ping directory that the entry was published.
    Directory {
        directory_url: String,
        entry: PublishedEntry,
    },
    /// Discover and ping every external pingback receiver the entry links to.
    ExternalLinks { entry: PublishedEntry },
}

impl NotifyJob {
    /// Short label used in worker logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NotifyJob::Directory { .. } => "directory",
            NotifyJob::ExternalLinks { .. } => "external_links",
        }
    }
}
