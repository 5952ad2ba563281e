//! DTOs for the publish notification endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::notify::PublishedEntry;

/// Payload sent by the content store when an entry becomes publicly visible.
#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub title: String,
    /// Absolute URL of the published entry.
    pub url: String,
    /// Rendered HTML of the entry body.
    pub html: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl NotifyRequest {
    pub fn into_entry(self) -> PublishedEntry {
        PublishedEntry {
            title: self.title,
            url: self.url,
            html: self.html,
            categories: self.categories,
        }
    }
}

/// Acknowledgement of a notification request.
#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    /// Number of jobs placed on the background queue.
    pub queued: usize,
}
