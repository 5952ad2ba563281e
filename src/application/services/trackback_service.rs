//! Trackback form receiver.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{LinkbackKind, NewLinkback};
use crate::domain::repositories::{EntryRepository, LinkbackRepository};
use crate::error::AppError;

/// Fields of a trackback form submission. Only `url` is mandatory; the
/// protocol defines cascading defaults for the rest.
#[derive(Debug, Clone)]
pub struct TrackbackSubmission {
    pub url: String,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub blog_name: Option<String>,
}

/// Protocol-level acknowledgement of a trackback submission.
///
/// `error: None` is success; `Some(message)` is rendered as the Trackback
/// error payload. Protocol rejections (disabled, duplicate) land here, not in
/// [`AppError`]: the remote client must always receive a well-formed
/// Trackback response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackbackAck {
    pub error: Option<String>,
}

impl TrackbackAck {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}

/// Receiver side of the Trackback protocol.
///
/// Unlike pingback there is no source verification: the submission's own
/// fields are trusted, defaulted, and stored.
pub struct TrackbackService {
    entries: Arc<dyn EntryRepository>,
    linkbacks: Arc<dyn LinkbackRepository>,
    /// Site root used to build the entry URL for `GET` redirects.
    site_url: String,
    /// Site scope stored with each record.
    site_domain: String,
}

impl TrackbackService {
    /// Creates a new trackback service.
    pub fn new(
        entries: Arc<dyn EntryRepository>,
        linkbacks: Arc<dyn LinkbackRepository>,
        site_url: String,
        site_domain: String,
    ) -> Self {
        Self {
            entries,
            linkbacks,
            site_url,
            site_domain,
        }
    }

    /// Registers a trackback against a local entry.
    ///
    /// Missing fields cascade: `title` defaults to the submitted URL,
    /// `excerpt` and `blog_name` default to the resolved title. Empty form
    /// fields count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the entry does not exist or is not
    /// published; the HTTP layer maps this to 404.
    pub async fn register(
        &self,
        entry_id: i64,
        submission: TrackbackSubmission,
    ) -> Result<TrackbackAck, AppError> {
        let entry = self
            .entries
            .find_published_by_id(entry_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Entry not found", json!({ "entry_id": entry_id }))
            })?;

        if !entry.trackback_enabled {
            return Ok(TrackbackAck::rejected(format!(
                "Trackback is not enabled for {}",
                entry.title
            )));
        }

        let url = submission.url;
        let title = non_empty(submission.title).unwrap_or_else(|| url.clone());
        let excerpt = non_empty(submission.excerpt).unwrap_or_else(|| title.clone());
        let blog_name = non_empty(submission.blog_name).unwrap_or_else(|| title.clone());

        let new = NewLinkback {
            entry_id: entry.id,
            source_url: url.clone(),
            title: blog_name,
            excerpt,
            kind: LinkbackKind::Trackback,
            site: self.site_domain.clone(),
        };

        match self.linkbacks.create_if_absent(new).await? {
            None => Ok(TrackbackAck::rejected("Trackback is already registered")),
            Some(_) => {
                self.entries.increment_trackback_count(entry.id).await?;
                tracing::info!(entry_id, source = %url, "trackback registered");
                Ok(TrackbackAck::ok())
            }
        }
    }

    /// Absolute URL of an entry, for the `GET /trackback/{id}` redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown or unpublished entries.
    pub async fn entry_url(&self, entry_id: i64) -> Result<String, AppError> {
        let entry = self
            .entries
            .find_published_by_id(entry_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Entry not found", json!({ "entry_id": entry_id }))
            })?;
        Ok(entry.absolute_url(&self.site_url))
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}
