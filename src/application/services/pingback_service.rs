//! Inbound pingback verification pipeline.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::entities::{Entry, LinkbackKind, NewLinkback};
use crate::domain::pingback::PingbackFault;
use crate::domain::repositories::{EntryRepository, LinkbackRepository};
use crate::error::AppError;
use crate::infrastructure::http::ResourceFetcher;
use crate::spam_checker::SpamChecker;
use crate::utils::excerpt::{document_title, excerpt};
use crate::utils::url_normalizer::normalize_url;

/// Receiver side of the Pingback 1.0 protocol.
///
/// `ping` runs the ordered verification pipeline over an inbound claim and
/// either registers a linkback or returns the protocol fault describing why
/// it was rejected. Every step's failure is terminal; no step after a failed
/// one is evaluated.
pub struct PingbackService {
    entries: Arc<dyn EntryRepository>,
    linkbacks: Arc<dyn LinkbackRepository>,
    fetcher: Arc<dyn ResourceFetcher>,
    spam_checker: Arc<dyn SpamChecker>,
    /// Host (and optional port) inbound targets must resolve to.
    site_domain: String,
    /// Character budget for the generated excerpt.
    excerpt_length: usize,
    /// Timeout for the source verification fetch.
    fetch_timeout: Duration,
}

impl PingbackService {
    /// Creates a new pingback service.
    pub fn new(
        entries: Arc<dyn EntryRepository>,
        linkbacks: Arc<dyn LinkbackRepository>,
        fetcher: Arc<dyn ResourceFetcher>,
        spam_checker: Arc<dyn SpamChecker>,
        site_domain: String,
        excerpt_length: usize,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            entries,
            linkbacks,
            fetcher,
            spam_checker,
            site_domain,
            excerpt_length,
            fetch_timeout,
        }
    }

    /// `pingback.ping(sourceURI, targetURI)`.
    ///
    /// Verifies that `source` exists and links to `target`, that `target` is
    /// a pingback-enabled entry on this site, and registers the backlink
    /// once. Duplicate registrations converge on
    /// [`PingbackFault::AlreadyRegistered`].
    ///
    /// Unexpected internal errors never propagate: they are logged and
    /// collapsed to [`PingbackFault::Undefined`] so the remote caller always
    /// receives a protocol-valid response.
    pub async fn ping(&self, source: &str, target: &str) -> Result<String, PingbackFault> {
        match self.verify_and_register(source, target).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(source, target, error = %e, "pingback pipeline failed unexpectedly");
                Err(PingbackFault::Undefined)
            }
        }
    }

    /// `pingback.extensions.getPingbacks(targetURI)`.
    ///
    /// Re-runs target resolution, then lists the source URLs of the entry's
    /// registered pingbacks in persistence order.
    pub async fn get_pingbacks(&self, target: &str) -> Result<Vec<String>, PingbackFault> {
        match self.list_for_target(target).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(target, error = %e, "getPingbacks failed unexpectedly");
                Err(PingbackFault::Undefined)
            }
        }
    }

    async fn verify_and_register(
        &self,
        source: &str,
        target: &str,
    ) -> Result<Result<String, PingbackFault>, AppError> {
        if source == target {
            return Ok(Err(PingbackFault::Undefined));
        }

        // Reject unparseable and non-http(s) sources before going on the
        // network.
        if let Err(e) = normalize_url(source) {
            tracing::debug!(source, error = %e, "source URI rejected");
            return Ok(Err(PingbackFault::SourceDoesNotExist));
        }

        let resource = match self.fetcher.fetch(source, self.fetch_timeout).await {
            Ok(resource) => resource,
            Err(e) => {
                tracing::debug!(source, error = %e, "source fetch failed");
                return Ok(Err(PingbackFault::SourceDoesNotExist));
            }
        };

        if !resource.body.contains(target) {
            return Ok(Err(PingbackFault::SourceDoesNotLink));
        }

        let entry = match self.resolve_target(target).await? {
            Ok(entry) => entry,
            Err(fault) => return Ok(Err(fault)),
        };

        let title = document_title(&resource.body).unwrap_or_else(|| "No title".to_string());
        let Some(excerpt_text) =
            excerpt(&resource.body, &resource.url, target, self.excerpt_length)
        else {
            // Target occurs in the document but not as an anchor href.
            tracing::warn!(source, target, "no anchor pointing at target in source document");
            return Ok(Err(PingbackFault::Undefined));
        };

        if self.spam_checker.is_spam(source, &title, &excerpt_text).await {
            return Ok(Err(PingbackFault::Spam));
        }

        let new = NewLinkback {
            entry_id: entry.id,
            source_url: source.to_string(),
            title,
            excerpt: excerpt_text,
            kind: LinkbackKind::Pingback,
            site: self.site_domain.clone(),
        };

        match self.linkbacks.create_if_absent(new).await? {
            None => Ok(Err(PingbackFault::AlreadyRegistered)),
            Some(_) => {
                self.entries.increment_pingback_count(entry.id).await?;
                tracing::info!(source, target, "pingback registered");
                Ok(Ok(format!(
                    "Pingback from {source} to {target} registered."
                )))
            }
        }
    }

    async fn list_for_target(
        &self,
        target: &str,
    ) -> Result<Result<Vec<String>, PingbackFault>, AppError> {
        let entry = match self.resolve_target(target).await? {
            Ok(entry) => entry,
            Err(fault) => return Ok(Err(fault)),
        };
        let sources = self
            .linkbacks
            .list_sources(entry.id, LinkbackKind::Pingback)
            .await?;
        Ok(Ok(sources))
    }

    /// Resolves a target URI to a pingback-enabled local entry.
    async fn resolve_target(&self, target: &str) -> Result<Result<Entry, PingbackFault>, AppError> {
        let Ok(url) = Url::parse(target) else {
            return Ok(Err(PingbackFault::TargetDoesNotExist));
        };

        let authority = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            _ => return Ok(Err(PingbackFault::TargetDoesNotExist)),
        };
        if !authority.eq_ignore_ascii_case(&self.site_domain) {
            return Ok(Err(PingbackFault::TargetDoesNotExist));
        }

        let Some(entry) = self.entries.find_published_by_path(url.path()).await? else {
            return Ok(Err(PingbackFault::TargetDoesNotExist));
        };

        if !entry.pingback_enabled {
            return Ok(Err(PingbackFault::TargetIsNotPingable));
        }

        Ok(Ok(entry))
    }
}
