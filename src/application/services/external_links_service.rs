//! Pingback receiver discovery and external-link notification.

use std::sync::Arc;
use std::time::Duration;

use scraper::{Html, Selector};
use url::Url;

use crate::domain::entities::NotificationOutcome;
use crate::domain::notify::PublishedEntry;
use crate::infrastructure::http::ResourceFetcher;
use crate::infrastructure::xmlrpc::PingClient;
use crate::utils::links::find_external_links;

/// Discovers pingback receivers behind the external links of a published
/// entry and notifies each of them.
///
/// Discovery results are never cached: a run always reflects the current
/// state of the remote documents.
pub struct ExternalLinksService {
    fetcher: Arc<dyn ResourceFetcher>,
    client: Arc<dyn PingClient>,
    /// Site root; same-host links are not external.
    site_url: String,
    fetch_timeout: Duration,
}

impl ExternalLinksService {
    /// Creates a new external-link notification service.
    pub fn new(
        fetcher: Arc<dyn ResourceFetcher>,
        client: Arc<dyn PingClient>,
        site_url: String,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            client,
            site_url,
            fetch_timeout,
        }
    }

    /// Discovers the pingback receiver advertised by a remote document.
    ///
    /// The `X-Pingback` response header wins over a `<link rel="pingback">`
    /// tag in the body; non-text resources are skipped entirely. A relative
    /// receiver URL is resolved against the fetched document's final URL.
    /// Fetch errors yield `None` and never abort the batch.
    pub async fn discover(&self, url: &str) -> Option<String> {
        let resource = match self.fetcher.fetch(url, self.fetch_timeout).await {
            Ok(resource) => resource,
            Err(e) => {
                tracing::debug!(url, error = %e, "discovery fetch failed");
                return None;
            }
        };

        if !resource.is_text() {
            return None;
        }

        let candidate = resource
            .x_pingback
            .clone()
            .or_else(|| pingback_link_tag(&resource.body))?;

        resolve_receiver(&resource.url, &candidate)
    }

    /// Notifies every discovered pingback receiver the entry links to.
    ///
    /// Returns one outcome per issued ping; links with no discoverable
    /// receiver produce no outcome. Per-target failures are isolated.
    pub async fn notify_entry(&self, entry: &PublishedEntry) -> Vec<NotificationOutcome> {
        let links = find_external_links(&entry.html, &self.site_url);
        let mut outcomes = Vec::with_capacity(links.len());

        for target in links {
            let Some(receiver) = self.discover(&target).await else {
                tracing::debug!(target, "no pingback receiver discovered");
                continue;
            };

            match self.client.pingback(&receiver, &entry.url, &target).await {
                Ok(reply) => outcomes.push(NotificationOutcome::success(&target, reply)),
                Err(e) => {
                    tracing::debug!(target, receiver, error = %e, "outbound pingback failed");
                    outcomes.push(NotificationOutcome::failure(
                        &target,
                        format!("{target} cannot be pinged."),
                    ));
                }
            }
        }

        outcomes
    }
}

/// Extracts the href of a `<link rel="pingback">` tag, if any.
///
/// The `rel` comparison is case-insensitive and attribute order does not
/// matter; the first matching tag wins.
fn pingback_link_tag(html: &str) -> Option<String> {
    let Ok(selector) = Selector::parse("link[href]") else {
        return None;
    };
    Html::parse_document(html)
        .select(&selector)
        .find(|link| {
            link.value()
                .attr("rel")
                .is_some_and(|rel| rel.eq_ignore_ascii_case("pingback"))
        })
        .and_then(|link| link.value().attr("href").map(str::to_string))
}

/// Resolves a receiver URL against the document it was advertised by.
fn resolve_receiver(document_url: &str, candidate: &str) -> Option<String> {
    if let Ok(absolute) = Url::parse(candidate) {
        return Some(absolute.to_string());
    }
    let base = Url::parse(document_url).ok()?;
    base.join(candidate).ok().map(|u| u.to_string())
}
