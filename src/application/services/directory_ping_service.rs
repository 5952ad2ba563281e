//! Outbound `weblogUpdates` directory notification.

use std::sync::Arc;

use crate::domain::entities::NotificationOutcome;
use crate::domain::notify::PublishedEntry;
use crate::infrastructure::xmlrpc::{PingClient, RpcError};

/// Notifies weblog directories that an entry was published.
///
/// One directory per call; the notify worker fans out over the configured
/// list. Transport and protocol failures never escape: every attempt ends in
/// a [`NotificationOutcome`].
pub struct DirectoryPingService {
    client: Arc<dyn PingClient>,
    site_name: String,
    site_url: String,
    feed_url: String,
}

impl DirectoryPingService {
    /// Creates a new directory ping service.
    pub fn new(
        client: Arc<dyn PingClient>,
        site_name: String,
        site_url: String,
        feed_url: String,
    ) -> Self {
        Self {
            client,
            site_name,
            site_url,
            feed_url,
        }
    }

    /// Pings one directory about one published entry.
    ///
    /// Tries `weblogUpdates.extendedPing` first and falls back to the basic
    /// `weblogUpdates.ping` when the extended form fails. When both fail the
    /// outcome names the unreachable directory.
    pub async fn ping_entry(
        &self,
        directory_url: &str,
        entry: &PublishedEntry,
    ) -> NotificationOutcome {
        let categories = entry.categories.join("|");

        let extended = self
            .client
            .extended_ping(
                directory_url,
                &self.site_name,
                &self.site_url,
                &entry.url,
                &self.feed_url,
                &categories,
            )
            .await;

        let reply = match extended {
            Ok(reply) => reply,
            Err(e) => {
                tracing::debug!(
                    directory = directory_url,
                    error = %e,
                    "extended ping failed, retrying with basic ping"
                );
                match self
                    .client
                    .ping(
                        directory_url,
                        &self.site_name,
                        &self.site_url,
                        &entry.url,
                        &categories,
                    )
                    .await
                {
                    Ok(reply) => reply,
                    Err(e) => return self.unreachable(directory_url, e),
                }
            }
        };

        if reply.flerror {
            NotificationOutcome::failure(directory_url, reply.message)
        } else {
            NotificationOutcome::success(directory_url, reply.message)
        }
    }

    fn unreachable(&self, directory_url: &str, error: RpcError) -> NotificationOutcome {
        tracing::warn!(directory = directory_url, error = %error, "directory unreachable");
        NotificationOutcome::failure(
            directory_url,
            format!("{directory_url} is an invalid directory"),
        )
    }
}
