//! Background worker draining the outbound notification queue.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;

use crate::application::services::{DirectoryPingService, ExternalLinksService};
use crate::domain::entities::NotificationOutcome;
use crate::domain::notify::NotifyJob;

/// Consumes [`NotifyJob`]s from the publish workflow and runs them with
/// bounded concurrency.
///
/// Each job gets its own deadline; a stuck directory or receiver times out
/// without holding up the rest of the queue. Outcomes are logged, never
/// reported back to the producer.
pub struct NotifyWorker {
    directory_pings: Arc<DirectoryPingService>,
    external_links: Arc<ExternalLinksService>,
    semaphore: Arc<Semaphore>,
    job_timeout: Duration,
}

impl NotifyWorker {
    /// Creates a worker running at most `concurrency` jobs in parallel.
    pub fn new(
        directory_pings: Arc<DirectoryPingService>,
        external_links: Arc<ExternalLinksService>,
        concurrency: usize,
        job_timeout: Duration,
    ) -> Self {
        Self {
            directory_pings,
            external_links,
            semaphore: Arc::new(Semaphore::new(concurrency)),
            job_timeout,
        }
    }

    /// Spawns the worker loop. The task ends when every sender is dropped
    /// and the queue is drained.
    pub fn spawn(self: Arc<Self>, receiver: mpsc::Receiver<NotifyJob>) -> JoinHandle<()> {
        tokio::spawn(self.run(receiver))
    }

    async fn run(self: Arc<Self>, mut receiver: mpsc::Receiver<NotifyJob>) {
        while let Some(job) = receiver.recv().await {
            let Ok(permit) = Arc::clone(&self.semaphore).acquire_owned().await else {
                break;
            };
            let worker = Arc::clone(&self);
            tokio::spawn(async move {
                let _permit = permit;
                worker.process(job).await;
            });
        }
        tracing::info!("notification queue closed, worker stopping");
    }

    async fn process(&self, job: NotifyJob) {
        let kind = job.kind();
        if tokio::time::timeout(self.job_timeout, self.execute(job))
            .await
            .is_err()
        {
            tracing::warn!(kind, "notification job exceeded its deadline");
        }
    }

    async fn execute(&self, job: NotifyJob) {
        match job {
            NotifyJob::Directory {
                directory_url,
                entry,
            } => {
                let outcome = self.directory_pings.ping_entry(&directory_url, &entry).await;
                log_outcome(&outcome);
            }
            NotifyJob::ExternalLinks { entry } => {
                for outcome in self.external_links.notify_entry(&entry).await {
                    log_outcome(&outcome);
                }
            }
        }
    }
}

fn log_outcome(outcome: &NotificationOutcome) {
    if outcome.success {
        tracing::info!(server = %outcome.server, message = %outcome.message, "ping delivered");
    } else {
        tracing::warn!(server = %outcome.server, message = %outcome.message, "ping failed");
    }
}
