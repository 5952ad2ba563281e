//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{PingbackService, TrackbackService};
use crate::config::Config;
use crate::domain::notify::NotifyJob;
use crate::domain::repositories::EntryRepository;

/// Application state shared by all handlers.
///
/// Services are behind `Arc` so the state stays cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub pingback_service: Arc<PingbackService>,
    pub trackback_service: Arc<TrackbackService>,
    /// Direct repository access, used by the health check to probe the
    /// database.
    pub entries: Arc<dyn EntryRepository>,
    /// Producer side of the background notification queue.
    pub notify_sender: mpsc::Sender<NotifyJob>,

    /// Directory endpoints notified on publish.
    pub ping_directories: Arc<[String]>,
    /// When false, publish notifications skip the directory fan-out.
    pub save_ping_directories: bool,
    /// When false, publish notifications skip external-link pingbacks.
    pub save_ping_external_urls: bool,
}

impl AppState {
    /// Assembles the state from built services and the loaded configuration.
    pub fn new(
        pingback_service: Arc<PingbackService>,
        trackback_service: Arc<TrackbackService>,
        entries: Arc<dyn EntryRepository>,
        notify_sender: mpsc::Sender<NotifyJob>,
        config: &Config,
    ) -> Self {
        Self {
            pingback_service,
            trackback_service,
            entries,
            notify_sender,
            ping_directories: config.ping_directories.clone().into(),
            save_ping_directories: config.save_ping_directories,
            save_ping_external_urls: config.save_ping_external_urls,
        }
    }
}
