#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

use linkback::application::services::{PingbackService, TrackbackService};
use linkback::domain::entities::{Entry, Linkback, LinkbackKind, NewLinkback};
use linkback::domain::notify::NotifyJob;
use linkback::domain::repositories::{EntryRepository, LinkbackRepository};
use linkback::error::AppError;
use linkback::infrastructure::http::{FetchError, Resource, ResourceFetcher};
use linkback::spam_checker;
use linkback::state::AppState;

pub const SITE_DOMAIN: &str = "blog.example.com";
pub const SITE_URL: &str = "http://blog.example.com";

pub fn test_entry(id: i64, title: &str, path: &str) -> Entry {
    Entry {
        id,
        title: title.to_string(),
        path: path.to_string(),
        published: true,
        pingback_enabled: true,
        trackback_enabled: true,
        pingback_count: 0,
        trackback_count: 0,
        created_at: Utc::now(),
    }
}

/// In-memory entry store recording counter increments.
pub struct InMemoryEntries {
    entries: Vec<Entry>,
    pub pingback_increments: Mutex<Vec<i64>>,
    pub trackback_increments: Mutex<Vec<i64>>,
}

impl InMemoryEntries {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            pingback_increments: Mutex::new(Vec::new()),
            trackback_increments: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntries {
    async fn find_published_by_path(&self, path: &str) -> Result<Option<Entry>, AppError> {
        Ok(self
            .entries
            .iter()
            .find(|e| e.published && e.path == path)
            .cloned())
    }

    async fn find_published_by_id(&self, id: i64) -> Result<Option<Entry>, AppError> {
        Ok(self
            .entries
            .iter()
            .find(|e| e.published && e.id == id)
            .cloned())
    }

    async fn increment_pingback_count(&self, id: i64) -> Result<(), AppError> {
        self.pingback_increments.lock().unwrap().push(id);
        Ok(())
    }

    async fn increment_trackback_count(&self, id: i64) -> Result<(), AppError> {
        self.trackback_increments.lock().unwrap().push(id);
        Ok(())
    }
}

/// In-memory linkback store enforcing the (entry, source, site) uniqueness
/// the database constraint provides in production.
#[derive(Default)]
pub struct InMemoryLinkbacks {
    pub rows: Mutex<Vec<Linkback>>,
}

#[async_trait]
impl LinkbackRepository for InMemoryLinkbacks {
    async fn create_if_absent(&self, new: NewLinkback) -> Result<Option<Linkback>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let exists = rows.iter().any(|row| {
            row.entry_id == new.entry_id && row.source_url == new.source_url && row.site == new.site
        });
        if exists {
            return Ok(None);
        }

        let row = Linkback {
            id: rows.len() as i64 + 1,
            entry_id: new.entry_id,
            source_url: new.source_url,
            title: new.title,
            excerpt: new.excerpt,
            kind: new.kind,
            site: new.site,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(Some(row))
    }

    async fn list_sources(
        &self,
        entry_id: i64,
        kind: LinkbackKind,
    ) -> Result<Vec<String>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.entry_id == entry_id && row.kind == kind)
            .map(|row| row.source_url.clone())
            .collect())
    }
}

/// Fetcher serving canned documents; unknown URLs fail with a transport
/// error.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Resource>,
}

impl StaticFetcher {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Resource {
            url: url.to_string(),
            status: 200,
            content_type: Some("text/html; charset=utf-8".to_string()),
            x_pingback: None,
            body: html.to_string(),
        });
        self
    }
}

#[async_trait]
impl ResourceFetcher for StaticFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<Resource, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Transport(format!("no route to {url}")))
    }
}

pub struct TestContext {
    pub state: AppState,
    pub entries: Arc<InMemoryEntries>,
    pub linkbacks: Arc<InMemoryLinkbacks>,
    pub notify_rx: mpsc::Receiver<NotifyJob>,
}

/// Wires the application state over in-memory stores, a canned fetcher and
/// an open notification queue.
pub fn create_test_state(
    entries: Vec<Entry>,
    fetcher: StaticFetcher,
    ping_directories: Vec<String>,
) -> TestContext {
    let entries = Arc::new(InMemoryEntries::new(entries));
    let linkbacks = Arc::new(InMemoryLinkbacks::default());
    let fetcher: Arc<dyn ResourceFetcher> = Arc::new(fetcher);
    let (notify_tx, notify_rx) = mpsc::channel(100);

    let pingback_service = Arc::new(PingbackService::new(
        entries.clone(),
        linkbacks.clone(),
        fetcher.clone(),
        spam_checker::for_backend("permissive"),
        SITE_DOMAIN.to_string(),
        300,
        Duration::from_secs(5),
    ));
    let trackback_service = Arc::new(TrackbackService::new(
        entries.clone(),
        linkbacks.clone(),
        SITE_URL.to_string(),
        SITE_DOMAIN.to_string(),
    ));

    let save_ping_directories = !ping_directories.is_empty();
    let state = AppState {
        pingback_service,
        trackback_service,
        entries: entries.clone(),
        notify_sender: notify_tx,
        ping_directories: ping_directories.into(),
        save_ping_directories,
        save_ping_external_urls: true,
    };

    TestContext {
        state,
        entries,
        linkbacks,
        notify_rx,
    }
}
