//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, service wiring, worker spawning, and the
//! Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

use crate::application::NotifyWorker;
use crate::application::services::{
    DirectoryPingService, ExternalLinksService, PingbackService, TrackbackService,
};
use crate::config::Config;
use crate::domain::repositories::{EntryRepository, LinkbackRepository};
use crate::infrastructure::http::{ReqwestFetcher, ResourceFetcher};
use crate::infrastructure::persistence::{PgEntryRepository, PgLinkbackRepository};
use crate::infrastructure::xmlrpc::{PingClient, XmlRpcPingClient};
use crate::routes::app_router;
use crate::spam_checker;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Outbound HTTP fetcher and XML-RPC client
/// - Background notification worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration run, or server
/// bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let pool = Arc::new(pool);
    let entries: Arc<dyn EntryRepository> = Arc::new(PgEntryRepository::new(Arc::clone(&pool)));
    let linkbacks: Arc<dyn LinkbackRepository> =
        Arc::new(PgLinkbackRepository::new(Arc::clone(&pool)));

    let fetcher: Arc<dyn ResourceFetcher> = Arc::new(ReqwestFetcher::new()?);
    let ping_client: Arc<dyn PingClient> = Arc::new(XmlRpcPingClient::new(config.fetch_timeout)?);
    let spam_checker = spam_checker::for_backend(&config.spam_checker_backend);

    let pingback_service = Arc::new(PingbackService::new(
        Arc::clone(&entries),
        Arc::clone(&linkbacks),
        Arc::clone(&fetcher),
        spam_checker,
        config.site_domain.clone(),
        config.pingback_content_length,
        config.fetch_timeout,
    ));
    let trackback_service = Arc::new(TrackbackService::new(
        Arc::clone(&entries),
        Arc::clone(&linkbacks),
        config.site_url(),
        config.site_domain.clone(),
    ));

    let directory_pings = Arc::new(DirectoryPingService::new(
        Arc::clone(&ping_client),
        config.site_name.clone(),
        config.blog_url(),
        config.feed_url(),
    ));
    let external_links = Arc::new(ExternalLinksService::new(
        Arc::clone(&fetcher),
        ping_client,
        config.site_url(),
        config.fetch_timeout,
    ));

    let (notify_tx, notify_rx) = mpsc::channel(config.notify_queue_capacity);
    let _worker = Arc::new(NotifyWorker::new(
        directory_pings,
        external_links,
        config.notify_worker_concurrency,
        config.notify_job_timeout,
    ))
    .spawn(notify_rx);
    tracing::info!("Notification worker started");

    let state = AppState::new(
        pingback_service,
        trackback_service,
        entries,
        notify_tx,
        &config,
    );

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
