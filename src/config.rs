//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. Network timeouts are carried in the config and threaded explicitly
//! into every outbound call; there is no process-wide default timeout.
//!
//! ## Required Variables
//!
//! - `SITE_DOMAIN` - the host this weblog is served from, used to build
//!   absolute entry URLs and to verify inbound pingback targets
//! - Either `DATABASE_URL` or all of (`DB_HOST`, `DB_USER`, `DB_PASSWORD`,
//!   `DB_NAME`)
//!
//! ## Optional Variables
//!
//! - `SITE_PROTOCOL` - `http` or `https` (default: `http`)
//! - `SITE_NAME` - name reported to ping directories (default: `SITE_DOMAIN`)
//! - `BLOG_PATH` / `FEED_PATH` - site-relative index and feed paths
//! - `PING_DIRECTORIES` - comma-separated XML-RPC directory endpoints
//! - `SAVE_PING_DIRECTORIES` - enable directory pings on publish
//!   (default: enabled when `PING_DIRECTORIES` is non-empty)
//! - `SAVE_PING_EXTERNAL_URLS` - enable external-link pingbacks (default: true)
//! - `FETCH_TIMEOUT_SECONDS` - per network call timeout (default: 10)
//! - `PINGBACK_CONTENT_LENGTH` - excerpt length budget (default: 300)
//! - `SPAM_CHECKER_BACKEND` - spam checker registry key (default: `permissive`)
//! - `NOTIFY_QUEUE_CAPACITY` / `NOTIFY_WORKER_CONCURRENCY` /
//!   `NOTIFY_JOB_TIMEOUT_SECONDS` - background notification tuning
//! - `LISTEN` - bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result, bail};
use std::env;
use std::time::Duration;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,

    /// Scheme used when building absolute URLs for local entries.
    pub site_protocol: String,
    /// Host (and optional port) this weblog is served from.
    pub site_domain: String,
    /// Human-readable site name sent to ping directories.
    pub site_name: String,
    /// Site-relative path of the entry index, reported to directories.
    pub blog_path: String,
    /// Site-relative path of the syndication feed, reported to directories.
    pub feed_path: String,

    /// XML-RPC endpoints of the ping directories to notify on publish.
    pub ping_directories: Vec<String>,
    /// When false, publish notifications skip the directory fan-out.
    pub save_ping_directories: bool,
    /// When false, publish notifications skip external-link pingbacks.
    pub save_ping_external_urls: bool,

    /// Timeout applied to each individual network fetch or RPC call.
    pub fetch_timeout: Duration,
    /// Character budget for generated pingback excerpts.
    pub pingback_content_length: usize,
    /// Spam checker backend name looked up in the registry at startup.
    pub spam_checker_backend: String,

    /// Bound of the notification job queue.
    pub notify_queue_capacity: usize,
    /// Maximum notification jobs executed concurrently by the worker.
    pub notify_worker_concurrency: usize,
    /// Overall deadline for one notification job (directory fan-out or
    /// external-link batch). Jobs exceeding it are abandoned and logged.
    pub notify_job_timeout: Duration,

    // ── PgPool settings ─────────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the site domain or required database
    /// configuration is missing, or if `SITE_PROTOCOL` is not http(s).
    pub fn from_env() -> Result<Self> {
        let database_url =
            Self::load_database_url().context("Failed to load database configuration")?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let site_protocol = env::var("SITE_PROTOCOL").unwrap_or_else(|_| "http".to_string());
        if site_protocol != "http" && site_protocol != "https" {
            bail!("SITE_PROTOCOL must be 'http' or 'https', got '{site_protocol}'");
        }

        let site_domain = env::var("SITE_DOMAIN").context("SITE_DOMAIN must be set")?;
        let site_name = env::var("SITE_NAME").unwrap_or_else(|_| site_domain.clone());
        let blog_path = env::var("BLOG_PATH").unwrap_or_else(|_| "/".to_string());
        let feed_path = env::var("FEED_PATH").unwrap_or_else(|_| "/feed/".to_string());

        let ping_directories: Vec<String> = env::var("PING_DIRECTORIES")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let save_ping_directories = env::var("SAVE_PING_DIRECTORIES")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(!ping_directories.is_empty());

        let save_ping_external_urls = env::var("SAVE_PING_EXTERNAL_URLS")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(true);

        let fetch_timeout = Duration::from_secs(
            env::var("FETCH_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        );

        let pingback_content_length = env::var("PINGBACK_CONTENT_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        let spam_checker_backend =
            env::var("SPAM_CHECKER_BACKEND").unwrap_or_else(|_| "permissive".to_string());

        let notify_queue_capacity = env::var("NOTIFY_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let notify_worker_concurrency = env::var("NOTIFY_WORKER_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let notify_job_timeout = Duration::from_secs(
            env::var("NOTIFY_JOB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        );

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_connect_timeout = env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            site_protocol,
            site_domain,
            site_name,
            blog_path,
            feed_path,
            ping_directories,
            save_ping_directories,
            save_ping_external_urls,
            fetch_timeout,
            pingback_content_length,
            spam_checker_backend,
            notify_queue_capacity,
            notify_worker_concurrency,
            notify_job_timeout,
            db_max_connections,
            db_connect_timeout,
        })
    }

    /// The site root, e.g. `http://blog.example.com`.
    pub fn site_url(&self) -> String {
        format!("{}://{}", self.site_protocol, self.site_domain)
    }

    /// Absolute URL of the entry index page.
    pub fn blog_url(&self) -> String {
        format!("{}{}", self.site_url(), self.blog_path)
    }

    /// Absolute URL of the syndication feed.
    pub fn feed_url(&self) -> String {
        format!("{}{}", self.site_url(), self.feed_path)
    }

    /// Loads database URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. Constructed from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`
    fn load_database_url() -> Result<String> {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Ok(url);
        }

        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let user =
            env::var("DB_USER").context("DB_USER must be set when DATABASE_URL is not provided")?;
        let password = env::var("DB_PASSWORD")
            .context("DB_PASSWORD must be set when DATABASE_URL is not provided")?;
        let name =
            env::var("DB_NAME").context("DB_NAME must be set when DATABASE_URL is not provided")?;

        Ok(format!("postgres://{user}:{password}@{host}:{port}/{name}"))
    }
}
