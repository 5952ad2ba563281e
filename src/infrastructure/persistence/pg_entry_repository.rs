//! PostgreSQL implementation of entry repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Entry;
use crate::domain::repositories::EntryRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct EntryRow {
    id: i64,
    title: String,
    path: String,
    published: bool,
    pingback_enabled: bool,
    trackback_enabled: bool,
    pingback_count: i64,
    trackback_count: i64,
    created_at: DateTime<Utc>,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Entry {
            id: row.id,
            title: row.title,
            path: row.path,
            published: row.published,
            pingback_enabled: row.pingback_enabled,
            trackback_enabled: row.trackback_enabled,
            pingback_count: row.pingback_count,
            trackback_count: row.trackback_count,
            created_at: row.created_at,
        }
    }
}

const ENTRY_COLUMNS: &str = "id, title, path, published, pingback_enabled, trackback_enabled, \
     pingback_count, trackback_count, created_at";

/// PostgreSQL repository for entry lookups and counter updates.
pub struct PgEntryRepository {
    pool: Arc<PgPool>,
}

impl PgEntryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository for PgEntryRepository {
    async fn find_published_by_path(&self, path: &str) -> Result<Option<Entry>, AppError> {
        let row: Option<EntryRow> = sqlx::query_as(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE path = $1 AND published"
        ))
        .bind(path)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Entry::from))
    }

    async fn find_published_by_id(&self, id: i64) -> Result<Option<Entry>, AppError> {
        let row: Option<EntryRow> = sqlx::query_as(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE id = $1 AND published"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Entry::from))
    }

    async fn increment_pingback_count(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE entries SET pingback_count = pingback_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }

    async fn increment_trackback_count(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE entries SET trackback_count = trackback_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
