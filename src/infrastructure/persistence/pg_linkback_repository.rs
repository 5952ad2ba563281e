//! PostgreSQL implementation of linkback repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::entities::{Linkback, LinkbackKind, NewLinkback};
use crate::domain::repositories::LinkbackRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct LinkbackRow {
    id: i64,
    entry_id: i64,
    source_url: String,
    title: String,
    excerpt: String,
    kind: String,
    site: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<LinkbackRow> for Linkback {
    type Error = AppError;

    fn try_from(row: LinkbackRow) -> Result<Self, AppError> {
        let kind = LinkbackKind::from_str(&row.kind)
            .map_err(|e| AppError::internal("Corrupt linkback row", json!({ "reason": e })))?;
        Ok(Linkback {
            id: row.id,
            entry_id: row.entry_id,
            source_url: row.source_url,
            title: row.title,
            excerpt: row.excerpt,
            kind,
            site: row.site,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL repository for linkback records.
///
/// The `(entry_id, source_url, site)` unique constraint plus
/// `ON CONFLICT DO NOTHING` gives the atomic create-if-absent the receiver
/// pipelines rely on under concurrent duplicate pings.
pub struct PgLinkbackRepository {
    pool: Arc<PgPool>,
}

impl PgLinkbackRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkbackRepository for PgLinkbackRepository {
    async fn create_if_absent(&self, new: NewLinkback) -> Result<Option<Linkback>, AppError> {
        let row: Option<LinkbackRow> = sqlx::query_as(
            r#"
            INSERT INTO linkbacks (entry_id, source_url, title, excerpt, kind, site)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (entry_id, source_url, site) DO NOTHING
            RETURNING id, entry_id, source_url, title, excerpt, kind, site, created_at
            "#,
        )
        .bind(new.entry_id)
        .bind(&new.source_url)
        .bind(&new.title)
        .bind(&new.excerpt)
        .bind(new.kind.as_str())
        .bind(&new.site)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Linkback::try_from).transpose()
    }

    async fn list_sources(
        &self,
        entry_id: i64,
        kind: LinkbackKind,
    ) -> Result<Vec<String>, AppError> {
        let sources: Vec<String> = sqlx::query_scalar(
            "SELECT source_url FROM linkbacks WHERE entry_id = $1 AND kind = $2 ORDER BY id",
        )
        .bind(entry_id)
        .bind(kind.as_str())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(sources)
    }
}
