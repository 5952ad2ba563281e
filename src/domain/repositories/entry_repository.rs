//! Repository trait for entry (link target) access.

use crate::domain::entities::Entry;
use crate::error::AppError;
use async_trait::async_trait;

/// Read and counter-update access to published entries.
///
/// The content store owns the entries; this service only resolves targets and
/// requests atomic counter increments.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEntryRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Resolves a site-relative path to a published entry.
    ///
    /// Returns `Ok(None)` when the path does not match any published entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_published_by_path(&self, path: &str) -> Result<Option<Entry>, AppError>;

    /// Looks up a published entry by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_published_by_id(&self, id: i64) -> Result<Option<Entry>, AppError>;

    /// Atomically increments the entry's pingback counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_pingback_count(&self, id: i64) -> Result<(), AppError>;

    /// Atomically increments the entry's trackback counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_trackback_count(&self, id: i64) -> Result<(), AppError>;
}
