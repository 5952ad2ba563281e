//! Repository trait for linkback record persistence.

use crate::domain::entities::{Linkback, LinkbackKind, NewLinkback};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence for verified backlinks.
///
/// The store must provide an atomic create-if-absent keyed by
/// `(entry_id, source_url, site)`; concurrent duplicate registrations must
/// converge on a single row.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkbackRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkbackRepository: Send + Sync {
    /// Creates a linkback unless one already exists for the same
    /// `(entry_id, source_url, site)`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Linkback))` when a new record was created
    /// - `Ok(None)` when the record already existed (terminal, not an error)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_if_absent(&self, new: NewLinkback) -> Result<Option<Linkback>, AppError>;

    /// Lists the source URLs of an entry's linkbacks of the given kind, in
    /// persistence order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_sources(
        &self,
        entry_id: i64,
        kind: LinkbackKind,
    ) -> Result<Vec<String>, AppError>;
}
