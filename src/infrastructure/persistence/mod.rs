pub mod pg_entry_repository;
pub mod pg_linkback_repository;

pub use pg_entry_repository::PgEntryRepository;
pub use pg_linkback_repository::PgLinkbackRepository;
