pub mod entry_repository;
pub mod linkback_repository;

pub use entry_repository::EntryRepository;
pub use linkback_repository::LinkbackRepository;

#[cfg(test)]
pub use entry_repository::MockEntryRepository;
#[cfg(test)]
pub use linkback_repository::MockLinkbackRepository;
