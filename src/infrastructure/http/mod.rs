pub mod fetcher;

pub use fetcher::{FetchError, ReqwestFetcher, Resource, ResourceFetcher};

#[cfg(test)]
pub use fetcher::MockResourceFetcher;
