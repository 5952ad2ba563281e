//! Spam checking backends for inbound linkbacks.
//!
//! Backends implement one capability interface and are selected by name at
//! startup. An unknown name logs a warning and falls back to the permissive
//! default instead of failing the service.

pub mod backends;

use async_trait::async_trait;
use std::sync::Arc;

use backends::{AllIsSpam, LongEnough, Permissive};

/// Capability interface for spam checking an inbound linkback claim.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpamChecker: Send + Sync {
    /// Returns true when the claim should be rejected as spam.
    async fn is_spam(&self, source_url: &str, title: &str, excerpt: &str) -> bool;
}

/// Resolves a spam checker backend by registry name.
///
/// Known backends: `permissive` (default, never flags), `all_is_spam`,
/// `long_enough`. Unknown names warn and fall back to `permissive`.
pub fn for_backend(name: &str) -> Arc<dyn SpamChecker> {
    match name {
        "permissive" => Arc::new(Permissive),
        "all_is_spam" => Arc::new(AllIsSpam),
        "long_enough" => Arc::new(LongEnough::default()),
        other => {
            tracing::warn!(
                backend = other,
                "unknown spam checker backend, falling back to 'permissive'"
            );
            Arc::new(Permissive)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_permissive_never_flags() {
        let checker = for_backend("permissive");
        assert!(!checker.is_spam("http://spam.example/", "", "").await);
    }

    #[tokio::test]
    async fn test_all_is_spam_always_flags() {
        let checker = for_backend("all_is_spam");
        assert!(checker.is_spam("http://a.example/", "t", "good words here").await);
    }

    #[tokio::test]
    async fn test_unknown_backend_falls_back_to_permissive() {
        let checker = for_backend("does-not-exist");
        assert!(!checker.is_spam("http://a.example/", "t", "e").await);
    }
}
