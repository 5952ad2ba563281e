//! Built-in spam checker backends.

use async_trait::async_trait;

use super::SpamChecker;

/// Default backend: accepts everything.
pub struct Permissive;

#[async_trait]
impl SpamChecker for Permissive {
    async fn is_spam(&self, _source_url: &str, _title: &str, _excerpt: &str) -> bool {
        false
    }
}

/// Rejects everything. Useful for closing a site to linkbacks without
/// disabling the endpoints.
pub struct AllIsSpam;

#[async_trait]
impl SpamChecker for AllIsSpam {
    async fn is_spam(&self, _source_url: &str, _title: &str, _excerpt: &str) -> bool {
        true
    }
}

/// Flags excerpts with fewer words than a minimum; drive-by spam tends to
/// carry no real surrounding text.
pub struct LongEnough {
    min_words: usize,
}

impl Default for LongEnough {
    fn default() -> Self {
        Self { min_words: 4 }
    }
}

#[async_trait]
impl SpamChecker for LongEnough {
    async fn is_spam(&self, _source_url: &str, _title: &str, excerpt: &str) -> bool {
        excerpt.split_whitespace().count() < self.min_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_long_enough_flags_short_excerpts() {
        let checker = LongEnough::default();
        assert!(checker.is_spam("http://a.example/", "t", "too short").await);
        assert!(
            !checker
                .is_spam("http://a.example/", "t", "this excerpt has enough words")
                .await
        );
    }
}
