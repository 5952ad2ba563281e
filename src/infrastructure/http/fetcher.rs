//! HTTP resource fetching with explicit per-call timeouts.

use async_trait::async_trait;
use std::time::Duration;

/// A fetched remote resource. Ephemeral: created per fetch, never persisted.
#[derive(Debug, Clone)]
pub struct Resource {
    /// Final URL after redirects, used to resolve relative receiver URLs.
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    /// Value of the `X-Pingback` response header, if present.
    pub x_pingback: Option<String>,
    pub body: String,
}

impl Resource {
    /// True when the response carries a `text/*` content type.
    ///
    /// Binary resources cannot embed a pingback link tag and are skipped
    /// during discovery.
    pub fn is_text(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.trim_start().starts_with("text/"))
    }
}

/// Errors from fetching a remote resource.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),
}

/// Fetches remote documents for discovery and source verification.
///
/// Every call takes an explicit timeout so one unreachable resource cannot
/// stall a batch; implementations must not rely on process-wide timeouts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Resource, FetchError>;
}

/// reqwest-backed fetcher.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("linkback/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Resource, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header("content-type");
        let x_pingback = header("x-pingback");

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Resource {
            url: final_url,
            status: status.as_u16(),
            content_type,
            x_pingback,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(content_type: Option<&str>) -> Resource {
        Resource {
            url: "http://example.com/".to_string(),
            status: 200,
            content_type: content_type.map(str::to_string),
            x_pingback: None,
            body: String::new(),
        }
    }

    #[test]
    fn test_is_text() {
        assert!(resource(Some("text/html; charset=utf-8")).is_text());
        assert!(resource(Some("text/plain")).is_text());
        assert!(!resource(Some("image/png")).is_text());
        assert!(!resource(Some("application/xml")).is_text());
        assert!(!resource(None).is_text());
    }
}
