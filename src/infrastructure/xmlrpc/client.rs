//! Outbound XML-RPC client for directory pings and pingback calls.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::infrastructure::xmlrpc::codec::{
    RpcResponse, Value, build_method_call, parse_method_response,
};

/// Reply of a `weblogUpdates` directory ping.
#[derive(Debug, Clone)]
pub struct DirectoryReply {
    pub flerror: bool,
    pub message: String,
}

impl DirectoryReply {
    /// Interprets a directory reply value.
    ///
    /// Directories answer with a `{flerror, message}` struct; a bare string
    /// reply is treated as a successful message.
    fn from_value(value: &Value) -> Self {
        let flerror = match value.member("flerror") {
            Some(Value::Bool(b)) => *b,
            Some(Value::Int(i)) => *i != 0,
            _ => false,
        };
        let message = value
            .member("message")
            .map(Value::as_text)
            .unwrap_or_else(|| value.as_text());
        Self { flerror, message }
    }
}

/// Errors from one outbound RPC attempt.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("fault {code}: {message}")]
    Fault { code: i32, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Client role of the linkback protocols: `weblogUpdates` directory pings and
/// outbound `pingback.ping` calls.
///
/// Each call carries its own timeout; implementations must not share mutable
/// timeout state across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PingClient: Send + Sync {
    /// `weblogUpdates.extendedPing(siteName, siteURL, entryURL, feedURL, categories)`
    async fn extended_ping(
        &self,
        endpoint: &str,
        site_name: &str,
        site_url: &str,
        entry_url: &str,
        feed_url: &str,
        categories: &str,
    ) -> Result<DirectoryReply, RpcError>;

    /// `weblogUpdates.ping(siteName, siteURL, entryURL, categories)`
    async fn ping(
        &self,
        endpoint: &str,
        site_name: &str,
        site_url: &str,
        entry_url: &str,
        categories: &str,
    ) -> Result<DirectoryReply, RpcError>;

    /// `pingback.ping(sourceURI, targetURI)` against a discovered receiver.
    ///
    /// Returns the receiver's raw reply text; protocol faults surface as
    /// [`RpcError::Fault`].
    async fn pingback(
        &self,
        endpoint: &str,
        source: &str,
        target: &str,
    ) -> Result<String, RpcError>;
}

/// reqwest-backed XML-RPC client with an explicit per-call timeout.
pub struct XmlRpcPingClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl XmlRpcPingClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("linkback/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, timeout })
    }

    async fn call(
        &self,
        endpoint: &str,
        method: &str,
        params: &[&str],
    ) -> Result<Value, RpcError> {
        let body = build_method_call(method, params);
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Transport(format!("HTTP status {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        match parse_method_response(&text) {
            Ok(RpcResponse::Value(value)) => Ok(value),
            Ok(RpcResponse::Fault { code, message }) => Err(RpcError::Fault { code, message }),
            Err(e) => Err(RpcError::Malformed(e.to_string())),
        }
    }
}

#[async_trait]
impl PingClient for XmlRpcPingClient {
    async fn extended_ping(
        &self,
        endpoint: &str,
        site_name: &str,
        site_url: &str,
        entry_url: &str,
        feed_url: &str,
        categories: &str,
    ) -> Result<DirectoryReply, RpcError> {
        let value = self
            .call(
                endpoint,
                "weblogUpdates.extendedPing",
                &[site_name, site_url, entry_url, feed_url, categories],
            )
            .await?;
        Ok(DirectoryReply::from_value(&value))
    }

    async fn ping(
        &self,
        endpoint: &str,
        site_name: &str,
        site_url: &str,
        entry_url: &str,
        categories: &str,
    ) -> Result<DirectoryReply, RpcError> {
        let value = self
            .call(
                endpoint,
                "weblogUpdates.ping",
                &[site_name, site_url, entry_url, categories],
            )
            .await?;
        Ok(DirectoryReply::from_value(&value))
    }

    async fn pingback(
        &self,
        endpoint: &str,
        source: &str,
        target: &str,
    ) -> Result<String, RpcError> {
        let value = self
            .call(endpoint, "pingback.ping", &[source, target])
            .await?;
        Ok(value.as_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_reply_from_struct() {
        let value = Value::Struct(vec![
            ("flerror".to_string(), Value::Bool(true)),
            ("message".to_string(), Value::String("Too many pings".to_string())),
        ]);
        let reply = DirectoryReply::from_value(&value);
        assert!(reply.flerror);
        assert_eq!(reply.message, "Too many pings");
    }

    #[test]
    fn test_directory_reply_from_bare_string() {
        let value = Value::String("Thanks!".to_string());
        let reply = DirectoryReply::from_value(&value);
        assert!(!reply.flerror);
        assert_eq!(reply.message, "Thanks!");
    }

    #[test]
    fn test_directory_reply_int_flerror() {
        let value = Value::Struct(vec![("flerror".to_string(), Value::Int(1))]);
        assert!(DirectoryReply::from_value(&value).flerror);
    }
}
