//! HTTP transport abstraction.
//!
//! The dispatcher talks to the network through the [`Transport`] trait
//! rather than calling `reqwest` directly. Production code uses
//! [`HttpTransport`]; tests inject a [`MockTransport`] with canned
//! replies and inspect the calls it recorded.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

use crate::endpoint::Method;

/// A fully assembled outgoing request.
#[derive(Debug, Clone)]
pub struct HttpCall {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpCall {
    pub(crate) fn get(url: String) -> Self {
        Self { method: Method::Get, url, headers: Vec::new(), body: None }
    }

    pub(crate) fn post(url: String, api_key: String, signature: String, body: String) -> Self {
        Self {
            method: Method::Post,
            url,
            headers: vec![("API-Key", api_key), ("API-Sign", signature)],
            body: Some(body),
        }
    }

    /// Look up a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response as seen on the wire, before envelope decoding.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to complete an HTTP exchange at all. Responses with error
/// status codes are not transport errors; they come back as replies.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Other(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, call: HttpCall) -> Result<HttpReply, TransportError>;
}

/// Production transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, call: HttpCall) -> Result<HttpReply, TransportError> {
        let mut request = match call.method {
            Method::Get => self.client.get(&call.url),
            Method::Post => self.client.post(&call.url),
        };
        for (name, value) in &call.headers {
            request = request.header(*name, value);
        }
        if let Some(body) = call.body {
            request = request
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body);
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                TransportError::Timeout
            } else if err.is_connect() {
                TransportError::Connect(err.to_string())
            } else {
                TransportError::Other(err.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Other(err.to_string()))?;
        Ok(HttpReply { status, body })
    }
}

/// Scripted transport for tests. Replies are consumed in FIFO order;
/// once the script runs dry every call gets an empty success envelope.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
    calls: Mutex<Vec<HttpCall>>,
    delay: Mutex<Option<Duration>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_reply(&self, status: u16, body: impl Into<String>) {
        self.replies
            .lock()
            .push_back(Ok(HttpReply { status, body: body.into() }));
    }

    pub fn push_error(&self, error: TransportError) {
        self.replies.lock().push_back(Err(error));
    }

    /// Make every subsequent call stall before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<HttpCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, call: HttpCall) -> Result<HttpReply, TransportError> {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().push(call);
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpReply::ok(r#"{"error":[],"result":{}}"#)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_replays_replies_in_order() {
        let transport = MockTransport::new();
        transport.push_reply(200, "first");
        transport.push_reply(502, "second");

        let a = transport.execute(HttpCall::get("http://x/a".into())).await.unwrap();
        let b = transport.execute(HttpCall::get("http://x/b".into())).await.unwrap();

        assert_eq!(a.body, "first");
        assert!(a.is_success());
        assert_eq!(b.status, 502);
        assert!(!b.is_success());
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn mock_records_headers_and_body() {
        let transport = MockTransport::new();
        let call = HttpCall::post(
            "http://x/0/private/Balance".into(),
            "key".into(),
            "sig".into(),
            "nonce=1".into(),
        );
        transport.execute(call).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].header("api-key"), Some("key"));
        assert_eq!(calls[0].header("API-Sign"), Some("sig"));
        assert_eq!(calls[0].body.as_deref(), Some("nonce=1"));
    }

    #[tokio::test]
    async fn mock_surfaces_scripted_errors() {
        let transport = MockTransport::new();
        transport.push_error(TransportError::Timeout);

        let err = transport
            .execute(HttpCall::get("http://x".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Timeout));
    }
}
