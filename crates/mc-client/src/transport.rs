//! HTTP transport seam.
//!
//! The client only ever issues `GET` requests against a base URL, so the
//! transport contract is a single method. [`HttpTransport`] performs real
//! requests with `reqwest`; [`mock::MockTransport`] scripts responses for
//! tests.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// A fully buffered response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Network-level failures. No structured body is available.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request could not be sent or the response could not be read
    #[error("Falha de conexão com o servidor: {0}")]
    Request(#[from] reqwest::Error),

    /// Transport refused the request without touching the network
    #[error("{0}")]
    Unavailable(String),
}

/// Issues `GET` requests relative to an API base URL.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `path_and_query` (e.g. `/deputados?page=2`).
    async fn get(&self, path_and_query: &str) -> Result<RawResponse, TransportError>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` (e.g. `http://localhost:8080/api/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a transport with a preconfigured `reqwest::Client` (timeouts, proxies).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path_and_query: &str) -> Result<RawResponse, TransportError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        let body = match response.bytes().await {
            Ok(body) => body,
            // The error extractor falls back to the status line on an empty body
            Err(err) if !status.is_success() => {
                tracing::warn!(%url, status = status.as_u16(), error = %err, "failed to read error body");
                Bytes::new()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Scripted transport for unit tests.

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use bytes::Bytes;
    use serde_json::Value;

    use super::{RawResponse, Transport, TransportError};

    #[derive(Clone)]
    enum Reply {
        Respond {
            status: u16,
            body: Bytes,
            delay: Option<Duration>,
        },
        Fail(String),
    }

    /// Transport that answers from a table keyed by exact path-and-query.
    ///
    /// Unknown paths answer 404 with an empty body. Every call is recorded,
    /// including unknown paths.
    pub struct MockTransport {
        replies: Mutex<HashMap<String, Reply>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                replies: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Answer `path` with `status` and a JSON body.
        pub fn respond_json(&self, path: &str, status: u16, body: &Value) {
            self.insert(
                path,
                Reply::Respond {
                    status,
                    body: Bytes::from(body.to_string()),
                    delay: None,
                },
            );
        }

        /// Answer `path` with a raw body.
        pub fn respond_raw(&self, path: &str, status: u16, body: &'static str) {
            self.insert(
                path,
                Reply::Respond {
                    status,
                    body: Bytes::from_static(body.as_bytes()),
                    delay: None,
                },
            );
        }

        /// Answer `path` with a JSON body after sleeping for `delay`.
        pub fn respond_json_after(&self, path: &str, status: u16, body: &Value, delay: Duration) {
            self.insert(
                path,
                Reply::Respond {
                    status,
                    body: Bytes::from(body.to_string()),
                    delay: Some(delay),
                },
            );
        }

        /// Fail requests to `path` as if the network were down.
        pub fn fail(&self, path: &str, message: &str) {
            self.insert(path, Reply::Fail(message.to_string()));
        }

        /// All paths requested so far, in order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn insert(&self, path: &str, reply: Reply) {
            self.replies.lock().unwrap().insert(path.to_string(), reply);
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, path_and_query: &str) -> Result<RawResponse, TransportError> {
            self.calls.lock().unwrap().push(path_and_query.to_string());
            let reply = self.replies.lock().unwrap().get(path_and_query).cloned();

            match reply {
                Some(Reply::Respond {
                    status,
                    body,
                    delay,
                }) => {
                    if let Some(delay) = delay {
                        tokio::time::sleep(delay).await;
                    }
                    Ok(RawResponse { status, body })
                }
                Some(Reply::Fail(message)) => Err(TransportError::Unavailable(message)),
                None => Ok(RawResponse {
                    status: 404,
                    body: Bytes::new(),
                }),
            }
        }
    }
}
