//! 传输层：可插拔的 HTTP 能力（GET / 表单 POST / 表单 PUT）及其超时与重试策略。
//!
//! Transport layer.
//!
//! Every operation talks to 3Play through the [`HttpTransport`] capability. The crate
//! ships a reqwest-backed implementation ([`ReqwestTransport`]) and a retry wrapper
//! ([`RetryingTransport`]); tests and embedding applications can supply their own.

mod http;
mod retry;

pub use http::ReqwestTransport;
pub use retry::{RetryPolicy, RetryingTransport};

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

/// Ordered `key=value` pairs of a form-encoded body.
pub type FormFields = Vec<(String, String)>;

/// Raw outcome of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Minimal HTTP capability consumed by the clients.
///
/// Implementations must not interpret the body: a `200` carrying an error envelope and
/// a `500` carrying a v3 error are both successful exchanges at this layer.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError>;

    async fn post_form(
        &self,
        url: &Url,
        form: &FormFields,
    ) -> Result<TransportResponse, TransportError>;

    async fn put_form(
        &self,
        url: &Url,
        form: &FormFields,
    ) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.is_request() || e.is_body()
            }
            TransportError::Connection(_) => true,
            TransportError::Other(_) => false,
        }
    }
}
