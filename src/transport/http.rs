use super::{FormFields, HttpTransport, TransportError, TransportResponse};
use crate::config::ClientConfig;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::Proxy;
use std::time::Duration;
use url::Url;

/// Request timeout applied to every attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`HttpTransport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Transport with the default 10 second timeout and no proxy.
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT, None)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let timeout = config
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self::with_options(timeout, config.proxy_url.as_deref())
    }

    pub fn with_options(timeout: Duration, proxy_url: Option<&str>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(timeout);

        if let Some(proxy_url) = proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_source("transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client })
    }

    /// Wrap an already configured client (custom TLS roots, pools, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read(response: reqwest::Response) -> std::result::Result<TransportResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> std::result::Result<TransportResponse, TransportError> {
        let response = self.client.get(url.clone()).send().await?;
        Self::read(response).await
    }

    async fn post_form(
        &self,
        url: &Url,
        form: &FormFields,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let response = self.client.post(url.clone()).form(form).send().await?;
        Self::read(response).await
    }

    async fn put_form(
        &self,
        url: &Url,
        form: &FormFields,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let response = self.client.put(url.clone()).form(form).send().await?;
        Self::read(response).await
    }
}
