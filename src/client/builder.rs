use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::client::core::Client;
use crate::client::endpoint::Hosts;
use crate::client::generation::{ApiGeneration, Legacy, V3};
use crate::config::ClientConfig;
use crate::transport::{HttpTransport, ReqwestTransport, RetryPolicy, RetryingTransport};
use crate::{Error, ErrorContext, Result};

/// Builder for creating clients with custom configuration.
///
/// Explicit calls win over a supplied [`ClientConfig`], which wins over the
/// `THREEPLAY_*` environment.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    retry_policy: Option<RetryPolicy>,
    transport: Option<Arc<dyn HttpTransport>>,
    use_env: bool,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            use_env: true,
            ..Default::default()
        }
    }

    /// Start from an existing configuration. The environment still fills the gaps.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            use_env: true,
            ..Default::default()
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Secret for mutating legacy operations (upload, update, tags).
    pub fn api_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.config.api_secret = Some(api_secret.into());
        self
    }

    /// Override the api host base URL (primarily for testing with mock servers).
    pub fn api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.api_base_url = Some(base_url.into());
        self
    }

    /// Override the static host base URL (primarily for testing with mock servers).
    pub fn static_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.static_base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = Some(timeout.as_secs().max(1));
        self
    }

    pub fn proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(proxy_url.into());
        self
    }

    /// Total attempts per request, keeping the generation's backoff delays.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = Some(max_attempts.max(1));
        self
    }

    /// Replace the generation's retry policy entirely.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Plug in a custom transport. Timeout and proxy settings are then ignored;
    /// retries still apply.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Do not read `THREEPLAY_*` variables.
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    pub fn build_legacy(self) -> Result<Client<Legacy>> {
        self.build_with(|config, api_key| Legacy::new(api_key, config.api_secret.clone()))
    }

    pub fn build_v3(self) -> Result<Client<V3>> {
        self.build_with(|_, api_key| V3::new(api_key))
    }

    fn build_with<G: ApiGeneration>(
        self,
        make: impl FnOnce(&ClientConfig, String) -> G,
    ) -> Result<Client<G>> {
        let config = if self.use_env {
            self.config.merge(ClientConfig::from_env())
        } else {
            self.config
        };

        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "API key is required",
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_details(format!("set it on the builder or via {}", crate::config::ENV_API_KEY))
                        .with_source("client_builder"),
                )
            })?;

        let hosts = Hosts::with_overrides(
            config.api_base_url.as_deref(),
            config.static_base_url.as_deref(),
        )?;

        let mut policy = self.retry_policy.unwrap_or_else(G::default_retry_policy);
        if let Some(max_attempts) = config.max_attempts {
            policy = policy.with_max_attempts(max_attempts);
        }

        let inner: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::from_config(&config)?),
        };
        let transport: Arc<dyn HttpTransport> = if policy.max_attempts > 1 {
            Arc::new(RetryingTransport::new(inner, policy.clone()))
        } else {
            inner
        };

        let generation = make(&config, api_key);
        info!(
            generation = G::NAME,
            api_host = hosts.api.as_str(),
            static_host = hosts.static_files.as_str(),
            max_attempts = policy.max_attempts,
            "3play client ready"
        );
        Ok(Client::new(generation, hosts, transport))
    }
}
