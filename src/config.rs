//! 客户端配置：从环境变量或 YAML 文件加载凭据、主机与超时设置。
//!
//! Client configuration.
//!
//! Values come from three places, highest priority first: explicit builder calls,
//! a YAML document, and `THREEPLAY_*` environment variables.
//!
//! ```yaml
//! api_key: your-api-key
//! api_secret: your-api-secret
//! timeout_secs: 20
//! max_attempts: 3
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::{Error, ErrorContext, Result};

pub const ENV_API_KEY: &str = "THREEPLAY_API_KEY";
pub const ENV_API_SECRET: &str = "THREEPLAY_API_SECRET";
pub const ENV_API_BASE_URL: &str = "THREEPLAY_API_BASE_URL";
pub const ENV_STATIC_BASE_URL: &str = "THREEPLAY_STATIC_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "THREEPLAY_HTTP_TIMEOUT_SECS";
pub const ENV_MAX_ATTEMPTS: &str = "THREEPLAY_MAX_ATTEMPTS";
pub const ENV_PROXY_URL: &str = "THREEPLAY_PROXY_URL";

/// Everything needed to build a client besides the transport.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub static_base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("static_base_url", &self.static_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `THREEPLAY_*` variables. Unset, empty and unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            api_key: text(ENV_API_KEY),
            api_secret: text(ENV_API_SECRET),
            api_base_url: text(ENV_API_BASE_URL),
            static_base_url: text(ENV_STATIC_BASE_URL),
            timeout_secs: text(ENV_TIMEOUT_SECS).and_then(|s| s.trim().parse::<u64>().ok()),
            max_attempts: text(ENV_MAX_ATTEMPTS).and_then(|s| s.trim().parse::<u32>().ok()),
            proxy_url: text(ENV_PROXY_URL),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid client configuration: {}", e),
                ErrorContext::new().with_source("config"),
            )
        })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            Error::Configuration { message, context } => Error::Configuration {
                message,
                context: context.with_details(path.display().to_string()),
            },
            other => other,
        })
    }

    /// Fill every unset field from `fallback`.
    pub fn merge(self, fallback: ClientConfig) -> Self {
        Self {
            api_key: self.api_key.or(fallback.api_key),
            api_secret: self.api_secret.or(fallback.api_secret),
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            static_base_url: self.static_base_url.or(fallback.static_base_url),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
            max_attempts: self.max_attempts.or(fallback.max_attempts),
            proxy_url: self.proxy_url.or(fallback.proxy_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup_ignores_empty_and_garbage() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_KEY, "api-key"),
            (ENV_API_SECRET, "  "),
            (ENV_TIMEOUT_SECS, "abc"),
            (ENV_MAX_ATTEMPTS, " 3 "),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_key.as_deref(), Some("api-key"));
        assert_eq!(config.api_secret, None);
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.max_attempts, Some(3));
    }

    #[test]
    fn test_yaml_and_merge() {
        let yaml = ClientConfig::from_yaml_str("api_key: from-yaml\ntimeout_secs: 20\n").unwrap();
        let env = ClientConfig {
            api_key: Some("from-env".into()),
            api_secret: Some("secret".into()),
            ..Default::default()
        };
        let merged = yaml.merge(env);
        assert_eq!(merged.api_key.as_deref(), Some("from-yaml"));
        assert_eq!(merged.api_secret.as_deref(), Some("secret"));
        assert_eq!(merged.timeout_secs, Some(20));
    }

    #[test]
    fn test_unknown_yaml_keys_are_rejected() {
        let err = ClientConfig::from_yaml_str("apikey: typo\n").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = ClientConfig {
            api_key: Some("api-key".into()),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("api-key"));
    }
}
