//! API generations.
//!
//! 3Play exposes two incompatible wire contracts. Each one is a strategy behind
//! [`ApiGeneration`], so the endpoint builder and the clients are written once and
//! the differences (key parameter name, secret, path prefix, envelope, retry
//! default) live in exactly one place per generation.

use serde::de::DeserializeOwned;

use super::error_classification::{check_legacy, unwrap_v3};
use crate::transport::RetryPolicy;
use crate::{Error, ErrorContext, Result};

/// Strategy describing one generation of the 3Play API.
pub trait ApiGeneration: Send + Sync + 'static {
    /// Short name used in logs.
    const NAME: &'static str;

    /// Name of the API key parameter (`apikey` vs `api_key`).
    const KEY_PARAM: &'static str;

    /// Path segments prepended to every api-host endpoint.
    const PATH_PREFIX: &'static [&'static str];

    /// Retry policy used unless the builder overrides it.
    fn default_retry_policy() -> RetryPolicy;

    fn api_key(&self) -> &str;

    /// Key to send with a call, honoring a per-call override where the generation allows one.
    fn effective_key<'a>(&'a self, key_override: Option<&'a str>) -> &'a str;

    /// Credential fields for a mutating form request.
    fn form_credentials(&self, key_override: Option<&str>) -> Result<Vec<(String, String)>>;

    /// Classify the body and decode the success payload.
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T>;
}

/// Legacy generation: `apikey` + `api_secret_key`, `{"iserror", "errors"}` envelope.
#[derive(Clone)]
pub struct Legacy {
    api_key: String,
    api_secret: Option<String>,
}

impl Legacy {
    pub fn new(api_key: impl Into<String>, api_secret: Option<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn has_secret(&self) -> bool {
        self.api_secret.is_some()
    }
}

impl std::fmt::Debug for Legacy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Legacy")
            .field("api_key", &"<redacted>")
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiGeneration for Legacy {
    const NAME: &'static str = "legacy";
    const KEY_PARAM: &'static str = "apikey";
    const PATH_PREFIX: &'static [&'static str] = &[];

    fn default_retry_policy() -> RetryPolicy {
        RetryPolicy::none()
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    // The legacy API has no per-call key override.
    fn effective_key<'a>(&'a self, _key_override: Option<&'a str>) -> &'a str {
        &self.api_key
    }

    fn form_credentials(&self, _key_override: Option<&str>) -> Result<Vec<(String, String)>> {
        let secret = self.api_secret.as_ref().ok_or_else(|| {
            Error::configuration_with_context(
                "API secret is required for mutating legacy operations",
                ErrorContext::new()
                    .with_field_path("api_secret")
                    .with_source("legacy_client"),
            )
        })?;
        Ok(vec![
            ("api_secret_key".to_string(), secret.clone()),
            (Self::KEY_PARAM.to_string(), self.api_key.clone()),
        ])
    }

    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        check_legacy(body)?;
        serde_json::from_slice(body).map_err(|e| Error::decode(e, body))
    }
}

/// v3 generation: `api_key` only, `/v3` paths, `{"code", "data", "error"}` envelope.
#[derive(Clone)]
pub struct V3 {
    api_key: String,
}

impl V3 {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for V3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V3").field("api_key", &"<redacted>").finish()
    }
}

impl ApiGeneration for V3 {
    const NAME: &'static str = "v3";
    const KEY_PARAM: &'static str = "api_key";
    const PATH_PREFIX: &'static [&'static str] = &["v3"];

    fn default_retry_policy() -> RetryPolicy {
        RetryPolicy::exponential_jitter()
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn effective_key<'a>(&'a self, key_override: Option<&'a str>) -> &'a str {
        key_override
            .filter(|k| !k.is_empty())
            .unwrap_or(&self.api_key)
    }

    fn form_credentials(&self, key_override: Option<&str>) -> Result<Vec<(String, String)>> {
        Ok(vec![(
            Self::KEY_PARAM.to_string(),
            self.effective_key(key_override).to_string(),
        )])
    }

    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        unwrap_v3(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_form_credentials_require_secret() {
        let legacy = Legacy::new("api-key", None);
        assert!(matches!(
            legacy.form_credentials(None),
            Err(Error::Configuration { .. })
        ));

        let legacy = Legacy::new("api-key", Some("secret-key".into()));
        let creds = legacy.form_credentials(Some("ignored")).unwrap();
        assert_eq!(
            creds,
            vec![
                ("api_secret_key".to_string(), "secret-key".to_string()),
                ("apikey".to_string(), "api-key".to_string()),
            ]
        );
    }

    #[test]
    fn test_v3_key_override() {
        let v3 = V3::new("api-key");
        assert_eq!(v3.effective_key(None), "api-key");
        assert_eq!(v3.effective_key(Some("")), "api-key");
        assert_eq!(v3.effective_key(Some("custom-key")), "custom-key");
        assert_eq!(
            v3.form_credentials(Some("custom-key")).unwrap(),
            vec![("api_key".to_string(), "custom-key".to_string())]
        );
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let legacy = Legacy::new("api-key", Some("secret-key".into()));
        let printed = format!("{:?}", legacy);
        assert!(!printed.contains("api-key"));
        assert!(!printed.contains("secret-key"));
    }

    #[test]
    fn test_legacy_decode_classifies_before_decoding() {
        let legacy = Legacy::new("api-key", None);
        let err = legacy
            .decode::<Vec<String>>(br#"{"iserror":true,"errors":{"authentication":"x"}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));

        let err = legacy.decode::<Vec<String>>(b"not json").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
