//! Error classification logic
//!
//! 3Play signals failure inside the response body, not through the HTTP status:
//! the legacy API answers `200 OK` with `{"iserror": true, ...}`, and v3 wraps every
//! answer in `{"code", "data", "error"}`. Classification therefore has to run on the
//! raw bytes before any attempt to decode a success record.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{Error, Result};

/// Key the legacy API uses for credential failures.
const AUTHENTICATION_KEY: &str = "authentication";
/// Key the legacy API uses for missing resources.
const NOT_FOUND_KEY: &str = "not_found";

/// Outcome of inspecting a legacy error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedError {
    Unauthorized,
    NotFound,
    /// Any other flagged error. Carries the full raw body for diagnostics.
    Generic(String),
}

/// Legacy error envelope: `{"iserror": bool, "errors": {"<kind>": "<message>"}}`.
#[derive(Debug, Deserialize)]
struct LegacyEnvelope {
    #[serde(default, rename = "iserror")]
    is_error: bool,
    #[serde(default)]
    errors: serde_json::Value,
}

/// Classify a legacy response body.
///
/// Returns `None` when the body is not an envelope at all (captions, plain-text ids,
/// JSON arrays) or when `iserror` is false or missing.
pub fn classify_legacy(body: &[u8]) -> Option<ClassifiedError> {
    let envelope: LegacyEnvelope = serde_json::from_slice(body).ok()?;
    if !envelope.is_error {
        return None;
    }

    if envelope.errors.get(AUTHENTICATION_KEY).is_some() {
        Some(ClassifiedError::Unauthorized)
    } else if envelope.errors.get(NOT_FOUND_KEY).is_some() {
        Some(ClassifiedError::NotFound)
    } else {
        Some(ClassifiedError::Generic(
            String::from_utf8_lossy(body).into_owned(),
        ))
    }
}

/// Fail with the classified error if the legacy body is an error envelope.
pub(crate) fn check_legacy(body: &[u8]) -> Result<()> {
    match classify_legacy(body) {
        Some(classified) => {
            tracing::debug!(kind = ?classified, "legacy API returned an error envelope");
            Err(classified.into())
        }
        None => Ok(()),
    }
}

/// Error body of a v3 envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct V3ErrorBody {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

/// v3 envelope: `{"code": int, "data": {...}, "error": {"type": str, "message": str}}`.
#[derive(Debug, Deserialize)]
struct V3Envelope {
    code: i64,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    error: Option<V3ErrorBody>,
}

const V3_SUCCESS: i64 = 200;

/// Unwrap a v3 envelope into its `data` payload.
///
/// `code != 200` is an error regardless of the HTTP status the body travelled with.
/// v3 gateways can still answer with the legacy `iserror` envelope, so that is
/// classified first.
pub fn unwrap_v3<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    check_legacy(body)?;
    let envelope: V3Envelope =
        serde_json::from_slice(body).map_err(|e| Error::decode(e, body))?;

    if envelope.code != V3_SUCCESS {
        let error = envelope.error.unwrap_or_default();
        tracing::debug!(
            code = envelope.code,
            kind = %error.kind,
            "v3 API returned an error envelope"
        );
        return Err(Error::Remote {
            code: envelope.code,
            kind: error.kind,
            message: error.message,
        });
    }

    serde_json::from_value(envelope.data).map_err(|e| Error::decode(e, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_error_for_empty_object() {
        assert_eq!(classify_legacy(b"{}"), None);
    }

    #[test]
    fn test_no_error_for_non_json_bodies() {
        assert_eq!(classify_legacy(b"1686514"), None);
        assert_eq!(classify_legacy(b"1 00:00:01,000 --> 00:00:02,000"), None);
        assert_eq!(classify_legacy(br#"["physics","robots"]"#), None);
    }

    #[test]
    fn test_iserror_false_is_not_an_error() {
        let body = br#"{"iserror":false,"errors":{"authentication":"x"}}"#;
        assert_eq!(classify_legacy(body), None);
    }

    #[test]
    fn test_authentication_is_unauthorized() {
        let body = br#"{"iserror":true,"errors":{"authentication":"x"}}"#;
        assert_eq!(classify_legacy(body), Some(ClassifiedError::Unauthorized));
    }

    #[test]
    fn test_not_found_regardless_of_field_order() {
        let body = br#"{"errors":{"not_found":"x"},"iserror":true}"#;
        assert_eq!(classify_legacy(body), Some(ClassifiedError::NotFound));
    }

    #[test]
    fn test_other_kind_is_generic_with_raw_body() {
        let raw = r#"{"iserror":true,"errors":{"internal_error":"boom"}}"#;
        match classify_legacy(raw.as_bytes()) {
            Some(ClassifiedError::Generic(body)) => assert_eq!(body, raw),
            other => panic!("expected generic error, got {:?}", other),
        }
        let err: Error = classify_legacy(raw.as_bytes()).unwrap().into();
        assert!(err.to_string().contains(raw));
    }

    #[test]
    fn test_iserror_without_errors_map_is_generic() {
        let raw = r#"{"iserror":true}"#;
        assert_eq!(
            classify_legacy(raw.as_bytes()),
            Some(ClassifiedError::Generic(raw.to_string()))
        );
    }

    #[test]
    fn test_unwrap_v3_success() {
        #[derive(Deserialize)]
        struct Data {
            id: u64,
        }
        let data: Data = unwrap_v3(br#"{"code":200,"data":{"id":3628518}}"#).unwrap();
        assert_eq!(data.id, 3628518);
    }

    #[test]
    fn test_unwrap_v3_error_message_format() {
        let body = br#"{"code":404,"error":{"type":"not_found_error","message":"Not found"}}"#;
        let err = unwrap_v3::<serde_json::Value>(body).unwrap_err();
        assert_eq!(err.to_string(), "404: not_found_error-Not found");
    }

    #[test]
    fn test_unwrap_v3_classifies_legacy_envelopes() {
        let err = unwrap_v3::<serde_json::Value>(
            br#"{"iserror":true,"errors":{"authentication":"bad key"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));

        let err =
            unwrap_v3::<serde_json::Value>(br#"{"iserror":true,"errors":{"not_found":"x"}}"#)
                .unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[test]
    fn test_unwrap_v3_rejects_malformed_body() {
        let err = unwrap_v3::<serde_json::Value>(b"<html>").unwrap_err();
        assert!(matches!(err, Error::Decode { ref raw, .. } if raw == "<html>"));
    }
}
