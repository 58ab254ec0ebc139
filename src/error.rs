use crate::client::error_classification::ClassifiedError;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Option or configuration key that caused the error (e.g., "options.file_id", "config.api_key")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected value, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "endpoint_builder", "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for every 3Play operation.
///
/// The first group of variants is what the remote service told us; the second
/// group is what went wrong on our side of the wire.
#[derive(Debug, Error)]
pub enum Error {
    /// Legacy envelope carried an `authentication` error.
    #[error("401: API Error")]
    Unauthorized,

    /// Legacy envelope carried a `not_found` error.
    #[error("404: API Error")]
    NotFound,

    /// Legacy envelope flagged an error of any other kind. `raw` is the full body.
    #[error("api error: {raw}")]
    Api { raw: String },

    /// v3 envelope with `code != 200`.
    #[error("{code}: {kind}-{message}")]
    Remote {
        code: i64,
        kind: String,
        message: String,
    },

    /// The service answered, but did not confirm the tag was added.
    #[error("adding tag failed")]
    AddTagFailed,

    /// A plain-text response that does not have the expected shape.
    #[error("invalid response: {raw}")]
    InvalidResponse { raw: String },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// The body was not well formed for the requested record type.
    #[error("Decode error: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub(crate) fn decode(source: serde_json::Error, body: &[u8]) -> Self {
        Error::Decode {
            source,
            raw: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// True when the remote service produced this error (as opposed to the client).
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Unauthorized
                | Error::NotFound
                | Error::Api { .. }
                | Error::Remote { .. }
                | Error::AddTagFailed
        )
    }
}

impl From<ClassifiedError> for Error {
    fn from(classified: ClassifiedError) -> Self {
        match classified {
            ClassifiedError::Unauthorized => Error::Unauthorized,
            ClassifiedError::NotFound => Error::NotFound,
            ClassifiedError::Generic(raw) => Error::Api { raw },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_includes_context() {
        let err = Error::validation_with_context(
            "must specify new data",
            ErrorContext::new()
                .with_field_path("data")
                .with_source("files.update_file"),
        );
        assert_eq!(
            err.to_string(),
            "Validation error: must specify new data (field: data, source: files.update_file)"
        );
        assert!(err.context().is_some());
        assert!(!err.is_remote());
    }

    #[test]
    fn test_classified_conversion() {
        assert!(matches!(
            Error::from(ClassifiedError::Unauthorized),
            Error::Unauthorized
        ));
        assert!(matches!(Error::from(ClassifiedError::NotFound), Error::NotFound));
        let err = Error::from(ClassifiedError::Generic("{}".into()));
        assert_eq!(err.to_string(), "api error: {}");
        assert!(err.is_remote());
    }

    #[test]
    fn test_remote_display() {
        let err = Error::Remote {
            code: 404,
            kind: "not_found_error".into(),
            message: "Not found".into(),
        };
        assert_eq!(err.to_string(), "404: not_found_error-Not found");
    }
}
