//! Request options.

use super::formats::{CaptionsFormat, TranscriptFormat};
use std::collections::BTreeMap;

/// Free-form `field -> value` parameters, kept sorted by field name so the
/// encoded query/body is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Filter for `GET /files`, e.g. `state=error`, `video_id=123123`.
pub type FilesFilter = Params;

/// Fields to change with `update_file`, e.g. `name`, `description`, `attribute1`.
pub type FileUpdate = Params;

/// Extra form fields sent along with an upload (`video_id`, `name`, `language_id`, ...).
pub type UploadOptions = Params;

/// `page` / `per_page` for `GET /files`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl Pagination {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }
}

/// Options for downloading captions.
///
/// `file_id` and `video_id` are mutually exclusive; `file_id` wins when both are
/// set. `output_format` (a custom format) wins over `format`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionsRequestOptions {
    pub file_id: Option<u64>,
    pub video_id: Option<String>,
    pub format: Option<CaptionsFormat>,
    pub output_format: Option<String>,
}

impl CaptionsRequestOptions {
    pub fn by_file_id(file_id: u64) -> Self {
        Self {
            file_id: Some(file_id),
            ..Default::default()
        }
    }

    pub fn by_video_id(video_id: impl Into<String>) -> Self {
        Self {
            video_id: Some(video_id.into()),
            ..Default::default()
        }
    }

    pub fn format(mut self, format: CaptionsFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn output_format(mut self, output_format: impl Into<String>) -> Self {
        self.output_format = Some(output_format.into());
        self
    }
}

/// Options for downloading a legacy transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptRequestOptions {
    pub file_id: Option<u64>,
    pub video_id: Option<String>,
    pub format: Option<TranscriptFormat>,
}

impl TranscriptRequestOptions {
    pub fn by_file_id(file_id: u64) -> Self {
        Self {
            file_id: Some(file_id),
            ..Default::default()
        }
    }

    pub fn by_video_id(video_id: impl Into<String>) -> Self {
        Self {
            video_id: Some(video_id.into()),
            ..Default::default()
        }
    }

    pub fn format(mut self, format: TranscriptFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Per-call overrides for v3 operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallParams {
    /// Use this key instead of the client's for one call. Empty means "not set".
    pub api_key: Option<String>,
}

impl CallParams {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }

    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_are_sorted() {
        let params = Params::new().with("video_id", "123123").with("state", "error");
        let fields: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(fields, vec!["state", "video_id"]);
    }

    #[test]
    fn test_empty_call_params_key_is_unset() {
        assert_eq!(CallParams::with_api_key("").api_key(), None);
        assert_eq!(CallParams::with_api_key("k").api_key(), Some("k"));
        assert_eq!(CallParams::default().api_key(), None);
    }
}
