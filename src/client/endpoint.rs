//! Endpoint resolution
//!
//! Pure functions from (operation, options, credentials) to a ready-to-send
//! [`Endpoint`]. Nothing here touches the network, so every precedence rule can be
//! checked without a transport.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use url::Url;

use super::generation::{ApiGeneration, Legacy, V3};
use crate::transport::FormFields;
use crate::types::{
    output_format_id, CaptionsFormat, CaptionsRequestOptions, FileUpdate, FilesFilter,
    Pagination, TranscriptFormat, TranscriptOrder, TranscriptRequestOptions, UploadOptions,
};
use crate::{Error, ErrorContext, Result};

/// Host serving files, tags and transcript jobs.
pub const API_HOST: &str = "api.3playmedia.com";
/// Host serving caption and legacy transcript documents.
pub const STATIC_HOST: &str = "static.3playmedia.com";

static DEFAULT_HOSTS: Lazy<Hosts> = Lazy::new(|| Hosts {
    api: Url::parse(&format!("https://{}", API_HOST)).expect("valid api host URL"),
    static_files: Url::parse(&format!("https://{}", STATIC_HOST)).expect("valid static host URL"),
});

/// Base URLs for the two host families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hosts {
    pub api: Url,
    pub static_files: Url,
}

impl Hosts {
    /// Override either base URL (primarily for testing with mock servers).
    pub fn with_overrides(api: Option<&str>, static_files: Option<&str>) -> Result<Self> {
        let mut hosts = Self::default();
        if let Some(api) = api {
            hosts.api = parse_base_url(api, "api_base_url")?;
        }
        if let Some(static_files) = static_files {
            hosts.static_files = parse_base_url(static_files, "static_base_url")?;
        }
        Ok(hosts)
    }
}

impl Default for Hosts {
    fn default() -> Self {
        DEFAULT_HOSTS.clone()
    }
}

fn parse_base_url(raw: &str, field: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid base URL: {}", e),
            ErrorContext::new()
                .with_field_path(field)
                .with_details(raw)
                .with_source("endpoint_builder"),
        )
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::configuration_with_context(
            "Base URL cannot be a base",
            ErrorContext::new()
                .with_field_path(field)
                .with_details(raw)
                .with_source("endpoint_builder"),
        ));
    }
    Ok(url)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    PostForm,
    PutForm,
}

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub url: Url,
    /// Form body, empty for `GET`.
    pub form: FormFields,
}

/// Which document of a media file is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document<'a> {
    Captions {
        format: Option<CaptionsFormat>,
        output_format: Option<&'a str>,
    },
    Transcript {
        format: Option<TranscriptFormat>,
    },
}

/// Outcome of resolving identifier and format options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        path: Vec<String>,
        params: Vec<(String, String)>,
    },
    Invalid {
        reason: &'static str,
    },
}

pub const MISSING_IDENTIFIER: &str =
    "cannot determine the endpoint: missing file ID and the video ID";
pub const MISSING_FORMAT: &str =
    "cannot determine the endpoint: missing format and custom output format";

/// Resolve `/files/{id}/...` for a caption or transcript download.
///
/// A file id wins over a video id; a custom output format wins over a standard one.
/// Zero ids and empty strings count as unset.
pub fn resolve_document(
    file_id: Option<u64>,
    video_id: Option<&str>,
    document: Document<'_>,
) -> Resolution {
    let mut params = Vec::new();
    let id = match (file_id.filter(|id| *id != 0), video_id.filter(|v| !v.is_empty())) {
        (Some(file_id), _) => file_id.to_string(),
        (None, Some(video_id)) => {
            params.push(("usevideoid".to_string(), "1".to_string()));
            video_id.to_string()
        }
        (None, None) => {
            return Resolution::Invalid {
                reason: MISSING_IDENTIFIER,
            }
        }
    };

    let tail = match document {
        Document::Captions { output_format, format } => {
            match (output_format.filter(|f| !f.is_empty()), format) {
                (Some(custom), _) => vec!["output_formats".to_string(), custom.to_string()],
                (None, Some(format)) => vec![format!("captions.{}", format)],
                (None, None) => {
                    return Resolution::Invalid {
                        reason: MISSING_FORMAT,
                    }
                }
            }
        }
        Document::Transcript { format: Some(format) } => vec![format!("transcript.{}", format)],
        Document::Transcript { format: None } => {
            return Resolution::Invalid {
                reason: MISSING_FORMAT,
            }
        }
    };

    let mut path = vec!["files".to_string(), id];
    path.extend(tail);
    Resolution::Resolved { path, params }
}

/// Serialize a filter into the opaque `q` value: `field=value&field2=value2`.
///
/// Pairs are joined raw; the outer query encoding is the only encoding `q` gets.
pub fn encode_filter(filter: &FilesFilter) -> String {
    filter
        .iter()
        .map(|(field, value)| format!("{}={}", field, value))
        .collect::<Vec<_>>()
        .join("&")
}

fn validation(message: &str, field: &str, source: &str) -> Error {
    Error::validation_with_context(
        message,
        ErrorContext::new().with_field_path(field).with_source(source),
    )
}

/// Builds endpoints for one API generation.
pub struct EndpointBuilder<'a, G: ApiGeneration> {
    generation: &'a G,
    hosts: &'a Hosts,
}

impl<'a, G: ApiGeneration> EndpointBuilder<'a, G> {
    pub fn new(generation: &'a G, hosts: &'a Hosts) -> Self {
        Self { generation, hosts }
    }

    fn url<S: AsRef<str>>(
        base: &Url,
        prefix: &[&str],
        segments: &[S],
        query: BTreeMap<String, String>,
    ) -> Url {
        let mut url = base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(prefix)
                .extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        url
    }

    fn query_with_key(&self, key_override: Option<&str>) -> BTreeMap<String, String> {
        let mut query = BTreeMap::new();
        query.insert(
            G::KEY_PARAM.to_string(),
            self.generation.effective_key(key_override).to_string(),
        );
        query
    }

    /// `GET` on the api host.
    pub fn api_get<S: AsRef<str>>(
        &self,
        segments: &[S],
        extra: impl IntoIterator<Item = (String, String)>,
        key_override: Option<&str>,
    ) -> Endpoint {
        let mut query = self.query_with_key(key_override);
        query.extend(extra);
        Endpoint {
            method: HttpMethod::Get,
            url: Self::url(&self.hosts.api, G::PATH_PREFIX, segments, query),
            form: Vec::new(),
        }
    }

    /// `GET` on the static host; document paths are never version-prefixed.
    pub fn static_get(&self, resolution: Resolution, source: &str) -> Result<Endpoint> {
        match resolution {
            Resolution::Resolved { path, params } => {
                let mut query = self.query_with_key(None);
                query.extend(params);
                Ok(Endpoint {
                    method: HttpMethod::Get,
                    url: Self::url(&self.hosts.static_files, &[], path.as_slice(), query),
                    form: Vec::new(),
                })
            }
            Resolution::Invalid { reason } => Err(validation(reason, "options", source)),
        }
    }

    /// Form request on the api host. Credentials always win over caller fields.
    pub fn api_form<S: AsRef<str>>(
        &self,
        method: HttpMethod,
        segments: &[S],
        fields: impl IntoIterator<Item = (String, String)>,
        key_override: Option<&str>,
    ) -> Result<Endpoint> {
        let mut form: BTreeMap<String, String> = fields.into_iter().collect();
        form.extend(self.generation.form_credentials(key_override)?);
        Ok(Endpoint {
            method,
            url: Self::url(&self.hosts.api, G::PATH_PREFIX, segments, BTreeMap::new()),
            form: form.into_iter().collect(),
        })
    }
}

fn owned(params: &crate::types::Params) -> impl Iterator<Item = (String, String)> + '_ {
    params.iter().map(|(k, v)| (k.to_string(), v.to_string()))
}

impl EndpointBuilder<'_, Legacy> {
    pub fn get_files(&self, pagination: Pagination, filter: Option<&FilesFilter>) -> Endpoint {
        let mut extra = Vec::new();
        if let Some(page) = pagination.page {
            extra.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = pagination.per_page {
            extra.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            extra.push(("q".to_string(), encode_filter(filter)));
        }
        self.api_get(&["files"], extra, None)
    }

    pub fn get_file(&self, file_id: u64) -> Endpoint {
        self.api_get(&["files".to_string(), file_id.to_string()], [], None)
    }

    pub fn update_file(&self, file_id: u64, data: &FileUpdate) -> Result<Endpoint> {
        if data.is_empty() {
            return Err(validation(
                "must specify new data",
                "data",
                "files.update_file",
            ));
        }
        self.api_form(
            HttpMethod::PutForm,
            &["files".to_string(), file_id.to_string()],
            owned(data),
            None,
        )
    }

    pub fn upload_file_from_url(&self, link: &str, options: &UploadOptions) -> Result<Endpoint> {
        if link.is_empty() {
            return Err(validation(
                "must specify the media URL",
                "link",
                "files.upload_file_from_url",
            ));
        }
        let fields = owned(options).chain([("link".to_string(), link.to_string())]);
        self.api_form(HttpMethod::PostForm, &["files"], fields, None)
    }

    pub fn get_tags(&self, file_id: u64) -> Endpoint {
        self.api_get(
            &["files".to_string(), file_id.to_string(), "tags".to_string()],
            [],
            None,
        )
    }

    pub fn add_tag(&self, file_id: u64, tag: &str) -> Result<Endpoint> {
        if tag.is_empty() {
            return Err(validation("must specify a tag", "tag", "tags.add_tag"));
        }
        self.api_form(
            HttpMethod::PostForm,
            &["files".to_string(), file_id.to_string(), "tags".to_string()],
            [("name".to_string(), tag.to_string())],
            None,
        )
    }

    /// The service routes deletes through a POST carrying `_method=delete`.
    pub fn remove_tag(&self, file_id: u64, tag: &str) -> Result<Endpoint> {
        if tag.is_empty() {
            return Err(validation("must specify a tag", "tag", "tags.remove_tag"));
        }
        self.api_form(
            HttpMethod::PostForm,
            &[
                "files".to_string(),
                file_id.to_string(),
                "tags".to_string(),
                tag.to_string(),
            ],
            [("_method".to_string(), "delete".to_string())],
            None,
        )
    }

    pub fn get_captions(&self, options: &CaptionsRequestOptions) -> Result<Endpoint> {
        let resolution = resolve_document(
            options.file_id,
            options.video_id.as_deref(),
            Document::Captions {
                format: options.format,
                output_format: options.output_format.as_deref(),
            },
        );
        self.static_get(resolution, "captions.get_captions")
    }

    pub fn get_transcript(&self, options: &TranscriptRequestOptions) -> Result<Endpoint> {
        let resolution = resolve_document(
            options.file_id,
            options.video_id.as_deref(),
            Document::Transcript {
                format: options.format,
            },
        );
        self.static_get(resolution, "transcripts.get_transcript")
    }
}

fn require_id(id: &str, field: &str, source: &str) -> Result<()> {
    if id.is_empty() {
        return Err(validation(
            &format!("must specify the {}", field),
            field,
            source,
        ));
    }
    Ok(())
}

impl EndpointBuilder<'_, V3> {
    pub fn upload_file_from_url(
        &self,
        options: &UploadOptions,
        key_override: Option<&str>,
    ) -> Result<Endpoint> {
        self.api_form(HttpMethod::PostForm, &["files"], owned(options), key_override)
    }

    pub fn order_transcript(
        &self,
        media_file_id: &str,
        callback_url: Option<&str>,
        order: &TranscriptOrder,
        key_override: Option<&str>,
    ) -> Result<Endpoint> {
        require_id(media_file_id, "media_file_id", "jobs.order_transcript")?;
        let mut fields = vec![("media_file_id".to_string(), media_file_id.to_string())];
        if let Some(callback) = callback_url.filter(|c| !c.is_empty()) {
            fields.push(("callback".to_string(), callback.to_string()));
        }
        let kind = match order {
            TranscriptOrder::Asr => "asr",
            TranscriptOrder::Transcription {
                turnaround_level_id,
            } => {
                fields.push((
                    "turnaround_level_id".to_string(),
                    turnaround_level_id.clone(),
                ));
                "transcription"
            }
        };
        self.api_form(
            HttpMethod::PostForm,
            &["transcripts", "order", kind],
            fields,
            key_override,
        )
    }

    pub fn get_transcript_info(
        &self,
        transcript_id: &str,
        key_override: Option<&str>,
    ) -> Result<Endpoint> {
        require_id(transcript_id, "transcript_id", "jobs.get_transcript_info")?;
        Ok(self.api_get(&["transcripts", transcript_id], [], key_override))
    }

    pub fn get_transcript_text(
        &self,
        transcript_id: &str,
        offset: Option<&str>,
        format: CaptionsFormat,
        key_override: Option<&str>,
    ) -> Result<Endpoint> {
        require_id(transcript_id, "transcript_id", "jobs.get_transcript_text")?;
        let format_id = output_format_id(format).ok_or_else(|| {
            Error::validation_with_context(
                format!("output format '{}' has no v3 output_format_id", format),
                ErrorContext::new()
                    .with_field_path("format")
                    .with_source("jobs.get_transcript_text"),
            )
        })?;
        let mut extra = vec![("output_format_id".to_string(), format_id.to_string())];
        if let Some(offset) = offset.filter(|o| !o.is_empty()) {
            extra.push(("offset".to_string(), offset.to_string()));
        }
        Ok(self.api_get(&["transcripts", transcript_id, "text"], extra, key_override))
    }

    pub fn cancel_transcript(
        &self,
        transcript_id: &str,
        key_override: Option<&str>,
    ) -> Result<Endpoint> {
        require_id(transcript_id, "transcript_id", "jobs.cancel_transcript")?;
        self.api_form(
            HttpMethod::PostForm,
            &["transcripts", transcript_id, "cancel"],
            [],
            key_override,
        )
    }

    pub fn get_editing_link(
        &self,
        transcript_id: &str,
        hours_until_expiration: u32,
        key_override: Option<&str>,
    ) -> Result<Endpoint> {
        require_id(transcript_id, "transcript_id", "jobs.get_editing_link")?;
        Ok(self.api_get(
            &["transcripts", transcript_id, "expiring_editing_link"],
            [(
                "hours_until_expiration".to_string(),
                hours_until_expiration.to_string(),
            )],
            key_override,
        ))
    }
}
