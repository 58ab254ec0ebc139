//! Output formats.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Standard caption formats served by the static host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionsFormat {
    Srt,
    #[serde(rename = "vtt")]
    WebVtt,
    Dfxp,
    Smi,
    Stl,
    Qt,
    Qtxml,
    Cptxml,
    Adbe,
}

impl CaptionsFormat {
    /// Extension used in `/captions.{ext}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::WebVtt => "vtt",
            Self::Dfxp => "dfxp",
            Self::Smi => "smi",
            Self::Stl => "stl",
            Self::Qt => "qt",
            Self::Qtxml => "qtxml",
            Self::Cptxml => "cptxml",
            Self::Adbe => "adbe",
        }
    }
}

impl fmt::Display for CaptionsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legacy transcript formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptFormat {
    #[default]
    Json,
    Txt,
    Html,
}

impl TranscriptFormat {
    /// Extension used in `/transcript.{ext}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Txt => "txt",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// v3 `output_format_id` for each caption format the v3 text endpoint accepts.
static OUTPUT_FORMAT_IDS: Lazy<HashMap<CaptionsFormat, u32>> = Lazy::new(|| {
    HashMap::from([(CaptionsFormat::WebVtt, 139), (CaptionsFormat::Srt, 7)])
});

/// Numeric v3 output format id, if the format has one.
pub fn output_format_id(format: CaptionsFormat) -> Option<u32> {
    OUTPUT_FORMAT_IDS.get(&format).copied()
}
