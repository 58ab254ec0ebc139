//! v3 transcript jobs and media files.

use serde::{Deserialize, Serialize};

/// Processing state of a v3 transcript job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptStatus {
    Pending,
    InProgress,
    Complete,
    Cancelled,
    Error,
    /// Any status this crate does not know about yet.
    #[default]
    #[serde(other)]
    Other,
}

impl TranscriptStatus {
    /// Whether the job can still change state on the service.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Cancelled | Self::Error)
    }
}

/// Snapshot of a v3 transcript job.
///
/// The service owns the state; the client only observes it through
/// `get_transcript_info` and changes it through order/cancel calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptJob {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub media_file_id: u64,
    #[serde(default)]
    pub duration: Option<f64>,
    /// e.g. `AsrTranscript` or `TranscriptionTranscript`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub language_id: Option<i64>,
    #[serde(default)]
    pub status: TranscriptStatus,
    #[serde(default)]
    pub cancellable: bool,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub cancellation_details: Option<String>,
}

/// Media file created by a v3 upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub language_id: Option<i64>,
    #[serde(default)]
    pub language_ids: Vec<i64>,
    #[serde(default)]
    pub batch_id: Option<u64>,
    #[serde(default)]
    pub reference_id: Option<String>,
}

/// What kind of transcript to order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOrder {
    /// Machine transcript.
    Asr,
    /// Human transcription with the given turnaround level id.
    Transcription { turnaround_level_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_other() {
        let job: TranscriptJob = serde_json::from_str(
            r#"{"id":1,"media_file_id":2,"type":"AsrTranscript","status":"on_hold"}"#,
        )
        .unwrap();
        assert_eq!(job.status, TranscriptStatus::Other);
        assert!(!job.status.is_terminal());
        assert_eq!(job.kind, "AsrTranscript");
    }

    #[test]
    fn test_missing_fields_take_zero_values() {
        let job: TranscriptJob = serde_json::from_str(r#"{"type":"AsrTranscript"}"#).unwrap();
        assert_eq!(job.id, 0);
        assert_eq!(job.media_file_id, 0);
        assert_eq!(job.status, TranscriptStatus::Other);
    }

    #[test]
    fn test_complete_is_terminal() {
        let job: TranscriptJob = serde_json::from_str(
            r#"{"id":1,"media_file_id":2,"duration":12.5,"status":"complete","cancellable":false,
                "cancellation_reason":null}"#,
        )
        .unwrap();
        assert!(job.status.is_terminal());
        assert_eq!(job.duration, Some(12.5));
    }
}
