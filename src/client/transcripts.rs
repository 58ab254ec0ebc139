//! Legacy transcripts.

use bytes::Bytes;

use super::core::Client;
use super::generation::{ApiGeneration, Legacy};
use crate::types::{Transcript, TranscriptFormat, TranscriptRequestOptions};
use crate::Result;

pub struct Transcripts<'a> {
    client: &'a Client<Legacy>,
}

impl<'a> Transcripts<'a> {
    pub(crate) fn new(client: &'a Client<Legacy>) -> Self {
        Self { client }
    }

    /// Word-level JSON transcript. Any `format` in `options` is replaced by JSON.
    pub async fn get_transcript(&self, options: &TranscriptRequestOptions) -> Result<Transcript> {
        let options = options.clone().format(TranscriptFormat::Json);
        let endpoint = self.client.endpoints().get_transcript(&options)?;
        let body = self.client.fetch_document(&endpoint).await?;
        self.client.generation.decode(&body)
    }

    pub async fn get_transcript_by_file_id(&self, file_id: u64) -> Result<Transcript> {
        self.get_transcript(&TranscriptRequestOptions::by_file_id(file_id))
            .await
    }

    pub async fn get_transcript_by_video_id(&self, video_id: &str) -> Result<Transcript> {
        self.get_transcript(&TranscriptRequestOptions::by_video_id(video_id))
            .await
    }

    /// Transcript in the requested format, returned untouched.
    pub async fn get_transcript_with_format(
        &self,
        options: &TranscriptRequestOptions,
    ) -> Result<Bytes> {
        let endpoint = self.client.endpoints().get_transcript(options)?;
        self.client.fetch_document(&endpoint).await
    }
}
