//! v3 transcript jobs.
//!
//! The service owns the job state machine (`pending` -> `in_progress` -> `complete`,
//! or `cancelled` / `error`). These calls only order, observe and cancel.

use serde::Deserialize;

use super::core::Client;
use super::generation::V3;
use crate::types::{CallParams, CaptionsFormat, TranscriptJob, TranscriptOrder};
use crate::Result;

#[derive(Debug, Deserialize)]
struct CancelResponse {
    #[serde(default)]
    success: bool,
}

pub struct Jobs<'a> {
    client: &'a Client<V3>,
}

impl<'a> Jobs<'a> {
    pub(crate) fn new(client: &'a Client<V3>) -> Self {
        Self { client }
    }

    /// Order a transcript for an uploaded media file.
    pub async fn order_transcript(
        &self,
        media_file_id: &str,
        callback_url: Option<&str>,
        order: &TranscriptOrder,
        params: &CallParams,
    ) -> Result<TranscriptJob> {
        let endpoint = self.client.endpoints().order_transcript(
            media_file_id,
            callback_url,
            order,
            params.api_key(),
        )?;
        self.client.fetch(&endpoint).await
    }

    pub async fn get_transcript_info(
        &self,
        transcript_id: &str,
        params: &CallParams,
    ) -> Result<TranscriptJob> {
        let endpoint = self
            .client
            .endpoints()
            .get_transcript_info(transcript_id, params.api_key())?;
        self.client.fetch(&endpoint).await
    }

    /// Rendered transcript text. Only formats with a numeric output id are accepted.
    pub async fn get_transcript_text(
        &self,
        transcript_id: &str,
        offset: Option<&str>,
        format: CaptionsFormat,
        params: &CallParams,
    ) -> Result<String> {
        let endpoint = self.client.endpoints().get_transcript_text(
            transcript_id,
            offset,
            format,
            params.api_key(),
        )?;
        self.client.fetch(&endpoint).await
    }

    /// Cancel an order that has not started. The service answers
    /// `{"success": bool}`, which is returned as-is.
    pub async fn cancel_transcript(&self, transcript_id: &str, params: &CallParams) -> Result<bool> {
        let endpoint = self
            .client
            .endpoints()
            .cancel_transcript(transcript_id, params.api_key())?;
        let response: CancelResponse = self.client.fetch(&endpoint).await?;
        Ok(response.success)
    }

    /// Link to the online editor, valid for `hours_until_expiration` hours.
    pub async fn get_editing_link(
        &self,
        transcript_id: &str,
        hours_until_expiration: u32,
        params: &CallParams,
    ) -> Result<String> {
        let endpoint = self.client.endpoints().get_editing_link(
            transcript_id,
            hours_until_expiration,
            params.api_key(),
        )?;
        self.client.fetch(&endpoint).await
    }
}
