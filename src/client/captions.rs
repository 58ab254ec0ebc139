//! Captions resource (legacy only).
//!
//! Captions are opaque documents served from the static host; the body is returned
//! as-is.

use bytes::Bytes;

use super::core::Client;
use super::generation::Legacy;
use crate::types::{CaptionsFormat, CaptionsRequestOptions};
use crate::Result;

pub struct Captions<'a> {
    client: &'a Client<Legacy>,
}

impl<'a> Captions<'a> {
    pub(crate) fn new(client: &'a Client<Legacy>) -> Self {
        Self { client }
    }

    pub async fn get_captions(&self, options: &CaptionsRequestOptions) -> Result<Bytes> {
        let endpoint = self.client.endpoints().get_captions(options)?;
        self.client.fetch_document(&endpoint).await
    }

    pub async fn get_captions_by_video_id(
        &self,
        video_id: &str,
        format: CaptionsFormat,
    ) -> Result<Bytes> {
        self.get_captions(&CaptionsRequestOptions::by_video_id(video_id).format(format))
            .await
    }
}
