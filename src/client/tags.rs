//! Tags resource (legacy only).

use serde::Deserialize;

use super::core::Client;
use super::generation::Legacy;
use crate::{Error, Result};

/// Answer to an add-tag call.
#[derive(Debug, Deserialize)]
struct AddTagResponse {
    #[serde(default)]
    result: bool,
    #[serde(default)]
    media_file_tags: Vec<String>,
}

pub struct Tags<'a> {
    client: &'a Client<Legacy>,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(client: &'a Client<Legacy>) -> Self {
        Self { client }
    }

    pub async fn get_tags(&self, file_id: u64) -> Result<Vec<String>> {
        let endpoint = self.client.endpoints().get_tags(file_id);
        self.client.fetch(&endpoint).await
    }

    /// Add `tag` and return the file's tags afterwards.
    pub async fn add_tag(&self, file_id: u64, tag: &str) -> Result<Vec<String>> {
        let endpoint = self.client.endpoints().add_tag(file_id, tag)?;
        let response: AddTagResponse = self.client.fetch(&endpoint).await?;
        if !response.result {
            return Err(Error::AddTagFailed);
        }
        Ok(response.media_file_tags)
    }

    /// Remove `tag` and return the remaining tags.
    pub async fn remove_tag(&self, file_id: u64, tag: &str) -> Result<Vec<String>> {
        let endpoint = self.client.endpoints().remove_tag(file_id, tag)?;
        self.client.fetch(&endpoint).await
    }
}
