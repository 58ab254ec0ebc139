//! Files resource.

use serde::Deserialize;
use tracing::debug;

use super::core::Client;
use super::error_classification::{classify_legacy, ClassifiedError};
use super::generation::{ApiGeneration, Legacy, V3};
use crate::types::{CallParams, File, FileUpdate, FilesFilter, FilesPage, Pagination, UploadOptions};
use crate::{Error, Result};

/// Body the legacy API answers a successful update with.
const UPDATE_OK: &str = "1";

/// Media file operations.
pub struct Files<'a, G: ApiGeneration> {
    client: &'a Client<G>,
}

impl<'a, G: ApiGeneration> Files<'a, G> {
    pub(crate) fn new(client: &'a Client<G>) -> Self {
        Self { client }
    }
}

impl Files<'_, Legacy> {
    /// `GET /files/{id}`.
    pub async fn get_file(&self, file_id: u64) -> Result<File> {
        let endpoint = self.client.endpoints().get_file(file_id);
        self.client.fetch(&endpoint).await
    }

    /// `GET /files`, optionally filtered. The filter travels as one `q` parameter.
    pub async fn get_files(
        &self,
        pagination: Pagination,
        filter: Option<&FilesFilter>,
    ) -> Result<FilesPage> {
        let endpoint = self.client.endpoints().get_files(pagination, filter);
        self.client.fetch(&endpoint).await
    }

    /// Change metadata of a file. Succeeds only when the service answers `1`.
    pub async fn update_file(&self, file_id: u64, data: &FileUpdate) -> Result<()> {
        let endpoint = self.client.endpoints().update_file(file_id, data)?;
        let response = self.client.execute(&endpoint).await?;
        let body = String::from_utf8_lossy(&response.body);

        if body.trim() == UPDATE_OK {
            return Ok(());
        }
        match classify_legacy(&response.body) {
            Some(classified) => Err(classified.into()),
            None => Err(Error::InvalidResponse {
                raw: body.into_owned(),
            }),
        }
    }

    /// Ask the service to fetch media from `link`. Returns the new file id.
    pub async fn upload_file_from_url(&self, link: &str, options: &UploadOptions) -> Result<u64> {
        let endpoint = self.client.endpoints().upload_file_from_url(link, options)?;
        let response = self.client.execute(&endpoint).await?;
        let body = String::from_utf8_lossy(&response.body);

        if let Ok(id) = body.trim().parse::<u64>() {
            debug!(file_id = id, "legacy upload accepted");
            return Ok(id);
        }
        match classify_legacy(&response.body) {
            Some(classified @ (ClassifiedError::Unauthorized | ClassifiedError::NotFound)) => {
                Err(classified.into())
            }
            _ => Err(Error::InvalidResponse {
                raw: body.into_owned(),
            }),
        }
    }
}

#[derive(Deserialize)]
struct CreatedMediaFile {
    id: u64,
}

impl Files<'_, V3> {
    /// `POST /v3/files`. `options` carries `source_url`, `name`, `language_id`, ...
    pub async fn upload_file_from_url(
        &self,
        options: &UploadOptions,
        params: &CallParams,
    ) -> Result<u64> {
        let endpoint = self
            .client
            .endpoints()
            .upload_file_from_url(options, params.api_key())?;
        let created: CreatedMediaFile = self.client.fetch(&endpoint).await?;
        Ok(created.id)
    }
}
