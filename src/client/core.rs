use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use super::captions::Captions;
use super::endpoint::{Endpoint, EndpointBuilder, Hosts, HttpMethod};
use super::error_classification::check_legacy;
use super::files::Files;
use super::generation::{ApiGeneration, Legacy, V3};
use super::jobs::Jobs;
use super::tags::Tags;
use super::transcripts::Transcripts;
use crate::transport::{HttpTransport, TransportResponse};
use crate::{Error, Result};

/// 3Play client for one API generation.
///
/// Holds only immutable credentials, hosts and the transport, so it is `Send + Sync`
/// and can be shared across tasks behind an `Arc`.
pub struct Client<G: ApiGeneration> {
    pub(crate) generation: G,
    pub(crate) hosts: Hosts,
    pub(crate) transport: Arc<dyn HttpTransport>,
}

impl<G: ApiGeneration> std::fmt::Debug for Client<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("generation", &G::NAME)
            .field("hosts", &self.hosts)
            .finish()
    }
}

impl<G: ApiGeneration> Client<G> {
    /// Assemble a client from parts. Most callers want [`crate::ClientBuilder`].
    pub fn new(generation: G, hosts: Hosts, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            generation,
            hosts,
            transport,
        }
    }

    pub fn generation(&self) -> &G {
        &self.generation
    }

    pub fn hosts(&self) -> &Hosts {
        &self.hosts
    }

    pub(crate) fn endpoints(&self) -> EndpointBuilder<'_, G> {
        EndpointBuilder::new(&self.generation, &self.hosts)
    }

    /// Send one resolved request and return the raw response.
    pub(crate) async fn execute(&self, endpoint: &Endpoint) -> Result<TransportResponse> {
        // path only: the query carries the API key
        debug!(
            generation = G::NAME,
            method = ?endpoint.method,
            host = endpoint.url.host_str().unwrap_or_default(),
            path = endpoint.url.path(),
            "3play request"
        );

        let response = match endpoint.method {
            HttpMethod::Get => self.transport.get(&endpoint.url).await?,
            HttpMethod::PostForm => {
                self.transport
                    .post_form(&endpoint.url, &endpoint.form)
                    .await?
            }
            HttpMethod::PutForm => {
                self.transport
                    .put_form(&endpoint.url, &endpoint.form)
                    .await?
            }
        };

        debug!(
            generation = G::NAME,
            status = response.status,
            bytes = response.body.len(),
            "3play response"
        );
        Ok(response)
    }

    /// Execute, classify and decode into `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let response = self.execute(endpoint).await?;
        self.generation.decode(&response.body)
    }

    pub fn files(&self) -> Files<'_, G> {
        Files::new(self)
    }
}

impl Client<Legacy> {
    /// Execute a document download (captions, formatted transcripts).
    ///
    /// Documents are opaque, so only an error envelope or a failing status turns
    /// the body into an error.
    pub(crate) async fn fetch_document(&self, endpoint: &Endpoint) -> Result<Bytes> {
        let response = self.execute(endpoint).await?;
        check_legacy(&response.body)?;
        if !(200..300).contains(&response.status) {
            return Err(Error::Api {
                raw: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        Ok(response.body)
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    pub fn captions(&self) -> Captions<'_> {
        Captions::new(self)
    }

    pub fn transcripts(&self) -> Transcripts<'_> {
        Transcripts::new(self)
    }
}

impl Client<V3> {
    pub fn jobs(&self) -> Jobs<'_> {
        Jobs::new(self)
    }
}
