//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mockito::{Server, ServerGuard};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use threeplay_rs::client::HttpMethod;
use threeplay_rs::transport::{FormFields, HttpTransport, TransportError, TransportResponse};
use threeplay_rs::{ClientBuilder, LegacyClient, V3Client};
use url::Url;

/// Route crate logs to the test writer. Honors `RUST_LOG`; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Read `tests/fixtures/<name>`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// One request seen by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: HttpMethod,
    pub url: Url,
    pub form: FormFields,
}

/// In-memory transport: records every request and answers from a script.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<Recorded>>,
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::new(status, body.into())));
        self
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.into_iter().next().unwrap()
    }

    fn record(
        &self,
        method: HttpMethod,
        url: &Url,
        form: &FormFields,
    ) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(Recorded {
            method,
            url: url.clone(),
            form: form.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response".into())))
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        self.record(HttpMethod::Get, url, &Vec::new())
    }

    async fn post_form(
        &self,
        url: &Url,
        form: &FormFields,
    ) -> Result<TransportResponse, TransportError> {
        self.record(HttpMethod::PostForm, url, form)
    }

    async fn put_form(
        &self,
        url: &Url,
        form: &FormFields,
    ) -> Result<TransportResponse, TransportError> {
        self.record(HttpMethod::PutForm, url, form)
    }
}

pub fn legacy_client(transport: &Arc<RecordingTransport>) -> LegacyClient {
    ClientBuilder::new()
        .without_env()
        .api_key("api-key")
        .api_secret("secret-key")
        .transport(transport.clone())
        .build_legacy()
        .expect("legacy client")
}

/// mockito server plus a v3 client pointed at it.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    pub fn v3_client(&self) -> V3Client {
        ClientBuilder::new()
            .without_env()
            .api_key("api-key")
            .api_base_url(&self.base_url)
            .max_attempts(1)
            .build_v3()
            .expect("v3 client")
    }

    pub fn legacy_client(&self) -> LegacyClient {
        ClientBuilder::new()
            .without_env()
            .api_key("api-key")
            .api_secret("secret-key")
            .api_base_url(&self.base_url)
            .static_base_url(&self.base_url)
            .build_legacy()
            .expect("legacy client")
    }

    /// Mock answering the named fixture with HTTP 200, whatever the query.
    pub async fn mock_fixture(
        &mut self,
        method: &str,
        path: &str,
        fixture_name: &str,
    ) -> mockito::Mock {
        self.server
            .mock(method, path)
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(fixture(fixture_name))
            .create_async()
            .await
    }
}
