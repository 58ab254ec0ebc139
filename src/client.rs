//! 3Play client interface.
//!
//! Keep the public surface small and predictable: one generic [`Client`] per API
//! generation, with per-resource handles (`files()`, `tags()`, `captions()`,
//! `transcripts()`, `jobs()`). Implementation details are split into submodules
//! under `src/client/`.

pub mod builder;
pub mod captions;
pub mod core;
pub mod endpoint;
pub mod error_classification;
pub mod files;
pub mod generation;
pub mod jobs;
pub mod tags;
pub mod transcripts;

pub use builder::ClientBuilder;
pub use captions::Captions;
pub use core::Client;
pub use endpoint::{Endpoint, EndpointBuilder, Hosts, HttpMethod, Resolution};
pub use error_classification::{classify_legacy, unwrap_v3, ClassifiedError};
pub use files::Files;
pub use generation::{ApiGeneration, Legacy, V3};
pub use jobs::Jobs;
pub use tags::Tags;
pub use transcripts::Transcripts;

/// Client for the legacy (`apikey` + `api_secret_key`) API.
pub type LegacyClient = Client<Legacy>;

/// Client for the v3 (`api_key`, `/v3/...`) API.
pub type V3Client = Client<V3>;
