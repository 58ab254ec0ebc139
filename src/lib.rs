//! # threeplay-rs
//!
//! 3Play Media 字幕与转录服务的异步 Rust 客户端，覆盖旧版 API 与 v3 API。
//!
//! Async client for the 3Play Media captioning and transcription service.
//!
//! ## Overview
//!
//! The crate is a request-construction and response-normalization layer. It builds
//! versioned endpoint URLs and form bodies for two API generations, classifies the
//! service's mixed error payloads into one [`Error`] type, and sends every call through
//! the same transport with a fixed timeout and retry policy.
//!
//! ## Key Features
//!
//! - **Two generations, one client**: [`Client<Legacy>`](LegacyClient) and
//!   [`Client<V3>`](V3Client) share one implementation behind [`ApiGeneration`]
//! - **Pluggable transport**: anything implementing [`transport::HttpTransport`]
//! - **Retries**: transport failures only; error envelopes are returned at once
//! - **Configuration**: builder, YAML or `THREEPLAY_*` environment variables
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use threeplay_rs::{ClientBuilder, CaptionsFormat, CaptionsRequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> threeplay_rs::Result<()> {
//!     let client = ClientBuilder::new()
//!         .api_key("your-api-key")
//!         .api_secret("your-api-secret")
//!         .build_legacy()?;
//!
//!     let file = client.files().get_file(123456).await?;
//!     println!("{}", file.name);
//!
//!     let srt = client
//!         .captions()
//!         .get_captions(&CaptionsRequestOptions::by_file_id(123456).format(CaptionsFormat::Srt))
//!         .await?;
//!     println!("{} bytes of captions", srt.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Clients, resources, endpoint builder and error classifier |
//! | [`transport`] | HTTP capability, reqwest implementation, retry wrapper |
//! | [`types`] | Wire records and request options |
//! | [`config`] | YAML / environment configuration |
//! | [`error`] | Error taxonomy |

pub mod client;
pub mod config;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{
    ApiGeneration, Client, ClientBuilder, Legacy, LegacyClient, V3Client, V3,
};
pub use config::ClientConfig;
pub use types::{
    CallParams, CaptionsFormat, CaptionsRequestOptions, File, FileUpdate, FilesFilter,
    FilesPage, MediaFile, Pagination, Transcript, TranscriptFormat, TranscriptJob,
    TranscriptOrder, TranscriptRequestOptions, TranscriptStatus, UploadOptions,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
