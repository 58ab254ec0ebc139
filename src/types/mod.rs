//! 类型模块：3Play 文件、转录、格式与请求选项的强类型表示。
//!
//! # Types Module
//!
//! Strongly-typed representations of everything that crosses the wire.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`File`] / [`FilesPage`] | Legacy media file records and paginated listings |
//! | [`Transcript`] | Legacy word-level transcript |
//! | [`TranscriptJob`] | v3 transcript job snapshot |
//! | [`MediaFile`] | v3 media file created by an upload |
//! | [`CaptionsFormat`] / [`TranscriptFormat`] | Standard output formats |
//! | [`CaptionsRequestOptions`] | Target + format selection for caption downloads |
//!
//! ## Submodules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`file`] | File records, pagination summary |
//! | [`transcript`] | Legacy transcript body |
//! | [`job`] | v3 transcript jobs and media files |
//! | [`formats`] | Output format enums and the v3 format id table |
//! | [`options`] | Request option structs |

pub mod file;
pub mod formats;
pub mod job;
pub mod options;
pub mod transcript;

pub use file::{File, FilesPage, NumberOrString, Summary};
pub use formats::{output_format_id, CaptionsFormat, TranscriptFormat};
pub use job::{MediaFile, TranscriptJob, TranscriptOrder, TranscriptStatus};
pub use options::{
    CallParams, CaptionsRequestOptions, FileUpdate, FilesFilter, Pagination, Params,
    TranscriptRequestOptions, UploadOptions,
};
pub use transcript::{Transcript, Word};
