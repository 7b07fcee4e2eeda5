//! Single-shot multipart upload of an app image.
//!
//! One POST to the device's `/upload` endpoint carrying four form fields:
//! `appID`, `appMD5`, `appSize`, and the raw `appImage` payload. The body
//! is streamed in fixed-size chunks so progress can be surfaced while it
//! flows. There is no retry and no resume: a non-200 outcome is reported,
//! not raised.

mod client;
mod progress;

pub use client::{UploadClient, UploadOutcome};
pub use progress::{ProgressFn, percent_complete};

/// Errors produced by the uploader.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image too small: {size} bytes (minimum {min})")]
    ImageTooSmall { size: u64, min: u64 },
}
