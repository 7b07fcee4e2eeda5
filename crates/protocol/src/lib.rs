//! Fixed parameters and shared types of the Pocuter image upload flow.
//!
//! The device's web server accepts exactly one kind of request: a
//! multipart form posted to [`UPLOAD_PATH`] carrying the app id, MD5
//! digest, byte size, and the raw image. Everything here mirrors what the
//! device firmware expects and is not configurable.

mod constants;
mod types;

pub use constants::*;
pub use types::TransferState;
