//! Event and outcome types for a drop cycle.

use pocudrop_image::ImageMetadata;

/// Progress event emitted during a drop cycle.
///
/// Mirrors the display updates of the device's web page: the front end
/// uses these to flip its wait affordances, fill the metadata block, and
/// drive the progress bar.
#[derive(Debug, Clone)]
pub enum CycleEvent {
    /// Traversal finished and found a qualifying image.
    Located { app_id: u32, path: String },
    /// Digest and header name computed; the transfer is about to start.
    Inspected {
        app_id: u32,
        path: String,
        metadata: ImageMetadata,
    },
    /// Body bytes are flowing; integer percent complete.
    Progress { percent: u8 },
    /// Transfer finished with the given HTTP status.
    Finished { status: u16 },
}

/// Result of a completed cycle.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub app_id: u32,
    pub status: u16,
    /// Server response body, present only on a 200 status. Surfaced to the
    /// user verbatim.
    pub response: Option<String>,
}
