//! HTTP client for the device's `/upload` endpoint.

use pocudrop_image::ImageMetadata;
use pocudrop_protocol::{IMAGE_FILE_NAME, MIN_IMAGE_SIZE, UPLOAD_PATH, fields};
use reqwest::multipart;
use tracing::{debug, info};

use crate::UploadError;
use crate::progress::{ProgressChunks, ProgressFn};

/// Size of each body chunk handed to the transport. Small enough to give
/// usable progress granularity on a ~1 MiB image.
const BODY_CHUNK_SIZE: usize = 64 * 1024;

/// Result of a finished transfer.
///
/// Non-200 statuses are reported here rather than as errors: the flow is
/// observational and never retries.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// HTTP status code of the response.
    pub status: u16,
    /// Response body text; only read for a 200 status.
    pub body: Option<String>,
}

impl UploadOutcome {
    /// Returns `true` for a 200 response.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Client for uploading app images to one device.
pub struct UploadClient {
    http: reqwest::Client,
    base_url: String,
}

impl UploadClient {
    /// Creates a client targeting the device's web server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, UploadError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Sends one app image as a multipart form.
    ///
    /// The size floor is validated before any network activity. While the
    /// body streams out, `on_progress` receives integer percents computed
    /// per chunk.
    pub async fn upload_image(
        &self,
        app_id: u32,
        metadata: &ImageMetadata,
        payload: Vec<u8>,
        on_progress: Option<ProgressFn>,
    ) -> Result<UploadOutcome, UploadError> {
        if metadata.size < MIN_IMAGE_SIZE {
            return Err(UploadError::ImageTooSmall {
                size: metadata.size,
                min: MIN_IMAGE_SIZE,
            });
        }

        let total = payload.len() as u64;
        let chunks = ProgressChunks::new(payload, BODY_CHUNK_SIZE, on_progress);
        let body = reqwest::Body::wrap_stream(futures_util::stream::iter(
            chunks.map(Ok::<_, std::io::Error>),
        ));

        let image_part = multipart::Part::stream_with_length(body, total)
            .file_name(IMAGE_FILE_NAME)
            .mime_str("application/octet-stream")?;

        let form = multipart::Form::new()
            .text(fields::APP_ID, app_id.to_string())
            .text(fields::APP_MD5, metadata.md5.clone())
            .text(fields::APP_SIZE, metadata.size.to_string())
            .part(fields::APP_IMAGE, image_part);

        let url = format!("{}{}", self.base_url, UPLOAD_PATH);
        info!(app_id, size = metadata.size, md5 = %metadata.md5, %url, "uploading app image");

        let resp = self.http.post(&url).multipart(form).send().await?;
        let status = resp.status().as_u16();

        let body = if status == 200 {
            Some(resp.text().await.unwrap_or_default())
        } else {
            debug!(status, "upload finished with non-200 status");
            None
        };

        Ok(UploadOutcome { status, body })
    }
}
