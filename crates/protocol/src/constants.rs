//! Matching rule, size floor, header window, and wire field names.

use std::ops::Range;

/// File name of the application image searched for in a dropped tree.
pub const IMAGE_FILE_NAME: &str = "esp32c3.app";

/// Maximum directory depth descended from the dropped root.
///
/// Branches at this depth are abandoned silently; a qualifying file nested
/// deeper is never found.
pub const MAX_SCAN_DEPTH: usize = 5;

/// Smallest app id accepted from a parent directory name. Ids 0 and 1 are
/// reserved by the device.
pub const MIN_APP_ID: u32 = 2;

/// Minimum acceptable image size: 600 KiB. Anything smaller cannot be a
/// complete application image.
pub const MIN_IMAGE_SIZE: u64 = 600 * 1024;

/// Byte window of the image header scanned for the `Name=` line.
pub const NAME_WINDOW: Range<usize> = 48..512;

/// Upload endpoint path on the device's web server.
pub const UPLOAD_PATH: &str = "/upload";

/// Multipart form field names understood by the device.
pub mod fields {
    pub const APP_ID: &str = "appID";
    pub const APP_MD5: &str = "appMD5";
    pub const APP_SIZE: &str = "appSize";
    pub const APP_IMAGE: &str = "appImage";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_floor_is_600_kib() {
        assert_eq!(MIN_IMAGE_SIZE, 614_400);
    }

    #[test]
    fn name_window_is_inside_size_floor() {
        assert!((NAME_WINDOW.end as u64) < MIN_IMAGE_SIZE);
    }
}
