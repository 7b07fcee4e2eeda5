//! App image inspection: content digest and embedded name field.
//!
//! Runs exactly once per drop cycle, after traversal has produced a
//! candidate and before the transfer starts. The digest is what the device
//! verifies after flashing; the name is purely informational.

use std::sync::OnceLock;

use regex::bytes::Regex;

use pocudrop_protocol::NAME_WINDOW;

/// Metadata derived from an app image payload before upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Lowercase hex MD5 digest of the full payload.
    pub md5: String,
    /// Payload length in bytes.
    pub size: u64,
    /// Name extracted from the image header; empty when absent.
    pub name: String,
}

/// Computes the digest and header name for an image payload.
pub fn inspect_image(payload: &[u8]) -> ImageMetadata {
    ImageMetadata {
        md5: format!("{:x}", md5::compute(payload)),
        size: payload.len() as u64,
        name: extract_header_name(payload),
    }
}

/// Scans the header window (bytes 48–512) for a line of the form
/// `Name=<word/space characters>` terminated by CRLF or a bare LF.
///
/// Best-effort: a missing or malformed line yields an empty string and
/// never blocks the upload.
pub fn extract_header_name(payload: &[u8]) -> String {
    static NAME_LINE: OnceLock<Regex> = OnceLock::new();
    let re = NAME_LINE.get_or_init(|| Regex::new(r"Name=([\w ]+)\r?\n").unwrap());

    let start = NAME_WINDOW.start.min(payload.len());
    let end = NAME_WINDOW.end.min(payload.len());

    re.captures(&payload[start..end])
        .and_then(|caps| caps.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a payload with `line` placed at byte offset `at`.
    fn payload_with(line: &[u8], at: usize) -> Vec<u8> {
        let mut payload = vec![0u8; 1024];
        payload[at..at + line.len()].copy_from_slice(line);
        payload
    }

    #[test]
    fn extracts_name_with_crlf() {
        let payload = payload_with(b"Name=Foo Bar\r\n", 64);
        assert_eq!(extract_header_name(&payload), "Foo Bar");
    }

    #[test]
    fn extracts_name_with_bare_lf() {
        let payload = payload_with(b"Name=Snake\n", 100);
        assert_eq!(extract_header_name(&payload), "Snake");
    }

    #[test]
    fn missing_name_yields_empty_string() {
        let payload = vec![0u8; 1024];
        assert_eq!(extract_header_name(&payload), "");
    }

    #[test]
    fn name_outside_window_is_ignored() {
        // Before byte 48 and after byte 512 the window must not match.
        let early = payload_with(b"Name=Early\n", 8);
        assert_eq!(extract_header_name(&early), "");

        let late = payload_with(b"Name=Late\n", 600);
        assert_eq!(extract_header_name(&late), "");
    }

    #[test]
    fn short_payload_does_not_panic() {
        assert_eq!(extract_header_name(b"tiny"), "");
        assert_eq!(extract_header_name(&[]), "");
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let meta = inspect_image(b"hello");
        assert_eq!(meta.md5, "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(meta.size, 5);
        assert_eq!(meta.name, "");
    }

    #[test]
    fn inspect_combines_digest_and_name() {
        let payload = payload_with(b"Name=Breakout\r\n", 48);
        let meta = inspect_image(&payload);
        assert_eq!(meta.name, "Breakout");
        assert_eq!(meta.size, 1024);
        assert_eq!(meta.md5.len(), 32);
    }
}
