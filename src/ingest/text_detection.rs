// src/ingest/text_detection.rs

use content_inspector::ContentType;
use std::str;

/// Checks if a byte buffer is likely text.
///
/// `content_inspector` decides between text and binary from the head of the
/// buffer; UTF-8 candidates must additionally decode as valid UTF-8.
///
/// # Examples
/// ```
/// use digest_runner::ingest::is_likely_text_from_buffer;
///
/// assert!(is_likely_text_from_buffer(b"KEY = \"value\"\n"));
/// assert!(!is_likely_text_from_buffer(b"\x89PNG\r\n\x1a\n\0\0"));
/// assert!(!is_likely_text_from_buffer(&[0x48, 0x65, 0x80, 0x6f]));
/// ```
pub fn is_likely_text_from_buffer(buffer: &[u8]) -> bool {
    match content_inspector::inspect(buffer) {
        ContentType::UTF_8_BOM => true,
        ContentType::UTF_8 => str::from_utf8(buffer).is_ok(),
        _ => false,
    }
}
