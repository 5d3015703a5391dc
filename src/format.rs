//! WebP format identity and magic-byte detection.

use std::path::Path;

/// Format name advertised to the host and stamped on loaded records.
pub const WEBP_FORMAT: &str = "webp";

/// MIME type string.
pub const WEBP_MIME: &str = "image/webp";

/// Common file extensions.
pub const WEBP_EXTENSIONS: &[&str] = &["webp"];

/// Whether `data` starts with a RIFF container carrying a WEBP form type.
///
/// Checks only the 12-byte container header; the chunk payload is left to the
/// prober.
pub fn has_webp_signature(data: &[u8]) -> bool {
    // WebP: "RIFF....WEBP"
    data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP"
}

/// Lowercased file extension of `path`, if any.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Whether the file extension names WebP (case-insensitive).
pub fn is_webp_extension(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| WEBP_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_webp() {
        let mut data = b"RIFF\x10\x00\x00\x00WEBPVP8 ".to_vec();
        assert!(has_webp_signature(&data));

        data[9] = b'X';
        assert!(!has_webp_signature(&data));
    }

    #[test]
    fn detect_other_riff() {
        assert!(!has_webp_signature(b"RIFF\x10\x00\x00\x00WAVEfmt "));
        assert!(!has_webp_signature(b"RIFF"));
        assert!(!has_webp_signature(&[0x89, 0x50, 0x4E, 0x47]));
    }

    #[test]
    fn extensions() {
        assert!(is_webp_extension(Path::new("a/b/photo.webp")));
        assert!(is_webp_extension(Path::new("PHOTO.WebP")));
        assert!(!is_webp_extension(Path::new("photo.png")));
        assert!(!is_webp_extension(Path::new("webp")));
        assert_eq!(extension_of(Path::new("x.JPG")).as_deref(), Some("jpg"));
    }
}
