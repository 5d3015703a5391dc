//! Encode quality from host tags.
//!
//! Two tags feed the quality used for a save:
//!
//! | Tag           | Range | Mapping                                   |
//! |---------------|-------|-------------------------------------------|
//! | `compression` | 0-9   | `(9 - c) * 10 * 10 / 9`, integer division |
//! | `quality`     | 1-100 | passed through, clamped                   |
//!
//! `quality` wins when both are present. Neither present means the default
//! (75). The compression mapping truncates at each step, so compression 9
//! yields quality 0 and compression 4 yields 55, not 55.5.

use crate::ImageRecord;

/// Quality used when no tag is attached.
pub const DEFAULT_QUALITY: u8 = 75;

/// Tag holding a zlib-style compression level (0 = least).
pub const COMPRESSION_TAG: &str = "compression";

/// Tag holding an explicit quality (1-100).
pub const QUALITY_TAG: &str = "quality";

/// Resolve the effective quality from optional tag values.
pub fn resolve_quality(compression: Option<i32>, quality: Option<i32>, default: u8) -> u8 {
    let mut resolved = default;

    if let Some(compression) = compression {
        let compression = compression.clamp(0, 9);
        let q = (9 - compression) * 10;
        resolved = (q * 10 / 9) as u8;
    }

    if let Some(quality) = quality {
        resolved = quality.clamp(1, 100) as u8;
    }

    resolved
}

/// Resolve the effective quality from the tags attached to `image`.
pub fn quality_for(image: &ImageRecord, default: u8) -> u8 {
    resolve_quality(
        image.tag(COMPRESSION_TAG).map(|t| t.value),
        image.tag(QUALITY_TAG).map(|t| t.value),
        default,
    )
}
