//! Feature probing without a full pixel decode.
//!
//! Two capabilities sit behind [`probe`]:
//!
//! - the codec probe, which reports dimensions, alpha and animation;
//! - a header-only probe equivalent to an old codec's "get info" call, which
//!   reports dimensions only. Alpha and animation are always `false` there.
//!
//! [`ProbeStrategy`] picks one at runtime. Callers only ever see
//! [`Features`].

use std::path::Path;

use crate::format::has_webp_signature;
use crate::LoaderError;

/// What a probe learns about a WebP stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Features {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Whether the stream carries alpha.
    pub has_alpha: bool,
    /// Whether the stream is an animation.
    pub has_animation: bool,
}

impl Features {
    /// The same dimensions with alpha and animation unknown (reported false).
    pub fn dimensions_only(self) -> Self {
        Features {
            has_alpha: false,
            has_animation: false,
            ..self
        }
    }
}

/// Which probe capability to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProbeStrategy {
    /// Whichever capability is richer. zenwebp always extracts full
    /// features, so this resolves to [`ProbeStrategy::Codec`].
    #[default]
    Auto,
    /// Codec probe only.
    Codec,
    /// Header-only probe: dimensions, no alpha or animation.
    HeaderOnly,
}

/// Probe `data` for WebP features.
///
/// Fails with [`LoaderError::UnsupportedFormat`] if the data is not a WebP
/// stream the selected strategy can parse.
pub fn probe(data: &[u8], strategy: ProbeStrategy) -> Result<Features, LoaderError> {
    if !has_webp_signature(data) {
        return Err(LoaderError::UnsupportedFormat(
            "missing RIFF/WEBP signature".into(),
        ));
    }

    match strategy {
        ProbeStrategy::Auto | ProbeStrategy::Codec => crate::codecs::webp::probe(data),
        ProbeStrategy::HeaderOnly => header_only(data),
    }
}

/// Read a file and probe it.
pub fn probe_file(path: &Path, strategy: ProbeStrategy) -> Result<Features, LoaderError> {
    let data = crate::io::read_file(path)?;
    probe(&data, strategy)
}

fn header_only(data: &[u8]) -> Result<Features, LoaderError> {
    parse_header(data)
        .map(Features::dimensions_only)
        .ok_or_else(|| LoaderError::UnsupportedFormat("unrecognized WebP chunk header".into()))
}

// ---------------------------------------------------------------------------
// RIFF header (12) + first chunk header (8) + chunk-specific fields.
//
// Three sub-formats at offset 12:
// - VP8X (extended): flags at byte 20, canvas dimensions at 24..30 (24-bit LE, +1)
// - VP8  (lossy): keyframe tag at 20..23, dimensions at 26..30 (LE u16, masked to 14 bits)
// - VP8L (lossless): signature 0x2F at byte 20, dimensions bit-packed in bytes 21..25
// ---------------------------------------------------------------------------

/// Parse the leading bytes of a WebP stream.
///
/// Works on truncated prefixes: only the first 30 bytes are examined.
/// Returns `None` if the header is unrecognized or too short.
pub fn parse_header(data: &[u8]) -> Option<Features> {
    if !has_webp_signature(data) || data.len() < 16 {
        return None;
    }

    let features = match &data[12..16] {
        b"VP8X" => {
            if data.len() < 30 {
                return None;
            }
            let flags = data[20];
            // Canvas size is stored as (size - 1) in 24-bit LE
            let canvas_w = u32::from_le_bytes([data[24], data[25], data[26], 0]);
            let canvas_h = u32::from_le_bytes([data[27], data[28], data[29], 0]);
            Features {
                width: canvas_w + 1,
                height: canvas_h + 1,
                has_alpha: (flags & 0x10) != 0,
                has_animation: (flags & 0x02) != 0,
            }
        }
        b"VP8 " => {
            // Frame tag at 20..23, keyframe start code at 23..26
            if data.len() < 30 || data[23..26] != [0x9D, 0x01, 0x2A] {
                return None;
            }
            let width = u16::from_le_bytes([data[26], data[27]]) & 0x3FFF;
            let height = u16::from_le_bytes([data[28], data[29]]) & 0x3FFF;
            Features {
                width: u32::from(width),
                height: u32::from(height),
                has_alpha: false,
                has_animation: false,
            }
        }
        b"VP8L" => {
            if data.len() < 25 || data[20] != 0x2F {
                return None;
            }
            let bits = u32::from_le_bytes([data[21], data[22], data[23], data[24]]);
            Features {
                width: (bits & 0x3FFF) + 1,
                height: ((bits >> 14) & 0x3FFF) + 1,
                has_alpha: (bits >> 28) & 1 != 0,
                has_animation: false,
            }
        }
        _ => return None,
    };

    Some(features)
}
