//! Unified error types for load and save operations.

use std::path::PathBuf;

/// Coarse error taxonomy.
///
/// Every [`LoaderError`] maps onto exactly one kind. Hosts that only care
/// about "why did it fail" match on this instead of the full enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Open, stat, allocate, read or write failure.
    Io,
    /// The data does not parse as a WebP bitstream.
    UnsupportedFormat,
    /// Image dimensions are outside the accepted bounds.
    Dimensions,
    /// The decode or encode call itself failed.
    Codec,
    /// Save was asked to persist a record without pixels.
    NoPixelData,
}

/// Which codec call failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodecStage {
    /// Demuxing an animated container.
    Demux,
    /// Pixel decode.
    Decode,
    /// Pixel encode.
    Encode,
}

impl core::fmt::Display for CodecStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CodecStage::Demux => f.write_str("demux"),
            CodecStage::Decode => f.write_str("decode"),
            CodecStage::Encode => f.write_str("encode"),
        }
    }
}

/// Error type for loader operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoaderError {
    /// The file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata lookup, read or write failed after opening.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The read buffer could not be allocated.
    #[error("cannot allocate {0} bytes for file contents")]
    Alloc(u64),

    /// Fewer bytes were read than the file's reported size.
    #[error("short read on {}: expected {expected} bytes, got {actual}", path.display())]
    ShortRead {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// Fewer bytes were written than the encoder produced.
    #[error("short write on {}: wrote {written} of {expected} bytes", path.display())]
    ShortWrite {
        path: PathBuf,
        expected: usize,
        written: usize,
    },

    /// Header does not parse as WebP.
    #[error("not a WebP bitstream: {0}")]
    UnsupportedFormat(String),

    /// Dimensions rejected by [`Limits`](crate::Limits).
    #[error("image dimensions {width}x{height} rejected: {reason}")]
    Dimensions {
        width: u32,
        height: u32,
        reason: &'static str,
    },

    /// The animation does not contain the requested frame.
    #[error("animation has no frame {0}")]
    MissingFrame(u32),

    /// Underlying codec error.
    #[error("WebP {stage} failed: {source}")]
    Codec {
        stage: CodecStage,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The image record carries no pixel data.
    #[error("image has no pixel data")]
    NoPixelData,
}

impl LoaderError {
    /// Wrap a codec-specific error.
    pub fn codec<E>(stage: CodecStage, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        LoaderError::Codec {
            stage,
            source: Box::new(error),
        }
    }

    /// A codec failure with no underlying error value (e.g. empty output).
    pub(crate) fn codec_msg(stage: CodecStage, msg: &'static str) -> Self {
        LoaderError::Codec {
            stage,
            source: msg.into(),
        }
    }

    /// Map onto the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoaderError::Open { .. }
            | LoaderError::Io { .. }
            | LoaderError::Alloc(_)
            | LoaderError::ShortRead { .. }
            | LoaderError::ShortWrite { .. } => ErrorKind::Io,
            LoaderError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            LoaderError::Dimensions { .. } => ErrorKind::Dimensions,
            LoaderError::MissingFrame(_) | LoaderError::Codec { .. } => ErrorKind::Codec,
            LoaderError::NoPixelData => ErrorKind::NoPixelData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let io = LoaderError::ShortRead {
            path: PathBuf::from("a.webp"),
            expected: 10,
            actual: 4,
        };
        assert_eq!(io.kind(), ErrorKind::Io);
        assert_eq!(LoaderError::Alloc(1 << 40).kind(), ErrorKind::Io);
        assert_eq!(LoaderError::MissingFrame(1).kind(), ErrorKind::Codec);
        assert_eq!(
            LoaderError::UnsupportedFormat("bad riff".into()).kind(),
            ErrorKind::UnsupportedFormat
        );
    }

    #[test]
    fn codec_error_keeps_source() {
        let inner = std::io::Error::other("boom");
        let err = LoaderError::codec(CodecStage::Decode, inner);
        assert_eq!(err.kind(), ErrorKind::Codec);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "WebP decode failed: boom");
    }

    #[test]
    fn display_short_write() {
        let err = LoaderError::ShortWrite {
            path: PathBuf::from("out.webp"),
            expected: 100,
            written: 40,
        };
        assert_eq!(
            err.to_string(),
            "short write on out.webp: wrote 40 of 100 bytes"
        );
    }
}
