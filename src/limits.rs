//! Resource limits for decode operations.

use crate::LoaderError;

/// Largest side length the host accepts (exclusive bound of 32767).
pub const HOST_MAX_DIMENSION: u64 = 32766;

/// Largest pixel count the host accepts.
pub const HOST_MAX_PIXELS: u64 = (1 << 29) - 1;

/// Resource limits for load operations.
///
/// Checked after probing and before any pixel allocation, so degenerate or
/// adversarial headers never reach the allocator. Zero-sized images are
/// always rejected regardless of the configured limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum image width in pixels.
    pub max_width: Option<u64>,
    /// Maximum image height in pixels.
    pub max_height: Option<u64>,
    /// Maximum total pixels (width × height).
    pub max_pixels: Option<u64>,
    /// Maximum decoded buffer size in bytes (4 bytes per pixel).
    pub max_memory_bytes: Option<u64>,
}

impl Default for Limits {
    fn default() -> Self {
        Self::host_default()
    }
}

impl Limits {
    /// Create a new Limits with no restrictions beyond non-zero size.
    pub fn none() -> Self {
        Self {
            max_width: None,
            max_height: None,
            max_pixels: None,
            max_memory_bytes: None,
        }
    }

    /// The dimension bounds the host image library accepts.
    pub fn host_default() -> Self {
        Self {
            max_width: Some(HOST_MAX_DIMENSION),
            max_height: Some(HOST_MAX_DIMENSION),
            max_pixels: Some(HOST_MAX_PIXELS),
            max_memory_bytes: None,
        }
    }

    /// Check if dimensions are within limits.
    ///
    /// Returns `Err` with a description if any limit is exceeded.
    pub fn check_dimensions(&self, width: u64, height: u64) -> Result<(), &'static str> {
        if width == 0 || height == 0 {
            return Err("zero-sized image");
        }

        if let Some(max_width) = self.max_width {
            if width > max_width {
                return Err("width exceeds limit");
            }
        }

        if let Some(max_height) = self.max_height {
            if height > max_height {
                return Err("height exceeds limit");
            }
        }

        let pixels = width.saturating_mul(height);
        if let Some(max_pixels) = self.max_pixels {
            if pixels > max_pixels {
                return Err("pixel count exceeds limit");
            }
        }

        if let Some(max_memory) = self.max_memory_bytes {
            if pixels.saturating_mul(4) > max_memory {
                return Err("decoded buffer exceeds memory limit");
            }
        }

        Ok(())
    }

    /// [`check_dimensions`](Self::check_dimensions) as a [`LoaderError`].
    pub fn validate(&self, width: u32, height: u32) -> Result<(), LoaderError> {
        self.check_dimensions(u64::from(width), u64::from(height))
            .map_err(|reason| LoaderError::Dimensions {
                width,
                height,
                reason,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn limits_none() {
        let limits = Limits::none();
        assert!(limits.check_dimensions(u64::MAX, u64::MAX).is_ok());
        assert!(limits.check_dimensions(0, 10).is_err());
    }

    #[test]
    fn host_bounds() {
        let limits = Limits::host_default();
        assert!(limits.check_dimensions(1, 1).is_ok());
        assert!(limits.check_dimensions(32766, 16383).is_ok());
        assert!(limits.check_dimensions(32767, 1).is_err());
        assert!(limits.check_dimensions(1, 32767).is_err());
        // 32766 * 32766 exceeds the pixel cap
        assert!(limits.check_dimensions(32766, 32766).is_err());
        assert!(limits.check_dimensions(0, 0).is_err());
    }

    #[test]
    fn limits_memory() {
        let limits = Limits {
            max_memory_bytes: Some(1_000_000),
            ..Limits::none()
        };

        assert!(limits.check_dimensions(500, 500).is_ok()); // 1,000,000 bytes
        assert!(limits.check_dimensions(501, 500).is_err());
    }

    #[test]
    fn validate_reports_dimensions() {
        let err = Limits::host_default().validate(40000, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimensions);
        assert!(matches!(
            err,
            LoaderError::Dimensions {
                width: 40000,
                height: 10,
                ..
            }
        ));
    }
}
