//! Saving an image record as WebP.

use crate::config::LoaderConfig;
use crate::progress::{Progress, ProgressUpdate};
use crate::quality::quality_for;
use crate::{ImageRecord, LoaderError};

/// What a successful save produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Quality passed to the encoder.
    pub quality: u8,
    /// Size of the written file.
    pub bytes_written: usize,
}

/// A single save call for an image record.
///
/// Quality comes from the record's `compression` / `quality` tags (see
/// [`crate::quality`]) unless overridden with
/// [`with_quality`](Self::with_quality).
///
/// # Example
///
/// ```no_run
/// use zenwebp_loader::{ImageRecord, LoaderConfig, SaveRequest};
/// use zenwebp_loader::pixel::{Bgra, BgraImage};
///
/// let pixels = BgraImage::new(vec![Bgra { b: 0u8, g: 0, r: 255, a: 255 }; 64 * 64], 64, 64);
/// let mut image = ImageRecord::from_pixels("red.webp", pixels, false);
/// image.set_tag("quality", 90);
/// let outcome = SaveRequest::new(&image, &LoaderConfig::default()).run()?;
/// assert_eq!(outcome.quality, 90);
/// # Ok::<(), zenwebp_loader::LoaderError>(())
/// ```
pub struct SaveRequest<'a> {
    image: &'a ImageRecord,
    config: &'a LoaderConfig,
    progress: Option<&'a mut dyn Progress>,
    granularity: u8,
    quality: Option<u8>,
}

impl<'a> SaveRequest<'a> {
    /// Create a save request.
    pub fn new(image: &'a ImageRecord, config: &'a LoaderConfig) -> Self {
        Self {
            image,
            config,
            progress: None,
            granularity: 0,
            quality: None,
        }
    }

    /// Set a progress callback.
    pub fn with_progress(mut self, progress: &'a mut dyn Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Set the progress granularity. Accepted for compatibility; the loader
    /// only reports completion.
    pub fn with_granularity(mut self, granularity: u8) -> Self {
        self.granularity = granularity;
        self
    }

    /// Use this quality (clamped to 0-100) instead of the record's tags.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality.min(100));
        self
    }

    /// Encode and write the file.
    pub fn run(self) -> Result<SaveOutcome, LoaderError> {
        let SaveRequest {
            image,
            config,
            progress,
            granularity,
            quality,
        } = self;

        let pixels = image.pixels().ok_or(LoaderError::NoPixelData)?;
        let quality = quality.unwrap_or_else(|| quality_for(image, config.default_quality));
        log::debug!(
            "encoding {}x{} for {} at quality {} (granularity {})",
            pixels.width(),
            pixels.height(),
            image.path().display(),
            quality,
            granularity
        );

        let webp = crate::codecs::webp::encode_bgra(pixels.as_ref(), quality, config.lossy.as_deref())?;
        let bytes_written = crate::io::write_file(image.path(), &webp)?;

        if let Some(progress) = progress {
            progress.update(image, ProgressUpdate::COMPLETE);
        }

        Ok(SaveOutcome {
            quality,
            bytes_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn no_pixels_does_not_touch_file() {
        let config = LoaderConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.webp");

        let image = ImageRecord::new(&path);
        let err = SaveRequest::new(&image, &config).run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoPixelData);
        assert!(!path.exists());
    }

    #[test]
    fn existing_file_survives_failed_save() {
        let config = LoaderConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.webp");
        std::fs::write(&path, b"previous contents").unwrap();

        let image = ImageRecord::new(&path);
        assert!(SaveRequest::new(&image, &config).run().is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"previous contents");
    }
}
