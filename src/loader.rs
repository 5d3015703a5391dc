//! The host-facing loader interface.

use std::path::Path;

use crate::config::LoaderConfig;
use crate::decode::{LoadOutcome, LoadRequest};
use crate::encode::{SaveOutcome, SaveRequest};
use crate::format::{has_webp_signature, is_webp_extension, WEBP_FORMAT};
use crate::probe::{probe, Features};
use crate::progress::Progress;
use crate::{ImageRecord, LoaderError};

/// A format plugin the host can register.
///
/// Implementors provide [`try_load`](Self::try_load) and
/// [`try_save`](Self::try_save); the boolean [`load`](Self::load) and
/// [`save`](Self::save) entry points log the error and report failure.
pub trait ImageLoader: Send + Sync {
    /// Loader name, stored on records this loader claims.
    fn name(&self) -> &str;

    /// Format names this loader handles.
    fn formats(&self) -> Vec<String>;

    /// Whether this loader recognizes the file, by extension or by the
    /// leading bytes when supplied.
    fn claims(&self, path: &Path, data: Option<&[u8]>) -> bool;

    /// Probe features from encoded bytes.
    fn probe(&self, data: &[u8]) -> Result<Features, LoaderError>;

    /// Load `image` from its path.
    fn try_load(
        &self,
        image: &mut ImageRecord,
        progress: Option<&mut dyn Progress>,
        granularity: u8,
        immediate: bool,
    ) -> Result<LoadOutcome, LoaderError>;

    /// Save `image` to its path.
    fn try_save(
        &self,
        image: &ImageRecord,
        progress: Option<&mut dyn Progress>,
        granularity: u8,
    ) -> Result<SaveOutcome, LoaderError>;

    /// Load `image` from its path. Returns `true` on success.
    fn load(
        &self,
        image: &mut ImageRecord,
        progress: Option<&mut dyn Progress>,
        granularity: u8,
        immediate: bool,
    ) -> bool {
        match self.try_load(image, progress, granularity, immediate) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("{} load of {} failed: {e}", self.name(), image.path().display());
                false
            }
        }
    }

    /// Save `image` to its path. Returns `true` on success.
    fn save(
        &self,
        image: &ImageRecord,
        progress: Option<&mut dyn Progress>,
        granularity: u8,
    ) -> bool {
        match self.try_save(image, progress, granularity) {
            Ok(outcome) => {
                log::debug!(
                    "saved {} ({} bytes, quality {})",
                    image.path().display(),
                    outcome.bytes_written,
                    outcome.quality
                );
                true
            }
            Err(e) => {
                log::warn!("{} save to {} failed: {e}", self.name(), image.path().display());
                false
            }
        }
    }
}

/// WebP loader backed by zenwebp.
#[derive(Clone, Debug, Default)]
pub struct WebpLoader {
    config: LoaderConfig,
}

impl WebpLoader {
    /// Loader name.
    pub const NAME: &'static str = "webp";

    /// A loader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader with the given configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

impl ImageLoader for WebpLoader {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn formats(&self) -> Vec<String> {
        vec![WEBP_FORMAT.to_string()]
    }

    fn claims(&self, path: &Path, data: Option<&[u8]>) -> bool {
        match data {
            Some(data) => has_webp_signature(data),
            None => is_webp_extension(path),
        }
    }

    fn probe(&self, data: &[u8]) -> Result<Features, LoaderError> {
        probe(data, self.config.probe)
    }

    fn try_load(
        &self,
        image: &mut ImageRecord,
        progress: Option<&mut dyn Progress>,
        granularity: u8,
        immediate: bool,
    ) -> Result<LoadOutcome, LoaderError> {
        let mut request = LoadRequest::new(image, &self.config)
            .with_granularity(granularity)
            .immediate(immediate);
        if let Some(progress) = progress {
            request = request.with_progress(progress);
        }
        request.run()
    }

    fn try_save(
        &self,
        image: &ImageRecord,
        progress: Option<&mut dyn Progress>,
        granularity: u8,
    ) -> Result<SaveOutcome, LoaderError> {
        let mut request = SaveRequest::new(image, &self.config).with_granularity(granularity);
        if let Some(progress) = progress {
            request = request.with_progress(progress);
        }
        request.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_webp_only() {
        let loader = WebpLoader::new();
        assert_eq!(loader.name(), "webp");
        assert_eq!(loader.formats(), vec!["webp".to_string()]);
    }

    #[test]
    fn claims_by_extension_or_magic() {
        let loader = WebpLoader::new();
        assert!(loader.claims(Path::new("x.WEBP"), None));
        assert!(!loader.claims(Path::new("x.png"), None));
        assert!(loader.claims(Path::new("x.png"), Some(b"RIFF\0\0\0\0WEBPVP8 ")));
        assert!(!loader.claims(Path::new("x.webp"), Some(b"\x89PNG\r\n\x1a\n")));
    }

    #[test]
    fn save_without_pixels_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.webp");
        let image = ImageRecord::new(&path);
        assert!(!WebpLoader::new().save(&image, None, 0));
        assert!(!path.exists());
    }

    #[test]
    fn load_missing_file_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut image = ImageRecord::new(dir.path().join("nope.webp"));
        assert!(!WebpLoader::new().load(&mut image, None, 0, true));
        assert!(image.format.is_none());
    }
}
