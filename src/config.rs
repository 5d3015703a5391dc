//! Loader configuration and codec re-exports.
//!
//! [`LoaderConfig`] bundles everything a [`WebpLoader`](crate::WebpLoader)
//! needs beyond the image record itself: dimension limits, the probe
//! capability, the fallback quality, and optional zenwebp overrides.

use crate::limits::Limits;
use crate::probe::ProbeStrategy;
use crate::quality::DEFAULT_QUALITY;

/// WebP configuration types from zenwebp.
pub mod webp {
    pub use zenwebp::decoder::UpsamplingMethod;
    pub use zenwebp::{DecodeConfig, LossyConfig, Preset};
}

/// Loader configuration.
///
/// # Example
///
/// ```
/// use zenwebp_loader::{Limits, LoaderConfig, ProbeStrategy};
///
/// let config = LoaderConfig::default()
///     .with_limits(Limits::none())
///     .with_probe(ProbeStrategy::HeaderOnly)
///     .with_default_quality(90);
/// assert_eq!(config.default_quality, 90);
/// ```
#[derive(Clone)]
#[non_exhaustive]
pub struct LoaderConfig {
    /// Accepted image dimensions.
    pub limits: Limits,
    /// Which probe capability to use.
    pub probe: ProbeStrategy,
    /// Quality when the record carries no quality hints.
    pub default_quality: u8,
    /// Decoder settings (upsampling, memory limit).
    pub decoder: webp::DecodeConfig,
    /// Lossy encoder base settings. Quality is always replaced by the
    /// resolved quality.
    pub lossy: Option<Box<webp::LossyConfig>>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            limits: Limits::host_default(),
            probe: ProbeStrategy::Auto,
            default_quality: DEFAULT_QUALITY,
            decoder: webp::DecodeConfig::default(),
            lossy: None,
        }
    }
}

impl LoaderConfig {
    /// Set dimension limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the probe capability.
    pub fn with_probe(mut self, probe: ProbeStrategy) -> Self {
        self.probe = probe;
        self
    }

    /// Set the fallback quality (clamped to 0-100).
    pub fn with_default_quality(mut self, quality: u8) -> Self {
        self.default_quality = quality.min(100);
        self
    }

    /// Set decoder configuration.
    pub fn with_decoder(mut self, config: webp::DecodeConfig) -> Self {
        self.decoder = config;
        self
    }

    /// Set lossy encoder base configuration.
    pub fn with_lossy(mut self, config: webp::LossyConfig) -> Self {
        self.lossy = Some(Box::new(config));
        self
    }
}

impl core::fmt::Debug for LoaderConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoaderConfig")
            .field("limits", &self.limits)
            .field("probe", &self.probe)
            .field("default_quality", &self.default_quality)
            .field("decoder", &self.decoder)
            .field("lossy", &self.lossy.is_some())
            .finish()
    }
}
