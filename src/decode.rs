//! Loading a WebP file into an image record.

use crate::config::LoaderConfig;
use crate::format::WEBP_FORMAT;
use crate::probe::{probe, Features};
use crate::progress::{Progress, ProgressUpdate};
use crate::record::ImageFlags;
use crate::{ImageRecord, LoaderError};

/// How far a load call got.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Pixel data was already attached; nothing was read.
    AlreadyLoaded,
    /// Header probed and record stamped; pixels not decoded.
    Probed(Features),
    /// Pixels decoded and attached.
    Decoded {
        features: Features,
        /// Whether the first frame of an animation was used.
        animated: bool,
    },
}

impl LoadOutcome {
    /// Whether pixel data is attached after this outcome.
    pub fn has_pixels(&self) -> bool {
        !matches!(self, LoadOutcome::Probed(_))
    }
}

/// A single load call against an image record.
///
/// Without a loader hint on the record, the immediate flag, or a progress
/// callback, the request only probes: the record gets its dimensions, alpha
/// flag and format name, and the pixels stay unset. That keeps directory
/// scans cheap.
///
/// # Example
///
/// ```no_run
/// use zenwebp_loader::{ImageRecord, LoadRequest, LoaderConfig};
///
/// let config = LoaderConfig::default();
/// let mut image = ImageRecord::new("photo.webp");
/// LoadRequest::new(&mut image, &config).immediate(true).run()?;
/// assert!(image.has_pixels());
/// # Ok::<(), zenwebp_loader::LoaderError>(())
/// ```
pub struct LoadRequest<'a> {
    image: &'a mut ImageRecord,
    config: &'a LoaderConfig,
    progress: Option<&'a mut dyn Progress>,
    granularity: u8,
    immediate: bool,
}

impl<'a> LoadRequest<'a> {
    /// Create a load request.
    pub fn new(image: &'a mut ImageRecord, config: &'a LoaderConfig) -> Self {
        Self {
            image,
            config,
            progress: None,
            granularity: 0,
            immediate: false,
        }
    }

    /// Set a progress callback. Supplying one forces a pixel decode.
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

    /// Decode pixels now rather than only probing.
    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Run the load.
    pub fn run(self) -> Result<LoadOutcome, LoaderError> {
        let LoadRequest {
            image,
            config,
            progress,
            granularity,
            immediate,
        } = self;

        if image.has_pixels() {
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let data = crate::io::read_file(image.path())?;
        let features = probe(&data, config.probe)?;
        log::debug!(
            "probed {}: {}x{} alpha={} animated={}",
            image.path().display(),
            features.width,
            features.height,
            features.has_alpha,
            features.has_animation
        );

        let first_pass = image.loader.is_none();
        if first_pass {
            config.limits.validate(features.width, features.height)?;
            image.width = features.width;
            image.height = features.height;
            image.flags.set(ImageFlags::HAS_ALPHA, features.has_alpha);
            image.format = Some(WEBP_FORMAT.to_string());
        }

        let materialize = !first_pass || immediate || progress.is_some();
        if !materialize {
            return Ok(LoadOutcome::Probed(features));
        }

        config.limits.validate(features.width, features.height)?;

        let pixels = if features.has_animation {
            crate::codecs::webp::decode_first_frame(&data, &features, &config.decoder)?
        } else {
            crate::codecs::webp::decode_still(&data, &features, &config.decoder)?
        };
        drop(data);

        image.set_pixels(pixels);
        log::debug!(
            "decoded {} ({}, granularity {})",
            image.path().display(),
            if features.has_animation {
                "first animation frame"
            } else {
                "still"
            },
            granularity
        );

        if let Some(progress) = progress {
            progress.update(image, ProgressUpdate::COMPLETE);
        }

        Ok(LoadOutcome::Decoded {
            features,
            animated: features.has_animation,
        })
    }
}
