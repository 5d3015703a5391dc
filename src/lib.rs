//! # zenwebp-loader
//!
//! WebP loader plugin for image hosts, built on zenwebp.
//!
//! A host registers a [`WebpLoader`] in a [`LoaderRegistry`] (or drives it
//! through the [`ImageLoader`] trait) and gets:
//!
//! - a cheap probe pass that stamps dimensions, alpha and the `"webp"` format
//!   name on an [`ImageRecord`] without decoding pixels;
//! - a pixel decode to BGRA, using the first frame of animated files;
//! - lossy saving, with quality taken from the record's `compression` or
//!   `quality` tags.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zenwebp_loader::LoaderRegistry;
//!
//! let registry = LoaderRegistry::with_webp();
//!
//! // Probe: dimensions only
//! let mut image = registry.open("photo.webp")?;
//! println!("{}x{} alpha={}", image.width, image.height, image.has_alpha());
//!
//! // Decode pixels, then save a smaller copy
//! registry.load_pixels(&mut image, None)?;
//! image.path = "photo-small.webp".into();
//! image.set_tag("quality", 60);
//! registry.save(&image, None)?;
//! # Ok::<(), zenwebp_loader::LoaderError>(())
//! ```

#![forbid(unsafe_code)]

mod codecs;
pub mod config;
mod decode;
mod encode;
mod error;
pub mod format;
pub mod io;
mod limits;
mod loader;
pub mod pixel;
pub mod probe;
mod progress;
pub mod quality;
mod record;
mod registry;

pub use config::LoaderConfig;
pub use decode::{LoadOutcome, LoadRequest};
pub use encode::{SaveOutcome, SaveRequest};
pub use error::{CodecStage, ErrorKind, LoaderError};
pub use format::{WEBP_FORMAT, WEBP_MIME};
pub use limits::{Limits, HOST_MAX_DIMENSION, HOST_MAX_PIXELS};
pub use loader::{ImageLoader, WebpLoader};
pub use probe::{Features, ProbeStrategy};
pub use progress::{Progress, ProgressUpdate};
pub use record::{ImageFlags, ImageRecord, ImageTag};
pub use registry::LoaderRegistry;
