//! The host-side image record a loader populates.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::pixel::BgraImage;

/// Per-image flag bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImageFlags(u8);

impl ImageFlags {
    /// No flags set.
    pub const EMPTY: Self = ImageFlags(0);
    /// Pixel data carries meaningful alpha.
    pub const HAS_ALPHA: Self = ImageFlags(1 << 0);

    /// Whether every bit of `other` is set.
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Set the bits of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the bits of `other`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Set or clear the bits of `other`.
    pub fn set(&mut self, other: Self, enabled: bool) {
        if enabled {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

/// A named integer hint attached to an image, e.g. `quality=90`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageTag {
    pub key: String,
    pub value: i32,
}

/// Host image record.
///
/// Loaders set `width`, `height`, `flags`, `format` and pixel data; the host
/// owns everything else. `loader` is the hint the host sets once a loader has
/// claimed the file in a probe pass, and is what turns a later load call into
/// a pixel decode.
#[derive(Debug, Default)]
pub struct ImageRecord {
    /// File used for both load and save.
    pub path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Flag bits.
    pub flags: ImageFlags,
    /// Detected format name.
    pub format: Option<String>,
    /// Name of the loader that claimed this record.
    pub loader: Option<String>,
    tags: HashMap<String, ImageTag>,
    pixels: Option<BgraImage>,
}

impl ImageRecord {
    /// An empty record for `path`, nothing loaded yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// A record that already holds pixels, ready to be saved to `path`.
    pub fn from_pixels(path: impl Into<PathBuf>, pixels: BgraImage, has_alpha: bool) -> Self {
        let mut record = Self::new(path);
        record.flags.set(ImageFlags::HAS_ALPHA, has_alpha);
        record.set_pixels(pixels);
        record
    }

    /// File path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether pixel data is attached.
    pub fn has_pixels(&self) -> bool {
        self.pixels.is_some()
    }

    /// Attached pixel data.
    pub fn pixels(&self) -> Option<&BgraImage> {
        self.pixels.as_ref()
    }

    /// Attach pixel data, taking ownership.
    ///
    /// Width and height follow the buffer. A strided buffer is compacted so
    /// the attached data always has stride equal to width.
    pub fn set_pixels(&mut self, pixels: BgraImage) {
        let pixels = if pixels.stride() == pixels.width() {
            pixels
        } else {
            let (buf, w, h) = pixels.as_ref().to_contiguous_buf();
            BgraImage::new(buf.into_owned(), w, h)
        };
        self.width = pixels.width() as u32;
        self.height = pixels.height() as u32;
        self.pixels = Some(pixels);
    }

    /// Detach pixel data, handing ownership back to the caller.
    pub fn take_pixels(&mut self) -> Option<BgraImage> {
        self.pixels.take()
    }

    /// Whether the alpha flag is set.
    pub fn has_alpha(&self) -> bool {
        self.flags.contains(ImageFlags::HAS_ALPHA)
    }

    /// Look up a tag by name.
    pub fn tag(&self, key: &str) -> Option<&ImageTag> {
        self.tags.get(key)
    }

    /// Attach or replace a tag.
    pub fn set_tag(&mut self, key: impl Into<String>, value: i32) {
        let key = key.into();
        self.tags.insert(key.clone(), ImageTag { key, value });
    }

    /// Remove a tag, returning it if present.
    pub fn remove_tag(&mut self, key: &str) -> Option<ImageTag> {
        self.tags.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Bgra;

    fn solid(w: usize, h: usize) -> BgraImage {
        BgraImage::new(
            vec![
                Bgra {
                    b: 1,
                    g: 2,
                    r: 3,
                    a: 255
                };
                w * h
            ],
            w,
            h,
        )
    }

    #[test]
    fn flags() {
        let mut flags = ImageFlags::EMPTY;
        assert!(!flags.contains(ImageFlags::HAS_ALPHA));
        flags.set(ImageFlags::HAS_ALPHA, true);
        assert!(flags.contains(ImageFlags::HAS_ALPHA));
        flags.set(ImageFlags::HAS_ALPHA, false);
        assert_eq!(flags, ImageFlags::EMPTY);
    }

    #[test]
    fn pixels_move_in_and_out() {
        let mut record = ImageRecord::new("a.webp");
        assert!(!record.has_pixels());

        record.set_pixels(solid(3, 2));
        assert_eq!((record.width, record.height), (3, 2));
        assert_eq!(record.pixels().map(|p| p.buf().len()), Some(6));

        let taken = record.take_pixels();
        assert!(taken.is_some());
        assert!(!record.has_pixels());
    }

    #[test]
    fn strided_pixels_are_compacted() {
        let strided = imgref::Img::new_stride(
            vec![
                Bgra {
                    b: 0u8,
                    g: 0,
                    r: 0,
                    a: 0
                };
                4 * 2
            ],
            3,
            2,
            4,
        );
        let mut record = ImageRecord::new("a.webp");
        record.set_pixels(strided);
        let px = record.pixels().unwrap();
        assert_eq!(px.stride(), 3);
        assert_eq!(px.buf().len(), 6);
    }

    #[test]
    fn tags() {
        let mut record = ImageRecord::new("a.webp");
        record.set_tag("quality", 90);
        record.set_tag("quality", 80);
        assert_eq!(record.tag("quality").map(|t| t.value), Some(80));
        assert!(record.tag("compression").is_none());
        assert!(record.remove_tag("quality").is_some());
        assert!(record.tag("quality").is_none());
    }

    #[test]
    fn from_pixels_sets_alpha() {
        let record = ImageRecord::from_pixels("out.webp", solid(2, 2), true);
        assert!(record.has_alpha());
        assert!(record.has_pixels());
    }
}
