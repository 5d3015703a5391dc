//! Host-side loader registry.

use std::collections::BTreeSet;
use std::path::Path;

use crate::decode::LoadOutcome;
use crate::encode::SaveOutcome;
use crate::loader::{ImageLoader, WebpLoader};
use crate::progress::Progress;
use crate::{ImageRecord, LoaderError};

/// Enabled format names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct FormatSet(BTreeSet<String>);

impl FormatSet {
    fn contains(&self, format: &str) -> bool {
        self.0.contains(&format.to_ascii_lowercase())
    }

    fn insert(&mut self, format: &str) {
        self.0.insert(format.to_ascii_lowercase());
    }

    fn remove(&mut self, format: &str) {
        self.0.remove(&format.to_ascii_lowercase());
    }
}

/// Registered loaders and the formats they advertise.
///
/// Registration records every name a loader's [`formats`](ImageLoader::formats)
/// returns and enables it for both decoding and encoding. The host can then
/// toggle formats per direction at runtime, e.g. to serve read-only formats.
///
/// ```
/// use zenwebp_loader::LoaderRegistry;
///
/// let registry = LoaderRegistry::with_webp().with_encode("webp", false);
/// assert_eq!(registry.formats(), ["webp"]);
/// assert!(registry.can_decode("webp"));
/// assert!(!registry.can_encode("webp"));
/// ```
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn ImageLoader>>,
    formats: Vec<String>,
    decode_enabled: FormatSet,
    encode_enabled: FormatSet,
}

impl LoaderRegistry {
    /// A registry with no loaders.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding a default-configured [`WebpLoader`].
    pub fn with_webp() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(WebpLoader::new()));
        registry
    }

    /// Register a loader and advertise its formats.
    pub fn register(&mut self, loader: Box<dyn ImageLoader>) {
        for format in loader.formats() {
            log::debug!("loader {} provides format {format}", loader.name());
            if !self.formats.iter().any(|f| f.eq_ignore_ascii_case(&format)) {
                self.formats.push(format.clone());
            }
            self.decode_enabled.insert(&format);
            self.encode_enabled.insert(&format);
        }
        self.loaders.push(loader);
    }

    /// Advertised format names, in registration order.
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Enable or disable decoding for a format.
    pub fn with_decode(mut self, format: &str, enabled: bool) -> Self {
        if enabled {
            self.decode_enabled.insert(format);
        } else {
            self.decode_enabled.remove(format);
        }
        self
    }

    /// Enable or disable encoding for a format.
    pub fn with_encode(mut self, format: &str, enabled: bool) -> Self {
        if enabled {
            self.encode_enabled.insert(format);
        } else {
            self.encode_enabled.remove(format);
        }
        self
    }

    /// Is this format registered AND enabled for decoding?
    pub fn can_decode(&self, format: &str) -> bool {
        self.is_registered(format) && self.decode_enabled.contains(format)
    }

    /// Is this format registered AND enabled for encoding?
    pub fn can_encode(&self, format: &str) -> bool {
        self.is_registered(format) && self.encode_enabled.contains(format)
    }

    fn is_registered(&self, format: &str) -> bool {
        self.formats.iter().any(|f| f.eq_ignore_ascii_case(format))
    }

    /// Loader registered under `name`.
    pub fn loader(&self, name: &str) -> Option<&dyn ImageLoader> {
        self.loaders
            .iter()
            .find(|l| l.name() == name)
            .map(|l| l.as_ref())
    }

    /// Loader for a path, by extension first and then by leading bytes.
    pub fn loader_for_path(&self, path: &Path, data: Option<&[u8]>) -> Option<&dyn ImageLoader> {
        if let Some(loader) = self.loaders.iter().find(|l| l.claims(path, None)) {
            return Some(loader.as_ref());
        }
        let data = data?;
        self.loaders
            .iter()
            .find(|l| l.claims(path, Some(data)))
            .map(|l| l.as_ref())
    }

    fn decoder_for(&self, path: &Path) -> Result<&dyn ImageLoader, LoaderError> {
        let loader = match self.loader_for_path(path, None) {
            Some(loader) => loader,
            None => {
                let data = crate::io::read_file(path)?;
                self.loader_for_path(path, Some(&data)).ok_or_else(|| {
                    LoaderError::UnsupportedFormat(format!("no loader for {}", path.display()))
                })?
            }
        };
        self.ensure_enabled(loader, |format| self.can_decode(format), "decoding")?;
        Ok(loader)
    }

    fn ensure_enabled(
        &self,
        loader: &dyn ImageLoader,
        enabled: impl Fn(&str) -> bool,
        direction: &str,
    ) -> Result<(), LoaderError> {
        if loader.formats().iter().any(|f| enabled(f)) {
            Ok(())
        } else {
            Err(LoaderError::UnsupportedFormat(format!(
                "{direction} disabled for loader {}",
                loader.name()
            )))
        }
    }

    /// Probe a file: the record gets dimensions, alpha and format, and the
    /// claiming loader's name as its loader hint. No pixels are decoded.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<ImageRecord, LoaderError> {
        self.open_with_outcome(path).map(|(image, _)| image)
    }

    /// [`open`](Self::open), also returning what the probe pass reported.
    ///
    /// The outcome carries the full [`Features`](crate::Features), including
    /// animation, which the record itself does not keep.
    pub fn open_with_outcome(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(ImageRecord, LoadOutcome), LoaderError> {
        let path = path.as_ref();
        let loader = self.decoder_for(path)?;
        let mut image = ImageRecord::new(path);
        let outcome = loader.try_load(&mut image, None, 0, false)?;
        image.loader = Some(loader.name().to_string());
        Ok((image, outcome))
    }

    /// Decode pixels into a record opened earlier.
    pub fn load_pixels(
        &self,
        image: &mut ImageRecord,
        progress: Option<&mut dyn Progress>,
    ) -> Result<(), LoaderError> {
        let loader = match image.loader.as_deref().and_then(|name| self.loader(name)) {
            Some(loader) => {
                self.ensure_enabled(loader, |format| self.can_decode(format), "decoding")?;
                loader
            }
            None => self.decoder_for(image.path())?,
        };
        loader.try_load(image, progress, 0, true)?;
        Ok(())
    }

    /// Save a record with the loader matching its path's extension.
    pub fn save(
        &self,
        image: &ImageRecord,
        progress: Option<&mut dyn Progress>,
    ) -> Result<SaveOutcome, LoaderError> {
        let loader = self.loader_for_path(image.path(), None).ok_or_else(|| {
            LoaderError::UnsupportedFormat(format!("no loader for {}", image.path().display()))
        })?;
        self.ensure_enabled(loader, |format| self.can_encode(format), "encoding")?;
        loader.try_save(image, progress, 0)
    }
}

impl core::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<&str> = self.loaders.iter().map(|l| l.name()).collect();
        f.debug_struct("LoaderRegistry")
            .field("loaders", &names)
            .field("formats", &self.formats)
            .field("decode_enabled", &self.decode_enabled)
            .field("encode_enabled", &self.encode_enabled)
            .finish()
    }
}
