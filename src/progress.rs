//! Progress reporting back to the host.

use crate::ImageRecord;

/// A progress report: percentage done plus the region updated since the last
/// report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub percent: u8,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ProgressUpdate {
    /// The single report sent when a load or save finishes.
    ///
    /// Region fields are zero: the loader never reports partial regions.
    pub const COMPLETE: Self = ProgressUpdate {
        percent: 100,
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };
}

/// Host progress callback.
///
/// Loaders call [`update`](Progress::update) exactly once per successful
/// operation, with [`ProgressUpdate::COMPLETE`]. Any
/// `FnMut(&ImageRecord, ProgressUpdate)` closure implements this.
pub trait Progress {
    /// Receive a progress report for `image`.
    fn update(&mut self, image: &ImageRecord, update: ProgressUpdate);
}

impl<F> Progress for F
where
    F: FnMut(&ImageRecord, ProgressUpdate),
{
    fn update(&mut self, image: &ImageRecord, update: ProgressUpdate) {
        self(image, update)
    }
}
