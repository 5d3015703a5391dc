//! Typed pixel buffer definitions.
//!
//! Uses `imgref::ImgVec` for 2D pixel data with typed pixels from the `rgb` crate.

pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::{Bgra, Rgba};

/// Decoded image as attached to an [`ImageRecord`](crate::ImageRecord):
/// row-major BGRA, stride equal to width.
pub type BgraImage = ImgVec<Bgra<u8>>;

/// Reorder packed RGBA bytes into BGRA pixels, reusing the allocation.
///
/// Red and blue are swapped in place. The buffer is then reinterpreted as
/// pixels; only a capacity that is not a whole number of pixels forces a copy.
/// Trailing bytes that do not form a whole pixel are dropped.
pub(crate) fn rgba_bytes_into_bgra(mut bytes: Vec<u8>) -> Vec<Bgra<u8>> {
    bytes.truncate(bytes.len() / 4 * 4);
    for px in bytemuck::cast_slice_mut::<u8, Rgba<u8>>(&mut bytes) {
        core::mem::swap(&mut px.r, &mut px.b);
    }
    match bytemuck::allocation::try_cast_vec::<u8, Bgra<u8>>(bytes) {
        Ok(pixels) => pixels,
        Err((_, bytes)) => bytemuck::cast_slice(&bytes).to_vec(),
    }
}
