//! Codec adapters.
//!
//! A thin layer between the loader's load/save flow and the codec crate, so
//! the rest of the crate never names zenwebp's request types directly.

pub(crate) mod webp;
