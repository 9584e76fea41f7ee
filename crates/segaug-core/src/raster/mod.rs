//! Image array representation for the augmentation pipeline.
//!
//! This module provides:
//! - [`Image`], a (height, width, channels) array of `f32` samples
//! - Conversion to and from the `image` crate, PNG/JPEG decoding, PNG encoding
//! - Exact-size resampling used by the `Resize` operator
//!
//! Operators work on any channel count. Where an `image` crate routine is
//! needed, the image is split into single-channel [`Plane`]s and rebuilt
//! afterwards, so grayscale masks and RGB images go through the same code.

mod io;
mod resize;
mod types;

pub use resize::resize;
pub use types::{FilterType, Image, Plane};
