//! Exact-size resampling.
//!
//! Uses the `image` crate's resampling kernels on each channel plane and
//! returns a new [`Image`] without modifying the input.

use super::{FilterType, Image};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Returns
///
/// A new `Image` of `height x width` pixels with the source channel count.
/// Samples keep their original range: the `image` crate clamps `f32` samples
/// to `[0, 1]`, so planes are rescaled from the image's own `[min, max]` into
/// that interval and mapped back afterwards. Overshoot from Lanczos3 is
/// therefore clipped to the input range.
///
/// Zero target dimensions are rejected when `Resize` is configured, so callers
/// going through the operator never reach this with an empty target. An empty
/// source has nothing to sample and yields a zero-filled image.
pub fn resize(image: &Image, width: u32, height: u32, filter: FilterType) -> Image {
    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return image.clone();
    }

    let Some((lo, hi)) = image.min_max().filter(|_| !image.is_empty()) else {
        return Image::filled(width, height, image.channels, 0.0);
    };
    if lo == hi {
        return Image::filled(width, height, image.channels, lo);
    }

    let span = hi - lo;
    let mut normalized = image.clone();
    for v in normalized.pixels.iter_mut() {
        *v = (*v - lo) / span;
    }

    let resized: Vec<_> = normalized
        .planes()
        .iter()
        .map(|plane| image::imageops::resize(plane, width, height, filter.to_image_filter()))
        .collect();

    let mut output = Image::from_planes(&resized);
    for v in output.pixels.iter_mut() {
        *v = (*v * span + lo).clamp(lo, hi);
    }
    output
}
