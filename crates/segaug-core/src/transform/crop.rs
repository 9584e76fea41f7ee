//! Pixel-rectangle cropping.
//!
//! Shared by `Rotate` (trimming the padded corners of the expanded canvas)
//! and `Square` (trimming the longer axis).
//!
//! # Coordinate System
//!
//! - `(0, 0)` = top-left pixel
//! - `left`/`top` are pixel offsets, `width`/`height` are pixel extents
//! - All channels of each pixel are kept

use crate::raster::Image;

/// Crop a rectangle out of an image.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `left` - First column kept
/// * `top` - First row kept
/// * `width` - Number of columns kept
/// * `height` - Number of rows kept
///
/// # Behavior
///
/// - A region extending beyond the image bounds is clamped
/// - Minimum output dimension is 1x1 pixels
/// - The full region `(0, 0, width, height)` returns a copy of the image
/// - An empty image is returned unchanged
pub fn crop(image: &Image, left: u32, top: u32, width: u32, height: u32) -> Image {
    if image.is_empty() {
        return image.clone();
    }

    // Fast path: full crop returns a clone
    if left == 0 && top == 0 && width >= image.width && height >= image.height {
        return image.clone();
    }

    // Clamp to image bounds
    let left = left.min(image.width.saturating_sub(1));
    let top = top.min(image.height.saturating_sub(1));
    let right = left.saturating_add(width).min(image.width);
    let bottom = top.saturating_add(height).min(image.height);

    // Ensure minimum dimensions
    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);

    let row_len = out_width as usize * image.channels as usize;
    let mut output = Vec::with_capacity(row_len * out_height as usize);

    // Copy sample data row by row
    for y in top..top + out_height {
        let start = image.index(left, y);
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Image::new(out_width, out_height, image.channels, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
