//! WASM-compatible wrapper types for image data.
//!
//! JavaScript sees images as 8-bit interleaved samples; the core crate works
//! on `f32` samples in `[0, 1]`. This module converts between the two.

use segaug_core::{AugmentError, Image};
use wasm_bindgen::prelude::*;

/// An 8-bit image wrapper for JavaScript.
///
/// Samples are interleaved, row-major, `channels` bytes per pixel. Label
/// masks are usually single-channel; photos are RGB or RGBA.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. Calling `pixels()` copies it into a
/// JavaScript `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq)]
pub struct JsImage {
    width: u32,
    height: u32,
    channels: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from dimensions and interleaved 8-bit samples.
    ///
    /// # Errors
    ///
    /// Throws if any dimension is zero or if
    /// `pixels.length != width * height * channels`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        channels: u32,
        pixels: Vec<u8>,
    ) -> Result<JsImage, JsValue> {
        Self::checked(width, height, channels, pixels)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the samples as a Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsImage {
    pub(crate) fn checked(
        width: u32,
        height: u32,
        channels: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, AugmentError> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(AugmentError::EmptyImage {
                width,
                height,
                channels,
            });
        }
        let expected = width as usize * height as usize * channels as usize;
        if pixels.len() != expected {
            return Err(AugmentError::InvalidImage {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Scale samples to `[0, 1]` for the core crate.
    pub(crate) fn to_image(&self) -> Image {
        let pixels = self.pixels.iter().map(|&v| v as f32 / 255.0).collect();
        Image::new(self.width, self.height, self.channels, pixels)
    }

    /// Quantize a core image back to 8 bits, clamping to `[0, 1]` first.
    pub(crate) fn from_image(img: &Image) -> Self {
        let pixels = img
            .pixels
            .iter()
            .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect();
        Self {
            width: img.width,
            height: img.height,
            channels: img.channels,
            pixels,
        }
    }
}
