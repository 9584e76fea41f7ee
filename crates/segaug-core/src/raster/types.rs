//! Core array type for augmentation.

use image::{ImageBuffer, Luma};
use serde::{Deserialize, Serialize};

use crate::error::AugmentError;

/// A single channel of an [`Image`] as an `image` crate buffer.
pub type Plane = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Filter type for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation. Keeps label masks free of blended values.
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, sharper).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An image as a (height, width, channels) array of `f32` samples.
///
/// Samples are stored interleaved in row-major order, so the sample for
/// channel `c` of pixel `(x, y)` lives at `(y * width + x) * channels + c`.
/// Images decoded from 8-bit sources hold values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of samples per pixel (1 for grayscale, 3 for RGB).
    pub channels: u32,
    /// Interleaved sample data. Length is `width * height * channels`.
    pub pixels: Vec<f32>,
}

impl Image {
    /// Create a new Image with the given dimensions and sample data.
    pub fn new(width: u32, height: u32, channels: u32, pixels: Vec<f32>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * channels as usize,
            "Sample buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Create a new Image, checking the dimensions and the buffer length.
    ///
    /// # Errors
    ///
    /// Returns `AugmentError::EmptyImage` if any dimension is zero and
    /// `AugmentError::InvalidImage` if the buffer length doesn't match.
    pub fn try_new(
        width: u32,
        height: u32,
        channels: u32,
        pixels: Vec<f32>,
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

    /// Create an image with every sample set to `value`.
    pub fn filled(width: u32, height: u32, channels: u32, value: f32) -> Self {
        let len = width as usize * height as usize * channels as usize;
        Self::new(width, height, channels, vec![value; len])
    }

    /// Create an image by evaluating `f(x, y, channel)` for every sample.
    pub fn from_fn<F>(width: u32, height: u32, channels: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32, u32) -> f32,
    {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * channels as usize);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    pixels.push(f(x, y, c));
                }
            }
        }
        Self::new(width, height, channels, pixels)
    }

    /// Array shape as `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }

    /// Index of the first sample of pixel `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// Sample at pixel `(x, y)`, channel `c`.
    #[inline]
    pub fn get(&self, x: u32, y: u32, c: u32) -> f32 {
        self.pixels[self.index(x, y) + c as usize]
    }

    /// All samples of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[f32] {
        let idx = self.index(x, y);
        &self.pixels[idx..idx + self.channels as usize]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.channels == 0 || self.pixels.is_empty()
    }

    /// Split into one `image` crate buffer per channel.
    pub fn planes(&self) -> Vec<Plane> {
        let channels = self.channels as usize;
        (0..channels)
            .map(|c| {
                let data: Vec<f32> = self.pixels.iter().skip(c).step_by(channels).copied().collect();
                // Length always matches, so from_raw cannot fail here.
                Plane::from_raw(self.width, self.height, data)
                    .unwrap_or_else(|| Plane::new(self.width, self.height))
            })
            .collect()
    }

    /// Interleave per-channel buffers back into an image.
    ///
    /// All planes must share the dimensions of the first one.
    pub fn from_planes(planes: &[Plane]) -> Self {
        let Some(first) = planes.first() else {
            return Self::new(0, 0, 0, Vec::new());
        };
        let (width, height) = first.dimensions();
        let channels = planes.len();

        let mut pixels = vec![0.0f32; width as usize * height as usize * channels];
        for (c, plane) in planes.iter().enumerate() {
            debug_assert_eq!(plane.dimensions(), (width, height), "Plane size mismatch");
            for (i, value) in plane.as_raw().iter().enumerate() {
                pixels[i * channels + c] = *value;
            }
        }

        Self::new(width, height, channels as u32, pixels)
    }

    /// Smallest and largest sample, or `None` for an empty image.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.pixels.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
