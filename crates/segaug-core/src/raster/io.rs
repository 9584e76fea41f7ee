//! Conversion between [`Image`] and the `image` crate, plus byte codecs.

use std::io::Cursor;

use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageFormat, ImageReader, RgbImage, RgbaImage};

use super::Image;
use crate::error::AugmentError;

impl Image {
    /// Convert a decoded `image` crate image, keeping its channel count.
    ///
    /// Samples are scaled to `[0, 1]` whatever the source bit depth.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        match img.color().channel_count() {
            1 => Self::new(width, height, 1, img.to_luma32f().into_raw()),
            2 => Self::new(width, height, 2, img.to_luma_alpha32f().into_raw()),
            4 => Self::new(width, height, 4, img.to_rgba32f().into_raw()),
            _ => Self::new(width, height, 3, img.to_rgb32f().into_raw()),
        }
    }

    /// Convert to an 8-bit `image` crate image.
    ///
    /// Samples are clamped to `[0, 1]` before quantization.
    pub fn to_dynamic(&self) -> Result<DynamicImage, AugmentError> {
        let bytes: Vec<u8> = self
            .pixels
            .iter()
            .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect();
        let mismatch = || AugmentError::InvalidImage {
            expected: self.pixel_count() * self.channels as usize,
            actual: self.pixels.len(),
        };

        let img = match self.channels {
            1 => DynamicImage::ImageLuma8(
                GrayImage::from_raw(self.width, self.height, bytes).ok_or_else(mismatch)?,
            ),
            2 => DynamicImage::ImageLumaA8(
                GrayAlphaImage::from_raw(self.width, self.height, bytes).ok_or_else(mismatch)?,
            ),
            3 => DynamicImage::ImageRgb8(
                RgbImage::from_raw(self.width, self.height, bytes).ok_or_else(mismatch)?,
            ),
            4 => DynamicImage::ImageRgba8(
                RgbaImage::from_raw(self.width, self.height, bytes).ok_or_else(mismatch)?,
            ),
            other => return Err(AugmentError::UnsupportedChannels(other as usize)),
        };
        Ok(img)
    }

    /// Decode PNG or JPEG bytes.
    ///
    /// Grayscale sources stay single-channel so label masks keep their shape.
    pub fn decode(bytes: &[u8]) -> Result<Self, AugmentError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| AugmentError::Decode(e.to_string()))?;

        let img = reader
            .decode()
            .map_err(|e| AugmentError::Decode(e.to_string()))?;

        Ok(Self::from_dynamic(&img))
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, AugmentError> {
        if self.is_empty() {
            return Err(AugmentError::Encode(format!(
                "cannot encode empty {}x{}x{} image",
                self.width, self.height, self.channels
            )));
        }

        let img = self.to_dynamic()?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)
            .map_err(|e| AugmentError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, channels: u32) -> Image {
        Image::from_fn(width, height, channels, |x, y, c| {
            ((x * 7 + y * 13 + c * 50) % 256) as f32 / 255.0
        })
    }

    #[test]
    fn test_png_round_trip_rgb() {
        let img = gradient(16, 8, 3);
        let png = img.encode_png().unwrap();

        // PNG magic bytes
        assert_eq!(&png[0..4], &[0x89, b'P', b'N', b'G']);

        let decoded = Image::decode(&png).unwrap();
        assert_eq!(decoded.shape(), (8, 16, 3));
        for (a, b) in decoded.pixels.iter().zip(img.pixels.iter()) {
            assert!((a - b).abs() < 1.0 / 255.0);
        }
    }

    #[test]
    fn test_grayscale_stays_single_channel() {
        let mask = gradient(10, 10, 1);
        let decoded = Image::decode(&mask.encode_png().unwrap()).unwrap();
        assert_eq!(decoded.channels, 1);
    }

    #[test]
    fn test_to_dynamic_clamps() {
        let img = Image::new(2, 1, 1, vec![-0.5, 1.5]);
        let dynamic = img.to_dynamic().unwrap();
        assert_eq!(dynamic.to_luma8().into_raw(), vec![0, 255]);
    }

    #[test]
    fn test_to_dynamic_unsupported_channels() {
        let img = Image::filled(2, 2, 5, 0.0);
        assert!(matches!(
            img.to_dynamic(),
            Err(AugmentError::UnsupportedChannels(5))
        ));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = Image::decode(&[0u8, 1, 2, 3, 4, 5]);
        assert!(matches!(result, Err(AugmentError::Decode(_))));
    }

    #[test]
    fn test_encode_empty_fails() {
        let img = Image::new(0, 0, 3, vec![]);
        assert!(matches!(img.encode_png(), Err(AugmentError::Encode(_))));
    }

    #[test]
    fn test_from_dynamic_rgba() {
        let rgba = RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        let img = Image::from_dynamic(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(img.shape(), (2, 3, 4));
        assert_eq!(img.pixel(0, 0), &[1.0, 0.0, 0.0, 1.0]);
    }
}
