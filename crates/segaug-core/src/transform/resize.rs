//! Fixed-size resize. The only operator without randomness.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AugmentError;
use crate::raster::{self, FilterType, Image};

/// Configuration for [`Resize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels; `None` means the same as `width`.
    pub height: Option<u32>,
    /// Resampling filter.
    pub filter: FilterType,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: None,
            filter: FilterType::default(),
        }
    }
}

impl ResizeConfig {
    /// Square target of `size x size`.
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            ..Self::default()
        }
    }

    /// Resolve the target size.
    ///
    /// # Errors
    ///
    /// Returns `AugmentError::Config` if either target dimension is zero.
    pub fn build(&self) -> Result<Resize, AugmentError> {
        let height = self.height.unwrap_or(self.width);
        if self.width == 0 || height == 0 {
            return Err(AugmentError::Config(format!(
                "resize target must be non-zero, got {}x{}",
                self.width, height
            )));
        }
        Ok(Resize {
            width: self.width,
            height,
            filter: self.filter,
        })
    }
}

/// Resample to a fixed `height x width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resize {
    width: u32,
    height: u32,
    filter: FilterType,
}

impl Resize {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn apply(&self, image: &Image) -> Image {
        raster::resize(image, self.width, self.height, self.filter)
    }
}

impl fmt::Display for Resize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resize(width={}, height={})", self.width, self.height)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Output always has exactly the target dimensions.
        #[test]
        fn prop_output_matches_target(
            (src_w, src_h) in (1u32..=48, 1u32..=48),
            (dst_w, dst_h) in (1u32..=48, 1u32..=48),
            channels in 1u32..=3,
        ) {
            let img = Image::filled(src_w, src_h, channels, 0.5);
            let resize = ResizeConfig {
                width: dst_w,
                height: Some(dst_h),
                filter: FilterType::Bilinear,
            }
            .build()
            .unwrap();

            let result = resize.apply(&img);
            prop_assert_eq!(result.shape(), (dst_h as usize, dst_w as usize, channels as usize));
        }
    }
}
