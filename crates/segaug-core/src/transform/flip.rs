//! Left-right and up-down mirroring.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::raster::Image;

/// Spatial axis a [`Flip`] mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Reverse the width axis (left becomes right).
    LeftRight,
    /// Reverse the height axis (top becomes bottom).
    UpDown,
}

/// Configuration for [`Flip`]. The axis is fixed by the transform variant
/// (`flip_lr` or `flip_ud`), not by the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlipConfig {
    /// Probability that the sampled flip is active.
    pub p: f64,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self { p: 0.5 }
    }
}

impl FlipConfig {
    /// Draw the activation flag.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Flip {
        Flip {
            active: rng.gen::<f64>() < self.p,
        }
    }
}

/// A mirror decided once at sampling time.
///
/// Only the activation flag is stored; the owning `Transform` variant
/// supplies the axis, so a flip can never disagree with its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    active: bool,
}

impl Flip {
    pub fn new(active: bool) -> Self {
        Self { active }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mirror `image` along `axis` if active.
    pub fn apply(&self, axis: FlipAxis, image: &Image) -> Image {
        if !self.active {
            return image.clone();
        }

        let mut planes = image.planes();
        for plane in planes.iter_mut() {
            match axis {
                FlipAxis::LeftRight => image::imageops::flip_horizontal_in_place(plane),
                FlipAxis::UpDown => image::imageops::flip_vertical_in_place(plane),
            }
        }
        Image::from_planes(&planes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn numbered(width: u32, height: u32) -> Image {
        Image::from_fn(width, height, 2, |x, y, c| (y * width + x) as f32 * 10.0 + c as f32)
    }

    #[test]
    fn test_flip_lr_mirrors_columns() {
        let img = Image::new(3, 1, 1, vec![1.0, 2.0, 3.0]);
        let flipped = Flip::new(true).apply(FlipAxis::LeftRight, &img);

        assert_eq!(flipped.pixels, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_flip_ud_mirrors_rows() {
        let img = Image::new(2, 3, 1, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let flipped = Flip::new(true).apply(FlipAxis::UpDown, &img);

        assert_eq!(flipped.pixels, vec![5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_flip_keeps_channels_together() {
        let img = numbered(4, 2);
        let flipped = Flip::new(true).apply(FlipAxis::LeftRight, &img);

        assert_eq!(flipped.pixel(0, 0), img.pixel(3, 0));
        assert_eq!(flipped.pixel(1, 1), img.pixel(2, 1));
    }

    #[test]
    fn test_inactive_is_identity() {
        let img = numbered(5, 4);

        assert_eq!(Flip::new(false).apply(FlipAxis::LeftRight, &img), img);
        assert_eq!(Flip::new(false).apply(FlipAxis::UpDown, &img), img);
    }

    #[test]
    fn test_sampling_respects_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..20 {
            assert!(FlipConfig { p: 1.0 }.sample(&mut rng).is_active());
            assert!(!FlipConfig { p: 0.0 }.sample(&mut rng).is_active());
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: An active flip is an involution.
        #[test]
        fn prop_flip_twice_is_identity(
            (width, height, channels) in (1u32..=24, 1u32..=24, 1u32..=4),
            vertical in any::<bool>(),
        ) {
            let img = Image::from_fn(width, height, channels, |x, y, c| (x * 31 + y * 17 + c) as f32);
            let axis = if vertical { FlipAxis::UpDown } else { FlipAxis::LeftRight };
            let flip = Flip::new(true);

            prop_assert_eq!(flip.apply(axis, &flip.apply(axis, &img)), img);
        }
    }
}
