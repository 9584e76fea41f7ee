//! Random square crop along the longer axis.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::crop::crop;
use crate::raster::Image;

/// Configuration for [`Square`]. It has no parameters; the crop offset is
/// drawn at sampling time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SquareConfig {}

impl SquareConfig {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Square {
        Square {
            pos: rng.gen::<f64>(),
        }
    }
}

/// A square crop whose window position within the excess margin is fixed.
///
/// `pos = 0` keeps the window flush with the left/top edge, `pos -> 1` moves
/// it flush with the right/bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pos: f64,
}

impl Square {
    /// Build with a fixed offset fraction, clamped to `[0, 1]`.
    pub fn new(pos: f64) -> Self {
        Self {
            pos: pos.clamp(0.0, 1.0),
        }
    }

    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// Trim the longer axis down to the shorter one.
    pub fn apply(&self, image: &Image) -> Image {
        let (w, h) = (image.width, image.height);
        if w == h {
            return image.clone();
        }

        let excess = w.abs_diff(h);
        let offset = ((self.pos * excess as f64).floor() as u32).min(excess);

        if h < w {
            crop(image, offset, 0, h, h)
        } else {
            crop(image, 0, offset, w, w)
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square(pos={})", self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn numbered(width: u32, height: u32) -> Image {
        Image::from_fn(width, height, 3, |x, y, c| (y * width + x) as f32 + c as f32 * 0.5)
    }

    #[test]
    fn test_square_input_unchanged() {
        let img = numbered(32, 32);
        assert_eq!(Square::new(0.7).apply(&img), img);
    }

    #[test]
    fn test_wide_image_flush_left() {
        let img = numbered(10, 4);
        let result = Square::new(0.0).apply(&img);

        assert_eq!(result.shape(), (4, 4, 3));
        assert_eq!(result.pixel(0, 0), img.pixel(0, 0));
    }

    #[test]
    fn test_wide_image_flush_right() {
        let img = numbered(10, 4);
        let result = Square::new(1.0).apply(&img);

        assert_eq!(result.shape(), (4, 4, 3));
        assert_eq!(result.pixel(0, 0), img.pixel(6, 0));
        assert_eq!(result.pixel(3, 3), img.pixel(9, 3));
    }

    #[test]
    fn test_wide_image_offset_is_floored() {
        // excess = 6, floor(0.5 * 6) = 3
        let img = numbered(10, 4);
        let result = Square::new(0.5).apply(&img);

        assert_eq!(result.pixel(0, 0), img.pixel(3, 0));

        // floor(0.99 * 6) = 5
        let result = Square::new(0.99).apply(&img);
        assert_eq!(result.pixel(0, 0), img.pixel(5, 0));
    }

    #[test]
    fn test_tall_image() {
        let img = numbered(4, 9);
        let result = Square::new(0.4).apply(&img);

        // excess = 5, floor(0.4 * 5) = 2
        assert_eq!(result.shape(), (4, 4, 3));
        assert_eq!(result.pixel(0, 0), img.pixel(0, 2));
    }

    #[test]
    fn test_sample_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let pos = SquareConfig::default().sample(&mut rng).pos();
            assert!((0.0..1.0).contains(&pos));
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(Square::new(0.25).to_string(), "Square(pos=0.25)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Output is always square with side equal to the shorter axis.
        #[test]
        fn prop_output_is_square(
            (width, height, channels) in (1u32..=64, 1u32..=64, 1u32..=3),
            pos in 0.0f64..1.0,
        ) {
            let img = Image::filled(width, height, channels, 0.5);
            let result = Square::new(pos).apply(&img);
            let side = width.min(height) as usize;

            prop_assert_eq!(result.shape(), (side, side, channels as usize));
        }
    }
}
