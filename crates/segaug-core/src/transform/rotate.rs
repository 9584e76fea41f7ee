//! Random rotation cropped to the padding-free interior.
//!
//! Rotating a rectangle onto an expanded canvas leaves four empty triangles
//! in the corners. [`Rotate`] crops the canvas back to the largest
//! axis-aligned rectangle that only contains source pixels, so the output is
//! generally smaller than the input and of a different aspect ratio. A
//! downstream `Resize` normalizes dimensions.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::crop::crop;
use super::rotation::rotate_expanded;
use crate::error::AugmentError;
use crate::raster::{FilterType, Image};

/// Tolerance under which `|sin a|` and `|cos a|` count as equal (45° family).
const DIAGONAL_EPSILON: f64 = 1e-10;

/// Tolerance for recognizing an angle as a multiple of 90°.
const QUARTER_TURN_EPSILON: f64 = 1e-9;

/// Default candidate angles: 0, 5, 10, ..., 175 degrees.
pub fn default_angles() -> Vec<f64> {
    (0..180).step_by(5).map(f64::from).collect()
}

/// Configuration for [`Rotate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotateConfig {
    /// Candidate angles in degrees; one is picked uniformly at sampling time.
    #[serde(alias = "angle")]
    pub angles: Vec<f64>,
    /// Interpolation used on the rotated canvas.
    pub filter: FilterType,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self {
            angles: default_angles(),
            filter: FilterType::default(),
        }
    }
}

impl RotateConfig {
    pub fn with_angles(angles: Vec<f64>) -> Self {
        Self {
            angles,
            ..Self::default()
        }
    }

    /// Pick one candidate angle.
    ///
    /// # Errors
    ///
    /// Returns `AugmentError::Config` if the candidate set is empty or holds
    /// a non-finite angle.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Rotate, AugmentError> {
        if let Some(bad) = self.angles.iter().find(|a| !a.is_finite()) {
            return Err(AugmentError::Config(format!(
                "rotation angles must be finite numbers, got {}",
                bad
            )));
        }

        let angle = self
            .angles
            .choose(rng)
            .copied()
            .ok_or_else(|| AugmentError::Config("rotation angles must not be empty".to_string()))?;

        Ok(Rotate {
            angle,
            filter: self.filter,
        })
    }
}

/// Compute the largest axis-aligned rectangle inside a rotated rectangle.
///
/// A `width x height` rectangle is rotated by `angle_degrees` about its
/// center. The result `(wr, hr)` is the largest rectangle, centered and
/// axis-aligned in the rotated frame, that lies entirely within the rotated
/// rectangle.
///
/// Quarter turns are exact: multiples of 180° return `(width, height)` and odd
/// multiples of 90° return `(height, width)`.
pub fn largest_rotated_rect(width: f64, height: f64, angle_degrees: f64) -> (f64, f64) {
    let quarters = angle_degrees / 90.0;
    if (quarters - quarters.round()).abs() < QUARTER_TURN_EPSILON {
        return if (quarters.round() as i64).rem_euclid(2) == 0 {
            (width, height)
        } else {
            (height, width)
        };
    }

    let angle = angle_degrees.to_radians();
    let width_is_longer = width >= height;
    let (side_long, side_short) = if width_is_longer {
        (width, height)
    } else {
        (height, width)
    };

    let sin_a = angle.sin().abs();
    let cos_a = angle.cos().abs();

    if side_short <= 2.0 * sin_a * cos_a * side_long || (sin_a - cos_a).abs() < DIAGONAL_EPSILON {
        // Half constrained: two corners of the rectangle touch the longer side
        let x = 0.5 * side_short;
        if width_is_longer {
            (x / sin_a, x / cos_a)
        } else {
            (x / cos_a, x / sin_a)
        }
    } else {
        // Fully constrained: all four corners touch the rotated sides
        let cos_2a = cos_a * cos_a - sin_a * sin_a;
        (
            (width * cos_a - height * sin_a) / cos_2a,
            (height * cos_a - width * sin_a) / cos_2a,
        )
    }
}

/// A rotation by a fixed angle, followed by the padding-free crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotate {
    angle: f64,
    filter: FilterType,
}

impl Rotate {
    pub fn new(angle: f64, filter: FilterType) -> Self {
        Self { angle, filter }
    }

    /// Sampled angle in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    /// Rotate onto an expanded canvas, then trim the padded margins.
    ///
    /// The trim on each side is `trunc((canvas - rect) / 2)`, so the kept
    /// region is centered and never narrower than the largest rectangle.
    pub fn apply(&self, image: &Image) -> Image {
        let rotated = rotate_expanded(image, self.angle, self.filter);
        let (wr, hr) = largest_rotated_rect(image.width as f64, image.height as f64, self.angle);

        let trim_x = ((rotated.width as f64 - wr) / 2.0).max(0.0) as u32;
        let trim_y = ((rotated.height as f64 - hr) / 2.0).max(0.0) as u32;

        let out_w = rotated.width.saturating_sub(2 * trim_x);
        let out_h = rotated.height.saturating_sub(2 * trim_y);
        if out_w == 0 || out_h == 0 {
            tracing::warn!(
                angle = self.angle,
                width = image.width,
                height = image.height,
                "rotation crop is empty, keeping a single pixel"
            );
        }

        crop(&rotated, trim_x, trim_y, out_w.max(1), out_h.max(1))
    }
}

impl fmt::Display for Rotate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rotate(angle={})", self.angle)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: The rectangle never exceeds the rotated bounding box.
        #[test]
        fn prop_rect_fits_rotated_bounds(
            (width, height) in (1.0f64..=500.0, 1.0f64..=500.0),
            angle in 0.0f64..180.0,
        ) {
            let (wr, hr) = largest_rotated_rect(width, height, angle);
            let a = angle.to_radians();
            let (s, c) = (a.sin().abs(), a.cos().abs());

            prop_assert!(wr.is_finite() && hr.is_finite());
            prop_assert!(wr > 0.0 && hr > 0.0);
            prop_assert!(wr <= width * c + height * s + 1e-6);
            prop_assert!(hr <= width * s + height * c + 1e-6);
        }

        /// Property: Angles 180° apart give the same rectangle.
        #[test]
        fn prop_rect_half_turn_periodic(
            (width, height) in (1.0f64..=500.0, 1.0f64..=500.0),
            angle in 0.0f64..180.0,
        ) {
            let (w1, h1) = largest_rotated_rect(width, height, angle);
            let (w2, h2) = largest_rotated_rect(width, height, angle + 180.0);

            prop_assert!((w1 - w2).abs() < 1e-6 * w1.max(1.0));
            prop_assert!((h1 - h2).abs() < 1e-6 * h1.max(1.0));
        }
    }
}
