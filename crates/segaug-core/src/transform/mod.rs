//! Augmentation operators.
//!
//! Every operator comes as a pair of types:
//! - a `*Config` holding construction parameters, serializable with serde
//! - the sampled operator, holding exactly the random draws made from the
//!   config plus its fixed parameters
//!
//! Sampling happens once, through an explicitly passed random generator.
//! Applying a sampled operator is a pure function of its state and the input
//! image, so the same operator can be replayed on an image and its mask.
//!
//! # Operators
//!
//! | Operator | Randomness            | Effect                                   |
//! |----------|-----------------------|------------------------------------------|
//! | Noise    | active flag           | seeded additive Gaussian noise           |
//! | FlipLR   | active flag           | mirror along the width axis              |
//! | FlipUD   | active flag           | mirror along the height axis             |
//! | Rotate   | angle from candidates | rotate, then crop to padding-free region |
//! | Square   | offset fraction       | crop the longer axis to a square         |
//! | Resize   | none                  | resample to a fixed size                 |

mod crop;
mod flip;
mod noise;
mod resize;
mod rotate;
mod rotation;
mod square;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AugmentError;
use crate::raster::Image;

pub use crop::crop;
pub use flip::{Flip, FlipAxis, FlipConfig};
pub use noise::{Noise, NoiseConfig};
pub use resize::{Resize, ResizeConfig};
pub use rotate::{default_angles, largest_rotated_rect, Rotate, RotateConfig};
pub use rotation::{rotate_expanded, rotated_canvas};
pub use square::{Square, SquareConfig};

/// Construction parameters for one operator.
///
/// Serialized with an internal `type` tag, e.g.
/// `{"type": "rotate", "angles": [0, 90]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformConfig {
    Noise(NoiseConfig),
    #[serde(rename = "flip_lr")]
    FlipLR(FlipConfig),
    #[serde(rename = "flip_ud")]
    FlipUD(FlipConfig),
    Rotate(RotateConfig),
    Square(SquareConfig),
    Resize(ResizeConfig),
}

impl TransformConfig {
    /// Draw this operator's random parameters.
    ///
    /// # Errors
    ///
    /// Returns `AugmentError::Config` if the configuration is structurally
    /// invalid. Nothing is drawn from `rng` when validation fails.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Transform, AugmentError> {
        let transform = match self {
            TransformConfig::Noise(config) => Transform::Noise(config.sample(rng)?),
            TransformConfig::FlipLR(config) => Transform::FlipLR(config.sample(rng)),
            TransformConfig::FlipUD(config) => Transform::FlipUD(config.sample(rng)),
            TransformConfig::Rotate(config) => Transform::Rotate(config.sample(rng)?),
            TransformConfig::Square(config) => Transform::Square(config.sample(rng)),
            TransformConfig::Resize(config) => Transform::Resize(config.build()?),
        };
        tracing::debug!(%transform, "sampled transform");
        Ok(transform)
    }
}

/// A sampled operator. Immutable; applying it never draws randomness.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    Noise(Noise),
    /// Mirror along the width axis.
    FlipLR(Flip),
    /// Mirror along the height axis.
    FlipUD(Flip),
    Rotate(Rotate),
    Square(Square),
    Resize(Resize),
}

impl Transform {
    /// Apply to an image.
    pub fn apply(&self, image: &Image) -> Image {
        let output = match self {
            Transform::Noise(t) => t.apply(image),
            Transform::FlipLR(t) => t.apply(FlipAxis::LeftRight, image),
            Transform::FlipUD(t) => t.apply(FlipAxis::UpDown, image),
            Transform::Rotate(t) => t.apply(image),
            Transform::Square(t) => t.apply(image),
            Transform::Resize(t) => t.apply(image),
        };
        tracing::trace!(
            transform = %self,
            from = ?image.shape(),
            to = ?output.shape(),
            "applied transform"
        );
        output
    }

    /// Whether this operator moves pixels (and so must also reach the mask).
    ///
    /// Noise only alters values and is kept off label masks.
    pub fn is_spatial(&self) -> bool {
        !matches!(self, Transform::Noise(_))
    }

    /// Operator name as used in descriptions.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Noise(_) => "Noise",
            Transform::FlipLR(_) => "FlipLR",
            Transform::FlipUD(_) => "FlipUD",
            Transform::Rotate(_) => "Rotate",
            Transform::Square(_) => "Square",
            Transform::Resize(_) => "Resize",
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Noise(t) => write!(f, "{}", t),
            Transform::FlipLR(t) | Transform::FlipUD(t) => {
                write!(f, "{}(flip={})", self.name(), t.is_active())
            }
            Transform::Rotate(t) => write!(f, "{}", t),
            Transform::Square(t) => write!(f, "{}", t),
            Transform::Resize(t) => write!(f, "{}", t),
        }
    }
}
