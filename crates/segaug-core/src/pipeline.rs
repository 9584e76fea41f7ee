//! Ordered augmentation pipelines.
//!
//! A [`PipelineConfig`] lists operator configurations. Sampling it draws every
//! operator's randomness in list order and yields an [`Augmentation`]: the
//! frozen episode that is applied to an image and, for segmentation data, to
//! its label mask.
//!
//! ```ignore
//! use rand::SeedableRng;
//! use segaug_core::{Image, PipelineConfig};
//!
//! let config = PipelineConfig::from_json(r#"{"transforms": [
//!     {"type": "flip_lr"},
//!     {"type": "rotate", "angles": [0, 15, 30]},
//!     {"type": "resize", "width": 256}
//! ]}"#)?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let augmentation = config.sample(&mut rng)?;
//! let (image, mask) = augmentation.apply_pair(&image, &mask);
//! ```

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::AugmentError;
use crate::raster::Image;
use crate::transform::{
    FlipConfig, NoiseConfig, ResizeConfig, RotateConfig, SquareConfig, Transform, TransformConfig,
};

/// An ordered list of operator configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub transforms: Vec<TransformConfig>,
}

impl Default for PipelineConfig {
    /// Segmentation training preset: noise, both flips, rotation, square
    /// crop, and a 512x512 resize.
    fn default() -> Self {
        Self {
            transforms: vec![
                TransformConfig::Noise(NoiseConfig::default()),
                TransformConfig::FlipLR(FlipConfig::default()),
                TransformConfig::FlipUD(FlipConfig::default()),
                TransformConfig::Rotate(RotateConfig::default()),
                TransformConfig::Square(SquareConfig::default()),
                TransformConfig::Resize(ResizeConfig::default()),
            ],
        }
    }
}

impl PipelineConfig {
    pub fn new(transforms: Vec<TransformConfig>) -> Self {
        Self { transforms }
    }

    /// Parse a pipeline from JSON.
    ///
    /// # Errors
    ///
    /// Returns `AugmentError::Config` for malformed JSON, unknown operator
    /// types or fields, and wrongly shaped parameters such as a scalar where
    /// a list of angles is expected.
    pub fn from_json(json: &str) -> Result<Self, AugmentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, AugmentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sample every operator, in order, from `rng`.
    ///
    /// # Errors
    ///
    /// Fails on the first operator whose configuration is invalid.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Augmentation, AugmentError> {
        let transforms = self
            .transforms
            .iter()
            .map(|config| config.sample(rng))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = transforms.len(), "sampled augmentation");
        Ok(Augmentation { transforms })
    }

    /// Sample from a fresh generator seeded with `seed`.
    ///
    /// The same seed always yields the same augmentation.
    pub fn sample_seeded(&self, seed: u64) -> Result<Augmentation, AugmentError> {
        self.sample(&mut StdRng::seed_from_u64(seed))
    }
}

/// A sampled pipeline: an immutable sequence of transforms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Augmentation {
    transforms: Vec<Transform>,
}

impl Augmentation {
    pub fn new(transforms: Vec<Transform>) -> Self {
        Self { transforms }
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Apply every transform in order.
    pub fn apply(&self, image: &Image) -> Image {
        self.run(image, |_| true)
    }

    /// Apply only the spatial transforms, for label masks.
    pub fn apply_mask(&self, mask: &Image) -> Image {
        self.run(mask, Transform::is_spatial)
    }

    /// Augment an image and its mask with the same spatial transforms.
    pub fn apply_pair(&self, image: &Image, mask: &Image) -> (Image, Image) {
        (self.apply(image), self.apply_mask(mask))
    }

    fn run(&self, image: &Image, keep: impl Fn(&Transform) -> bool) -> Image {
        self.transforms
            .iter()
            .filter(|t| keep(t))
            .fold(image.clone(), |acc, t| t.apply(&acc))
    }
}

impl fmt::Display for Augmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Augmentation([")?;
        for (i, transform) in self.transforms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", transform)?;
        }
        write!(f, "])")
    }
}
