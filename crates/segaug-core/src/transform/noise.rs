//! Additive Gaussian noise.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::error::AugmentError;
use crate::raster::Image;

/// Configuration for [`Noise`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    /// Probability that the sampled transform is active. Not range-checked:
    /// values above 1 always activate, values at or below 0 never do.
    pub p: f64,
    /// Seed of the noise field. Every active instance with the same seed
    /// adds the same noise.
    pub seed: u64,
    /// Mean of the Gaussian noise.
    pub mean: f64,
    /// Variance of the Gaussian noise.
    pub var: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            p: 0.1,
            seed: 0,
            mean: 0.0,
            var: 0.01,
        }
    }
}

impl NoiseConfig {
    /// Default noise parameters with activation probability `p`.
    pub fn with_probability(p: f64) -> Self {
        Self {
            p,
            ..Self::default()
        }
    }

    /// Draw the activation flag.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Noise, AugmentError> {
        if !self.mean.is_finite() || !self.var.is_finite() || self.var < 0.0 {
            return Err(AugmentError::Config(format!(
                "noise mean must be finite and variance non-negative, got mean={} var={}",
                self.mean, self.var
            )));
        }

        let active = rng.gen::<f64>() < self.p;
        Ok(Noise {
            active,
            seed: self.seed,
            mean: self.mean,
            std_dev: self.var.sqrt(),
        })
    }
}

/// Seeded additive Gaussian noise, decided once at sampling time.
#[derive(Debug, Clone, PartialEq)]
pub struct Noise {
    active: bool,
    seed: u64,
    mean: f64,
    std_dev: f64,
}

impl Noise {
    /// Build with default noise parameters and a fixed activation flag.
    pub fn new(active: bool) -> Self {
        let config = NoiseConfig::default();
        Self {
            active,
            seed: config.seed,
            mean: config.mean,
            std_dev: config.var.sqrt(),
        }
    }

    /// Whether applying this transform changes the image.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Add the noise field and clip.
    ///
    /// Output is clipped to `[0, 1]`, or to `[-1, 1]` when the input holds
    /// negative samples. Inactive noise returns the input unchanged.
    pub fn apply(&self, image: &Image) -> Image {
        if !self.active {
            return image.clone();
        }

        let low = match image.min_max() {
            Some((min, _)) if min < 0.0 => -1.0,
            _ => 0.0,
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        let pixels = image
            .pixels
            .iter()
            .map(|&v| {
                let z: f64 = StandardNormal.sample(&mut rng);
                (v as f64 + self.mean + self.std_dev * z).clamp(low, 1.0) as f32
            })
            .collect();

        Image::new(image.width, image.height, image.channels, pixels)
    }
}

impl fmt::Display for Noise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Noise(noise={})", self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Image {
        Image::from_fn(16, 12, 3, |x, y, c| (x + y + c) as f32 / 32.0)
    }

    #[test]
    fn test_inactive_is_identity() {
        let img = gradient();
        assert_eq!(Noise::new(false).apply(&img), img);
    }

    #[test]
    fn test_active_changes_image_and_keeps_shape() {
        let img = gradient();
        let noisy = Noise::new(true).apply(&img);

        assert_eq!(noisy.shape(), img.shape());
        assert_ne!(noisy, img);
    }

    #[test]
    fn test_active_noise_is_clipped() {
        let img = gradient();
        let noisy = Noise::new(true).apply(&img);

        assert!(noisy.pixels.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_negative_input_clips_to_minus_one() {
        let img = Image::from_fn(8, 8, 1, |x, _, _| if x == 0 { -0.95 } else { 0.0 });
        let noisy = Noise::new(true).apply(&img);

        assert!(noisy.pixels.iter().all(|&v| (-1.0..=1.0).contains(&v)));
        assert!(noisy.pixels.iter().any(|&v| v < 0.0));
    }

    #[test]
    fn test_same_seed_same_noise() {
        let img = gradient();
        let a = Noise::new(true).apply(&img);
        let b = Noise::new(true).apply(&img);

        assert_eq!(a, b);
    }

    #[test]
    fn test_probability_saturates() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            assert!(NoiseConfig::with_probability(1.5).sample(&mut rng).unwrap().is_active());
            assert!(!NoiseConfig::with_probability(-0.5).sample(&mut rng).unwrap().is_active());
        }
    }

    #[test]
    fn test_negative_variance_rejected() {
        let config = NoiseConfig {
            var: -1.0,
            ..NoiseConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            config.sample(&mut rng),
            Err(AugmentError::Config(_))
        ));
    }

    #[test]
    fn test_describe() {
        assert_eq!(Noise::new(true).to_string(), "Noise(noise=true)");
        assert_eq!(Noise::new(false).to_string(), "Noise(noise=false)");
    }
}
