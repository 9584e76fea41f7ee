//! Segaug Core - Replayable image augmentation
//!
//! This crate provides randomized augmentation operators for training image
//! segmentation models: noise, flips, rotation with padding-free cropping,
//! square cropping, and resizing.
//!
//! Every operator is sampled once from a configuration and an explicit random
//! generator, then applied deterministically. One sampled [`Augmentation`]
//! can therefore be replayed on an image and on its label mask.

pub mod error;
pub mod pipeline;
pub mod raster;
pub mod transform;

pub use error::AugmentError;
pub use pipeline::{Augmentation, PipelineConfig};
pub use raster::{FilterType, Image};
pub use transform::{Transform, TransformConfig};
