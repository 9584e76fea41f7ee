//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while configuring transforms or moving images in and out
/// of the crate.
///
/// Applying an already-sampled transform never fails; everything that can go
/// wrong is reported when a configuration is parsed or sampled, or when an
/// image is built, decoded or encoded.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// A transform or pipeline configuration is structurally invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Sample buffer length doesn't match the declared dimensions.
    #[error("Invalid image data: expected {expected} samples (height * width * channels), got {actual}")]
    InvalidImage { expected: usize, actual: usize },

    /// Width, height or channel count is zero.
    #[error("Empty image: {width}x{height} with {channels} channels")]
    EmptyImage {
        width: u32,
        height: u32,
        channels: u32,
    },

    /// The channel count has no 8-bit `image` crate equivalent.
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannels(usize),

    /// The bytes could not be decoded as an image.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The image could not be encoded.
    #[error("Encode error: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for AugmentError {
    fn from(err: serde_json::Error) -> Self {
        AugmentError::Config(err.to_string())
    }
}
