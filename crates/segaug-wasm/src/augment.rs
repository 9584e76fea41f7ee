//! Augmentation pipeline WASM bindings.
//!
//! A `JsAugmentation` is one sampled episode: build it from a pipeline config
//! and a seed, then replay it on an image and its label mask.
//!
//! # Example
//!
//! ```typescript
//! import { JsAugmentation, decode_image } from '@segaug/wasm';
//!
//! const image = decode_image(new Uint8Array(await photo.arrayBuffer()));
//! const mask = decode_image(new Uint8Array(await label.arrayBuffer()));
//!
//! const aug = new JsAugmentation({
//!   transforms: [
//!     { type: 'flip_lr' },
//!     { type: 'rotate', angles: [0, 15, 30] },
//!     { type: 'square' },
//!     { type: 'resize', width: 256 },
//!   ],
//! }, 42);
//!
//! console.log(aug.describe());
//! const outImage = aug.apply(image);
//! const outMask = aug.apply_mask(mask);
//! ```

use segaug_core::{Augmentation, Image, PipelineConfig};
use wasm_bindgen::prelude::*;

use crate::types::JsImage;

/// A sampled augmentation for JavaScript.
#[wasm_bindgen]
pub struct JsAugmentation {
    inner: Augmentation,
}

#[wasm_bindgen]
impl JsAugmentation {
    /// Sample a pipeline described by a JS object.
    ///
    /// # Arguments
    ///
    /// * `config` - `{ transforms: [{ type: 'noise' | 'flip_lr' | ..., ... }] }`
    /// * `seed` - Seed for every random draw; equal seeds give equal episodes
    ///
    /// # Errors
    ///
    /// Throws if the config does not deserialize or an operator is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, seed: u32) -> Result<JsAugmentation, JsValue> {
        let config: PipelineConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::sample(&config, seed).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply every transform to an image.
    pub fn apply(&self, image: &JsImage) -> JsImage {
        JsImage::from_image(&self.inner.apply(&image.to_image()))
    }

    /// Apply only the spatial transforms, for label masks.
    pub fn apply_mask(&self, mask: &JsImage) -> JsImage {
        JsImage::from_image(&self.inner.apply_mask(&mask.to_image()))
    }

    /// One-line description of the sampled episode.
    pub fn describe(&self) -> String {
        self.inner.to_string()
    }

    /// Per-transform descriptions, in application order.
    pub fn descriptions(&self) -> js_sys::Array {
        self.description_list()
            .into_iter()
            .map(|d| JsValue::from_str(&d))
            .collect()
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }
}

impl JsAugmentation {
    pub(crate) fn sample(
        config: &PipelineConfig,
        seed: u32,
    ) -> Result<Self, segaug_core::AugmentError> {
        Ok(Self {
            inner: config.sample_seeded(u64::from(seed))?,
        })
    }

    pub(crate) fn description_list(&self) -> Vec<String> {
        self.inner
            .transforms()
            .iter()
            .map(|t| t.to_string())
            .collect()
    }
}

/// Sample the default segmentation preset (noise, flips, rotation, square
/// crop, 512x512 resize).
#[wasm_bindgen]
pub fn default_pipeline(seed: u32) -> Result<JsAugmentation, JsValue> {
    JsAugmentation::sample(&PipelineConfig::default(), seed)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode PNG or JPEG bytes. Grayscale files stay single-channel.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    Image::decode(bytes)
        .map(|img| JsImage::from_image(&img))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    image
        .to_image()
        .encode_png()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
///
/// These tests go through the `#[wasm_bindgen]` entry points, which return
/// `Result<T, JsValue>` and can only run on wasm32 targets. Use
/// `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js_config(json: &str) -> JsValue {
        js_sys::JSON::parse(json).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_new_from_js_object() {
        let config = js_config(
            r#"{"transforms": [{"type": "flip_lr", "p": 1.0}, {"type": "rotate", "angles": [90]}]}"#,
        );
        let aug = JsAugmentation::new(config, 0).unwrap();

        assert_eq!(aug.length(), 2);
        assert_eq!(
            aug.describe(),
            "Augmentation([FlipLR(flip=true), Rotate(angle=90)])"
        );
    }

    #[wasm_bindgen_test]
    fn test_descriptions_array() {
        let config = js_config(
            r#"{"transforms": [{"type": "flip_lr", "p": 1.0}, {"type": "rotate", "angles": [90]}]}"#,
        );
        let descriptions = JsAugmentation::new(config, 0).unwrap().descriptions();

        assert_eq!(descriptions.length(), 2);
        assert_eq!(
            descriptions.get(0).as_string().as_deref(),
            Some("FlipLR(flip=true)")
        );
        assert_eq!(
            descriptions.get(1).as_string().as_deref(),
            Some("Rotate(angle=90)")
        );
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_unknown_type() {
        let config = js_config(r#"{"transforms": [{"type": "shear"}]}"#);
        assert!(JsAugmentation::new(config, 0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_empty_angles() {
        let config = js_config(r#"{"transforms": [{"type": "rotate", "angles": []}]}"#);
        let err = JsAugmentation::new(config, 0).err().unwrap();

        assert!(err.as_string().unwrap().starts_with("Invalid configuration"));
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_non_object() {
        assert!(JsAugmentation::new(JsValue::from_f64(3.0), 0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_default_pipeline() {
        let aug = default_pipeline(1).unwrap();
        assert_eq!(aug.length(), 6);

        let image = JsImage::new(64, 48, 3, vec![128u8; 64 * 48 * 3]).unwrap();
        let out = aug.apply(&image);
        assert_eq!((out.width(), out.height(), out.channels()), (512, 512, 3));
    }

    #[wasm_bindgen_test]
    fn test_decode_garbage_fails() {
        let err = decode_image(&[0, 1, 2]).err().unwrap();
        assert!(err.as_string().unwrap().starts_with("Decode error"));
    }

    #[wasm_bindgen_test]
    fn test_encode_decode_round_trip() {
        let image = JsImage::new(3, 2, 1, vec![0, 50, 100, 150, 200, 255]).unwrap();
        let bytes = encode_png(&image).unwrap();
        let decoded = decode_image(&bytes).unwrap();

        assert_eq!(decoded, image);
    }
}
