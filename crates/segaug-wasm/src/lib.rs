//! Segaug WASM - WebAssembly bindings for segaug
//!
//! This crate exposes segaug-core augmentation pipelines to JavaScript and
//! TypeScript, for preparing segmentation training data in the browser.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible 8-bit image wrapper
//! - `augment` - Pipeline sampling, replay, and image codecs
//!
//! # Usage
//!
//! ```typescript
//! import init, { default_pipeline, decode_image } from '@segaug/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const aug = default_pipeline(7);
//! const out = aug.apply(image);
//! console.log(`${aug.describe()} -> ${out.width}x${out.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod augment;
mod types;

pub use augment::{decode_image, default_pipeline, encode_png, JsAugmentation};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
