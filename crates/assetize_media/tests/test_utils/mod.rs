//! Test utilities for media tests.
//!
//! Images are synthesised in-test so no fixtures are needed.

pub mod images;

#[allow(unused_imports)]
pub use images::{encode_jpeg, encode_png_fast, encode_webp, encode_webp_lossy, noise_image};
