//! Media transforms for the assetize pipeline.
//!
//! - [`detect`] identifies payload types from their magic bytes.
//! - [`FormatNormalizer`] converts WebP into JPEG when enabled.
//! - [`Compressor`] searches encoder parameters until a size budget is met.
//! - [`ContentNamer`] derives content-addressed object paths.
//! - [`MediaProcessor`] chains normalization and compression off the executor.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod compress;
mod detect;
mod namer;
mod normalize;
mod processor;

pub use compress::{
    CompressionOutcome, CompressionParameter, CompressionSettings, Compressor, PNG_LEVEL_CEILING,
    QUALITY_FLOOR, QUALITY_START, QUALITY_STEP, ResizeBounds,
};
pub use detect::detect;
pub use namer::{ContentNamer, STEM_LENGTH};
pub use normalize::{FormatNormalizer, NORMALIZED_JPEG_QUALITY};
pub use processor::MediaProcessor;
