//! Convergent compression: re-encode until a size budget is met.

use crate::codec;
use assetize_core::{FileType, Payload};
use assetize_error::AssetizeResult;
use derive_getters::Getters;
use image::DynamicImage;
use image::imageops::FilterType;

/// First quality tried by the JPEG and WebP search.
pub const QUALITY_START: u8 = 95;
/// Lowest quality tried.
pub const QUALITY_FLOOR: u8 = 10;
/// Decrement between quality steps.
pub const QUALITY_STEP: u8 = 5;
/// Highest PNG compression level tried.
pub const PNG_LEVEL_CEILING: u8 = 9;

/// Optional upper bounds applied before compressing.
///
/// Aspect ratio is preserved and images are never enlarged.
///
/// # Examples
///
/// ```
/// use assetize_media::ResizeBounds;
///
/// let bounds = ResizeBounds::new(Some(800), None);
/// assert_eq!(bounds.fit(1600, 900), Some((800, 450)));
/// assert_eq!(bounds.fit(640, 480), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct ResizeBounds {
    /// Maximum width in pixels
    max_width: Option<u32>,
    /// Maximum height in pixels
    max_height: Option<u32>,
}

impl ResizeBounds {
    /// Create bounds; `None` leaves that dimension unconstrained.
    pub fn new(max_width: Option<u32>, max_height: Option<u32>) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Whether neither dimension is bounded.
    pub fn is_unbounded(&self) -> bool {
        self.max_width.is_none() && self.max_height.is_none()
    }

    /// Dimensions that fit inside the bounds, or `None` if no resize is needed.
    pub fn fit(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        if width == 0 || height == 0 {
            return None;
        }

        let scale_w = self
            .max_width
            .map(|max| f64::from(max) / f64::from(width));
        let scale_h = self
            .max_height
            .map(|max| f64::from(max) / f64::from(height));
        let scale = match (scale_w, scale_h) {
            (Some(w), Some(h)) => w.min(h),
            (Some(w), None) => w,
            (None, Some(h)) => h,
            (None, None) => return None,
        };

        if scale >= 1.0 {
            return None;
        }

        let new_width = (f64::from(width) * scale).round().max(1.0) as u32;
        let new_height = (f64::from(height) * scale).round().max(1.0) as u32;
        Some((new_width, new_height))
    }
}

/// Compression behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct CompressionSettings {
    /// Whether compression runs at all
    enabled: bool,
    /// Payloads at or below this many bytes are left alone
    size_threshold: usize,
    /// Bounds applied once before the search
    resize: ResizeBounds,
}

impl CompressionSettings {
    /// Enabled settings with the given byte budget and no resizing.
    pub fn with_threshold(size_threshold: usize) -> Self {
        Self {
            enabled: true,
            size_threshold,
            resize: ResizeBounds::default(),
        }
    }
}

/// Encoder parameter of the last compression step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum CompressionParameter {
    /// JPEG or WebP quality
    #[display("quality {}", _0)]
    Quality(u8),
    /// PNG compression level
    #[display("level {}", _0)]
    Level(u8),
}

/// Result of a compression run.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CompressionOutcome {
    /// Final payload, never larger than the input
    payload: Payload,
    /// Number of encode steps taken by the search
    steps: usize,
    /// Parameter of the last step, if any ran
    parameter: Option<CompressionParameter>,
}

impl CompressionOutcome {
    fn unchanged(payload: Payload) -> Self {
        Self {
            payload,
            steps: 0,
            parameter: None,
        }
    }

    /// Consume the outcome, returning the payload.
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    pub(crate) fn retyped(self, file_type: FileType) -> Self {
        Self {
            payload: Payload::new(self.payload.into_bytes(), file_type),
            ..self
        }
    }
}

/// Iteratively re-encodes images until they fit the size budget.
///
/// Each step re-encodes the same baseline image with a more aggressive
/// parameter. When the parameter space runs out the last candidate is
/// returned; failing to converge is not an error.
///
/// # Examples
///
/// ```
/// use assetize_core::{FileType, Payload};
/// use assetize_media::{CompressionSettings, Compressor};
///
/// let compressor = Compressor::new(CompressionSettings::default());
/// let payload = Payload::new(b"%PDF-1.7".to_vec(), FileType::Pdf);
///
/// let outcome = compressor.compress(payload.clone()).unwrap();
/// assert_eq!(outcome.payload(), &payload);
/// assert_eq!(*outcome.steps(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Compressor {
    settings: CompressionSettings,
}

impl Compressor {
    /// Create a compressor.
    pub fn new(settings: CompressionSettings) -> Self {
        Self { settings }
    }

    /// Active settings.
    pub fn settings(&self) -> &CompressionSettings {
        &self.settings
    }

    /// Whether `file_type` is handled by the search.
    pub fn supports(file_type: FileType) -> bool {
        matches!(file_type, FileType::Jpeg | FileType::Png | FileType::Webp)
    }

    /// Compress `payload` toward the configured threshold.
    #[tracing::instrument(
        skip(self, payload),
        fields(
            file_type = %payload.file_type(),
            size = payload.len(),
            threshold = self.settings.size_threshold
        )
    )]
    pub fn compress(&self, payload: Payload) -> AssetizeResult<CompressionOutcome> {
        if !self.settings.enabled {
            return Ok(CompressionOutcome::unchanged(payload));
        }

        let file_type = *payload.file_type();
        if !Self::supports(file_type) {
            tracing::info!(%file_type, "Compression not yet supported for this file type");
            return Ok(CompressionOutcome::unchanged(payload));
        }

        let decoded = codec::decode(payload.bytes(), file_type)?;
        let (baseline, mut current) = self.baseline(decoded, &payload)?;
        let threshold = self.settings.size_threshold;
        let mut steps = 0;
        let mut parameter = None;

        if file_type == FileType::Png {
            let mut level = 0;
            while current.len() > threshold && level <= PNG_LEVEL_CEILING {
                current = codec::encode_png(&baseline, level)?;
                steps += 1;
                parameter = Some(CompressionParameter::Level(level));
                tracing::debug!(size = current.len(), level, "Compressing image");
                level += 1;
            }
        } else {
            let mut quality = QUALITY_START;
            while current.len() > threshold && quality >= QUALITY_FLOOR {
                current = match file_type {
                    FileType::Webp => codec::encode_webp(&baseline, quality)?,
                    _ => codec::encode_jpeg(&baseline, quality)?,
                };
                steps += 1;
                parameter = Some(CompressionParameter::Quality(quality));
                tracing::debug!(size = current.len(), quality, "Compressing image");
                quality -= QUALITY_STEP;
            }
        }

        if current.len() > payload.len() {
            tracing::info!(
                candidate = current.len(),
                original = payload.len(),
                "Compressed candidate is larger than the original, keeping the original"
            );
            return Ok(CompressionOutcome {
                payload,
                steps,
                parameter,
            });
        }

        tracing::info!(
            size = current.len(),
            steps,
            parameter = ?parameter,
            converged = current.len() <= threshold,
            "Compressing image done"
        );
        Ok(CompressionOutcome {
            payload: payload.with_bytes(current, file_type),
            steps,
            parameter,
        })
    }

    /// Decoded image the search starts from, with its encoded bytes.
    fn baseline(
        &self,
        image: DynamicImage,
        payload: &Payload,
    ) -> AssetizeResult<(DynamicImage, Vec<u8>)> {
        let Some((width, height)) = self.settings.resize.fit(image.width(), image.height())
        else {
            return Ok((image, payload.bytes().clone()));
        };

        tracing::debug!(
            from_width = image.width(),
            from_height = image.height(),
            width,
            height,
            "Resizing before compression"
        );
        let resized = image.resize_exact(width, height, FilterType::Lanczos3);
        let bytes = codec::encode_default(&resized, *payload.file_type())?;
        Ok((resized, bytes))
    }
}
