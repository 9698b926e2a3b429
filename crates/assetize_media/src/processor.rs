//! Normalize-then-compress chain run off the async executor.

use crate::{CompressionOutcome, Compressor, FormatNormalizer, detect};
use assetize_core::Payload;
use assetize_error::{AssetizeResult, MediaError, MediaErrorKind};

/// Runs the CPU-bound media transforms for one payload.
///
/// The work happens on the blocking thread pool so concurrent resolutions
/// keep making network progress while images are being re-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaProcessor {
    normalizer: FormatNormalizer,
    compressor: Compressor,
}

impl MediaProcessor {
    /// Create a processor from its two stages.
    pub fn new(normalizer: FormatNormalizer, compressor: Compressor) -> Self {
        Self {
            normalizer,
            compressor,
        }
    }

    /// The normalization stage.
    pub fn normalizer(&self) -> &FormatNormalizer {
        &self.normalizer
    }

    /// The compression stage.
    pub fn compressor(&self) -> &Compressor {
        &self.compressor
    }

    /// Normalize and compress synchronously, re-detecting the final type.
    pub fn process_blocking(&self, payload: Payload) -> AssetizeResult<CompressionOutcome> {
        let normalized = self.normalizer.normalize(payload)?;
        let outcome = self.compressor.compress(normalized)?;

        let detected = detect(outcome.payload().bytes());
        if detected == *outcome.payload().file_type() {
            return Ok(outcome);
        }

        tracing::debug!(
            expected = %outcome.payload().file_type(),
            %detected,
            "Re-detected payload type differs"
        );
        Ok(outcome.retyped(detected))
    }

    /// Normalize and compress on the blocking thread pool.
    #[tracing::instrument(skip(self, payload), fields(file_type = %payload.file_type(), size = payload.len()))]
    pub async fn process(&self, payload: Payload) -> AssetizeResult<CompressionOutcome> {
        let processor = *self;
        tokio::task::spawn_blocking(move || processor.process_blocking(payload))
            .await
            .map_err(|e| MediaError::new(MediaErrorKind::Worker(e.to_string())))?
    }
}
