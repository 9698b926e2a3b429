//! Conversion into broadly displayable formats.

use crate::codec;
use assetize_core::{FileType, Payload};
use assetize_error::AssetizeResult;

/// JPEG quality used when converting WebP payloads.
pub const NORMALIZED_JPEG_QUALITY: u8 = 80;

/// Converts payloads that some viewers cannot display.
///
/// The only rule is WebP to JPEG; every other type passes through.
///
/// # Examples
///
/// ```
/// use assetize_core::FileType;
/// use assetize_media::FormatNormalizer;
///
/// let normalizer = FormatNormalizer::new(true);
/// assert_eq!(normalizer.target_type(FileType::Webp), FileType::Jpeg);
/// assert_eq!(normalizer.target_type(FileType::Png), FileType::Png);
///
/// let disabled = FormatNormalizer::new(false);
/// assert_eq!(disabled.target_type(FileType::Webp), FileType::Webp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatNormalizer {
    enabled: bool,
}

impl FormatNormalizer {
    /// Create a normalizer.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether normalization is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Type a payload of `file_type` will have after normalization.
    ///
    /// Computed without decoding, so existing objects can be looked up
    /// before any transform runs.
    pub fn target_type(&self, file_type: FileType) -> FileType {
        match file_type {
            FileType::Webp if self.enabled => FileType::Jpeg,
            other => other,
        }
    }

    /// Convert the payload if a rule applies to its type.
    #[tracing::instrument(skip(self, payload), fields(file_type = %payload.file_type(), size = payload.len()))]
    pub fn normalize(&self, payload: Payload) -> AssetizeResult<Payload> {
        let file_type = *payload.file_type();
        let target = self.target_type(file_type);
        if target == file_type {
            return Ok(payload);
        }

        let image = codec::decode(payload.bytes(), file_type)?;
        let bytes = codec::encode_jpeg(&image, NORMALIZED_JPEG_QUALITY)?;
        let converted = payload.with_bytes(bytes, target);

        tracing::info!(
            from = %file_type,
            to = %target,
            size = converted.len(),
            "Converted into compatible format"
        );
        Ok(converted)
    }
}
