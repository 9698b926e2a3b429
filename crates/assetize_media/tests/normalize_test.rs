//! Tests for format normalization and the combined processor.

mod test_utils;

use assetize_core::{FileType, Payload};
use assetize_error::AssetizeErrorKind;
use assetize_media::{
    CompressionParameter, CompressionSettings, Compressor, FormatNormalizer, MediaProcessor, detect,
};
use test_utils::{encode_png_fast, encode_webp, noise_image};

#[test]
fn test_webp_becomes_jpeg() {
    let payload = Payload::new(encode_webp(&noise_image(32, 32)), FileType::Webp);

    let normalized = FormatNormalizer::new(true).normalize(payload).unwrap();

    assert_eq!(*normalized.file_type(), FileType::Jpeg);
    assert_eq!(detect(normalized.bytes()), FileType::Jpeg);
}

#[test]
fn test_disabled_normalizer_is_passthrough() {
    let payload = Payload::new(encode_webp(&noise_image(16, 16)), FileType::Webp);

    let normalized = FormatNormalizer::new(false).normalize(payload.clone()).unwrap();

    assert_eq!(normalized, payload);
}

#[test]
fn test_other_formats_pass_through() {
    let png = Payload::new(encode_png_fast(&noise_image(16, 16)), FileType::Png);
    let unknown = Payload::new(b"not an image".to_vec(), FileType::Unknown);
    let normalizer = FormatNormalizer::new(true);

    assert_eq!(normalizer.normalize(png.clone()).unwrap(), png);
    assert_eq!(normalizer.normalize(unknown.clone()).unwrap(), unknown);
}

#[test]
fn test_corrupt_webp_is_a_media_error() {
    let payload = Payload::new(b"RIFF\x10\0\0\0WEBPVP8 garbage".to_vec(), FileType::Webp);

    let err = FormatNormalizer::new(true).normalize(payload).unwrap_err();

    assert!(matches!(err.kind(), AssetizeErrorKind::Media(_)));
}

#[tokio::test]
async fn test_processor_normalizes_then_compresses() {
    let processor = MediaProcessor::new(
        FormatNormalizer::new(true),
        Compressor::new(CompressionSettings::with_threshold(1)),
    );
    let payload = Payload::new(encode_webp(&noise_image(64, 64)), FileType::Webp);

    let outcome = processor.process(payload).await.unwrap();

    assert_eq!(*outcome.payload().file_type(), FileType::Jpeg);
    assert_eq!(*outcome.steps(), 18);
    assert_eq!(*outcome.parameter(), Some(CompressionParameter::Quality(10)));
}

#[tokio::test]
async fn test_default_processor_leaves_payload_alone() {
    let payload = Payload::new(encode_png_fast(&noise_image(8, 8)), FileType::Png);

    let outcome = MediaProcessor::default().process(payload.clone()).await.unwrap();

    assert_eq!(outcome.into_payload(), payload);
}
