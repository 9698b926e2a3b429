//! Synthetic image helpers.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, Rgb, RgbImage};

/// Pseudo-random RGB noise, which compresses poorly in every format.
pub fn noise_image(width: u32, height: u32) -> DynamicImage {
    let mut state: u32 = 0x2545_f491;
    let image = RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xff) as u8
        };
        Rgb([next(), next(), next()])
    });
    DynamicImage::ImageRgb8(image)
}

/// Encode as JPEG at `quality`.
#[allow(dead_code)]
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Vec<u8> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buf = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
        .unwrap();
    buf
}

/// Encode as PNG with the cheapest settings.
#[allow(dead_code)]
pub fn encode_png_fast(image: &DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image
        .write_with_encoder(PngEncoder::new_with_quality(
            &mut buf,
            CompressionType::Fast,
            FilterType::NoFilter,
        ))
        .unwrap();
    buf
}

/// Encode as lossless WebP.
#[allow(dead_code)]
pub fn encode_webp(image: &DynamicImage) -> Vec<u8> {
    let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
    let mut buf = Vec::new();
    rgba.write_with_encoder(WebPEncoder::new_lossless(&mut buf))
        .unwrap();
    buf
}

/// Encode as lossy WebP at `quality`.
#[allow(dead_code)]
pub fn encode_webp_lossy(image: &DynamicImage, quality: f32) -> Vec<u8> {
    let rgb = image.to_rgb8();
    webp::Encoder::from_rgb(rgb.as_raw(), image.width(), image.height())
        .encode_simple(false, quality)
        .unwrap()
        .to_vec()
}
