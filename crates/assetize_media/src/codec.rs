//! Thin wrappers around the `image` codecs.

use assetize_core::FileType;
use assetize_error::{MediaError, MediaErrorKind};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageFormat};

/// Quality used by the lossy encoders when no search parameter applies.
pub(crate) const DEFAULT_QUALITY: u8 = 75;

/// Codec format backing a file type, if the crate can decode it.
pub(crate) fn image_format(file_type: FileType) -> Option<ImageFormat> {
    match file_type {
        FileType::Jpeg => Some(ImageFormat::Jpeg),
        FileType::Png => Some(ImageFormat::Png),
        FileType::Gif => Some(ImageFormat::Gif),
        FileType::Webp => Some(ImageFormat::WebP),
        FileType::Bmp => Some(ImageFormat::Bmp),
        FileType::Tiff => Some(ImageFormat::Tiff),
        FileType::Ico => Some(ImageFormat::Ico),
        _ => None,
    }
}

#[track_caller]
fn encode_error(file_type: FileType, e: image::ImageError) -> MediaError {
    MediaError::new(MediaErrorKind::Encode {
        format: file_type.to_string(),
        message: e.to_string(),
    })
}

/// Decode `bytes` as `file_type`.
pub(crate) fn decode(bytes: &[u8], file_type: FileType) -> Result<DynamicImage, MediaError> {
    let format = image_format(file_type).ok_or_else(|| {
        MediaError::new(MediaErrorKind::Decode {
            format: file_type.to_string(),
            message: "no decoder available".to_string(),
        })
    })?;

    image::load_from_memory_with_format(bytes, format).map_err(|e| {
        MediaError::new(MediaErrorKind::Decode {
            format: file_type.to_string(),
            message: e.to_string(),
        })
    })
}

/// Encode as JPEG. Alpha is dropped, the encoder only accepts RGB and luma.
pub(crate) fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, MediaError> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buf = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
        .map_err(|e| encode_error(FileType::Jpeg, e))?;
    Ok(buf)
}

/// zlib effort and row filter for each PNG level, cheapest first.
fn png_options(level: u8) -> (CompressionType, FilterType) {
    match level {
        0 => (CompressionType::Fast, FilterType::NoFilter),
        1 => (CompressionType::Fast, FilterType::Sub),
        2 => (CompressionType::Fast, FilterType::Adaptive),
        3 => (CompressionType::Default, FilterType::NoFilter),
        4 => (CompressionType::Default, FilterType::Sub),
        5 => (CompressionType::Default, FilterType::Up),
        6 => (CompressionType::Default, FilterType::Adaptive),
        7 => (CompressionType::Best, FilterType::Sub),
        8 => (CompressionType::Best, FilterType::Paeth),
        _ => (CompressionType::Best, FilterType::Adaptive),
    }
}

/// Encode as PNG at a compression level between 0 and 9.
pub(crate) fn encode_png(image: &DynamicImage, level: u8) -> Result<Vec<u8>, MediaError> {
    let (compression, filter) = png_options(level);
    let mut buf = Vec::new();
    image
        .write_with_encoder(PngEncoder::new_with_quality(&mut buf, compression, filter))
        .map_err(|e| encode_error(FileType::Png, e))?;
    Ok(buf)
}

/// Encode as lossy WebP at `quality`. Alpha is kept when the image has it.
pub(crate) fn encode_webp(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, MediaError> {
    let (width, height) = (image.width(), image.height());
    let encoded = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height)
            .encode_simple(false, f32::from(quality))
    } else {
        let rgb = image.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height)
            .encode_simple(false, f32::from(quality))
    };

    encoded.map(|memory| memory.to_vec()).map_err(|e| {
        MediaError::new(MediaErrorKind::Encode {
            format: FileType::Webp.to_string(),
            message: format!("{:?}", e),
        })
    })
}

/// Encode with the default settings of the type's encoder.
pub(crate) fn encode_default(
    image: &DynamicImage,
    file_type: FileType,
) -> Result<Vec<u8>, MediaError> {
    match file_type {
        FileType::Jpeg => encode_jpeg(image, DEFAULT_QUALITY),
        FileType::Png => {
            let mut buf = Vec::new();
            image
                .write_with_encoder(PngEncoder::new(&mut buf))
                .map_err(|e| encode_error(FileType::Png, e))?;
            Ok(buf)
        }
        FileType::Webp => encode_webp(image, DEFAULT_QUALITY),
        other => Err(MediaError::new(MediaErrorKind::Encode {
            format: other.to_string(),
            message: "no encoder available".to_string(),
        })),
    }
}
