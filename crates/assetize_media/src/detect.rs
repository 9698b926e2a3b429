//! File type detection from magic bytes.

use assetize_core::FileType;
use image::ImageFormat;

/// Detect the type of `bytes`.
///
/// Image formats are recognised by the `image` codec signatures; a few
/// container formats commonly attached to issues are matched by their own
/// signatures. Everything else is [`FileType::Unknown`].
///
/// # Examples
///
/// ```
/// use assetize_core::FileType;
/// use assetize_media::detect;
///
/// assert_eq!(detect(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"), FileType::Png);
/// assert_eq!(detect(b"%PDF-1.7\n"), FileType::Pdf);
/// assert_eq!(detect(b"plain text"), FileType::Unknown);
/// ```
pub fn detect(bytes: &[u8]) -> FileType {
    if let Ok(format) = image::guess_format(bytes)
        && let Some(file_type) = from_image_format(format)
    {
        return file_type;
    }

    detect_container(bytes).unwrap_or(FileType::Unknown)
}

fn from_image_format(format: ImageFormat) -> Option<FileType> {
    match format {
        ImageFormat::Jpeg => Some(FileType::Jpeg),
        ImageFormat::Png => Some(FileType::Png),
        ImageFormat::Gif => Some(FileType::Gif),
        ImageFormat::WebP => Some(FileType::Webp),
        ImageFormat::Bmp => Some(FileType::Bmp),
        ImageFormat::Tiff => Some(FileType::Tiff),
        ImageFormat::Ico => Some(FileType::Ico),
        ImageFormat::Avif => Some(FileType::Avif),
        _ => None,
    }
}

fn detect_container(bytes: &[u8]) -> Option<FileType> {
    if bytes.starts_with(b"%PDF-") {
        return Some(FileType::Pdf);
    }
    if bytes.starts_with(b"PK\x03\x04") {
        return Some(FileType::Zip);
    }

    // ISO base media: 4-byte box size, `ftyp`, then the major brand.
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        return match &bytes[8..12] {
            b"avif" | b"avis" => Some(FileType::Avif),
            b"qt  " => Some(FileType::Mov),
            _ => Some(FileType::Mp4),
        };
    }

    None
}
