//! Detected file types.

use serde::{Deserialize, Serialize};

/// Type of a fetched or transformed payload.
///
/// Detection never fails: anything unrecognised is [`FileType::Unknown`],
/// which is published with the generic `bin` extension.
///
/// # Examples
///
/// ```
/// use assetize_core::FileType;
///
/// assert_eq!(FileType::Jpeg.extension(), "jpg");
/// assert_eq!(FileType::Unknown.extension(), "bin");
/// assert_eq!(format!("{}", FileType::Png), "png");
/// assert!(FileType::Webp.is_image());
/// assert!(!FileType::Pdf.is_image());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// JPEG image
    #[display("jpeg")]
    Jpeg,
    /// PNG image
    #[display("png")]
    Png,
    /// GIF image
    #[display("gif")]
    Gif,
    /// WebP image
    #[display("webp")]
    Webp,
    /// BMP image
    #[display("bmp")]
    Bmp,
    /// TIFF image
    #[display("tiff")]
    Tiff,
    /// ICO image
    #[display("ico")]
    Ico,
    /// AVIF image
    #[display("avif")]
    Avif,
    /// MPEG-4 video
    #[display("mp4")]
    Mp4,
    /// QuickTime video
    #[display("mov")]
    Mov,
    /// PDF document
    #[display("pdf")]
    Pdf,
    /// ZIP archive
    #[display("zip")]
    Zip,
    /// Anything detection could not identify
    #[display("unknown")]
    Unknown,
}

impl FileType {
    /// File extension used when naming published objects.
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Jpeg => "jpg",
            FileType::Png => "png",
            FileType::Gif => "gif",
            FileType::Webp => "webp",
            FileType::Bmp => "bmp",
            FileType::Tiff => "tif",
            FileType::Ico => "ico",
            FileType::Avif => "avif",
            FileType::Mp4 => "mp4",
            FileType::Mov => "mov",
            FileType::Pdf => "pdf",
            FileType::Zip => "zip",
            FileType::Unknown => "bin",
        }
    }

    /// MIME type of the payload.
    pub fn mime_type(&self) -> &'static str {
        match self {
            FileType::Jpeg => "image/jpeg",
            FileType::Png => "image/png",
            FileType::Gif => "image/gif",
            FileType::Webp => "image/webp",
            FileType::Bmp => "image/bmp",
            FileType::Tiff => "image/tiff",
            FileType::Ico => "image/x-icon",
            FileType::Avif => "image/avif",
            FileType::Mp4 => "video/mp4",
            FileType::Mov => "video/quicktime",
            FileType::Pdf => "application/pdf",
            FileType::Zip => "application/zip",
            FileType::Unknown => "application/octet-stream",
        }
    }

    /// Whether the type is a still or animated image.
    pub fn is_image(&self) -> bool {
        matches!(
            self,
            FileType::Jpeg
                | FileType::Png
                | FileType::Gif
                | FileType::Webp
                | FileType::Bmp
                | FileType::Tiff
                | FileType::Ico
                | FileType::Avif
        )
    }
}
