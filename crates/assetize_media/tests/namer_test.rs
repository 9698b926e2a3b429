//! Tests for type detection and content naming.

mod test_utils;

use assetize_core::FileType;
use assetize_media::{ContentNamer, detect};
use test_utils::{encode_jpeg, encode_png_fast, encode_webp, noise_image};

#[test]
fn test_path_uses_truncated_url_hash() {
    let namer = ContentNamer::new("img");

    assert_eq!(
        namer.path("https://example.com/a.png", FileType::Png),
        "img/494a30704d4f32ac0b81739d18a66d36.png"
    );
    assert_eq!(
        namer.path(
            "https://github.com/user-attachments/assets/0f1e",
            FileType::Jpeg
        ),
        "img/5fac9c2c9afea7fe42f4f62e656c3161.jpg"
    );
}

#[test]
fn test_path_is_deterministic_and_distinct() {
    let namer = ContentNamer::new("assets/images/");

    let a1 = namer.path("https://example.com/a.png", FileType::Png);
    let a2 = namer.path("https://example.com/a.png", FileType::Png);
    let b = namer.path("https://example.com/b.png", FileType::Png);

    assert_eq!(a1, a2);
    assert_ne!(a1, b);
    assert!(a1.starts_with("assets/images/"));
}

#[test]
fn test_stem_ignores_file_type() {
    let namer = ContentNamer::new("img");
    let png = namer.path("https://example.com/a", FileType::Png);
    let unknown = namer.path("https://example.com/a", FileType::Unknown);

    assert_eq!(png.trim_end_matches(".png"), unknown.trim_end_matches(".bin"));
    assert!(unknown.ends_with(".bin"));
}

#[test]
fn test_empty_directory() {
    let path = ContentNamer::new("").path("https://example.com/a.png", FileType::Png);
    assert_eq!(path, "494a30704d4f32ac0b81739d18a66d36.png");
}

#[test]
fn test_detect_encoded_images() {
    let image = noise_image(8, 8);

    assert_eq!(detect(&encode_jpeg(&image, 90)), FileType::Jpeg);
    assert_eq!(detect(&encode_png_fast(&image)), FileType::Png);
    assert_eq!(detect(&encode_webp(&image)), FileType::Webp);
}

#[test]
fn test_detect_signatures() {
    assert_eq!(detect(b"GIF89a\x01\x00\x01\x00"), FileType::Gif);
    assert_eq!(detect(b"BM\x3a\0\0\0\0\0\0\0"), FileType::Bmp);
    assert_eq!(detect(b"II*\0\x08\0\0\0"), FileType::Tiff);
    assert_eq!(detect(b"\0\0\x01\0\x01\0\x10\x10"), FileType::Ico);
    assert_eq!(detect(b"\0\0\0\x1cftypavif\0\0\0\0"), FileType::Avif);
    assert_eq!(detect(b"\0\0\0\x18ftypmp42\0\0\0\0"), FileType::Mp4);
    assert_eq!(detect(b"\0\0\0\x14ftypqt  \0\0\0\0"), FileType::Mov);
    assert_eq!(detect(b"%PDF-1.4\n"), FileType::Pdf);
    assert_eq!(detect(b"PK\x03\x04\x14\0"), FileType::Zip);
}

#[test]
fn test_detect_unknown() {
    assert_eq!(detect(b""), FileType::Unknown);
    assert_eq!(detect(b"hello, world"), FileType::Unknown);
    assert_eq!(FileType::Unknown.extension(), "bin");
}
