use assetize_core::{DestinationNamespace, FileType, Payload, ReplacementMapping};
use strum::IntoEnumIterator;

#[test]
fn namespace_trims_directory_and_base_url() {
    let ns = DestinationNamespace::new("octo", "assets", "/img/2025/")
        .with_base_url("https://cdn.example.com/assets/");

    assert_eq!(ns.directory(), "img/2025");
    assert_eq!(ns.base_url(), "https://cdn.example.com/assets");
    assert_eq!(ns.repository(), "octo/assets");
    assert_eq!(
        ns.object_url("img/2025/abc.png"),
        "https://cdn.example.com/assets/img/2025/abc.png"
    );
}

#[test]
fn namespace_path_of_strips_base_url() {
    let ns = DestinationNamespace::new("octo", "assets", "img");

    assert_eq!(
        ns.path_of("https://octo.github.io/assets/img/abc.png"),
        Some("img/abc.png".to_string())
    );
    assert_eq!(ns.path_of("https://example.com/img/abc.png"), None);
}

#[test]
fn every_file_type_has_extension_and_mime() {
    for file_type in FileType::iter() {
        assert!(!file_type.extension().is_empty());
        assert!(file_type.mime_type().contains('/'));
    }
}

#[test]
fn file_type_serializes_lowercase() {
    let json = serde_json::to_string(&FileType::Webp).unwrap();
    assert_eq!(json, "\"webp\"");
}

#[test]
fn payload_transforms_leave_original_untouched() {
    let original = Payload::new(vec![1, 2, 3, 4], FileType::Webp);
    let converted = original.with_bytes(vec![9, 9], FileType::Jpeg);

    assert_eq!(original.bytes(), &vec![1, 2, 3, 4]);
    assert_eq!(*original.file_type(), FileType::Webp);
    assert_eq!(*converted.file_type(), FileType::Jpeg);
    assert_eq!(converted.into_bytes(), vec![9, 9]);
}

#[test]
fn mapping_rewrites_html_tags() {
    let mapping = ReplacementMapping {
        original_text: r#"<img width="300" src="https://example.com/a.png">"#.to_string(),
        original_url: "https://example.com/a.png".to_string(),
        published_url: "https://octo.github.io/assets/img/abc.png".to_string(),
    };

    assert_eq!(
        mapping.rewritten_text(),
        r#"<img width="300" src="https://octo.github.io/assets/img/abc.png">"#
    );
}
