use crate::fixtures::{jpeg_data_url, png_bytes, png_data_url};
use docsign_core::domain::signature::{signature_storage_key, ImageFormat};
use docsign_core::domain::{SignatureImage, SignerRole};
use docsign_core::foundation::util::encoding::encode_base64;
use docsign_core::foundation::{DocumentId, SignatureError, DEFAULT_MAX_SIGNATURE_IMAGE_BYTES};

#[test]
fn png_and_jpeg_data_urls_decode() {
    let png = SignatureImage::from_data_url(&png_data_url(3), DEFAULT_MAX_SIGNATURE_IMAGE_BYTES).expect("png");
    assert_eq!(png.format, ImageFormat::Png);
    assert_eq!(png.bytes, png_bytes(3));
    assert_eq!(png.format.content_type(), "image/png");

    let jpeg = SignatureImage::from_data_url(&jpeg_data_url(), DEFAULT_MAX_SIGNATURE_IMAGE_BYTES).expect("jpeg");
    assert_eq!(jpeg.format, ImageFormat::Jpeg);
    assert_eq!(jpeg.format.extension(), "jpg");
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let padded = format!("  {}\n", png_data_url(1));
    assert!(SignatureImage::from_data_url(&padded, DEFAULT_MAX_SIGNATURE_IMAGE_BYTES).is_ok());
}

#[test]
fn malformed_payloads_are_rejected() {
    let declared_png_holding_jpeg = format!("data:image/png;base64,{}", encode_base64(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]));
    let cases = [
        String::new(),
        "not-a-data-url".to_string(),
        "data:image/png,raw".to_string(),
        "data:image/gif;base64,R0lGODlh".to_string(),
        "data:image/png;base64,%%%".to_string(),
        declared_png_holding_jpeg,
    ];
    for case in cases {
        let err = SignatureImage::from_data_url(&case, DEFAULT_MAX_SIGNATURE_IMAGE_BYTES).expect_err("should reject");
        assert!(matches!(err, SignatureError::InvalidSignaturePayload { .. }), "case {case:?} gave {err:?}");
        assert!(err.is_user_facing());
    }
}

#[test]
fn size_limit_is_inclusive() {
    let exact = png_bytes(0).len();
    assert!(SignatureImage::from_data_url(&png_data_url(0), exact).is_ok());
    assert!(SignatureImage::from_data_url(&png_data_url(0), exact - 1).is_err());
}

#[test]
fn storage_key_layout() {
    let doc = DocumentId::from("doc-9");
    let key = signature_storage_key(&doc, SignerRole::OrganizationSeal, 42, ImageFormat::Jpeg);
    assert!(key.starts_with("signatures/doc-9/organization_seal-42-"), "{key}");
    assert!(key.ends_with(".jpg"));
}
