use crate::fixtures::{png_bytes, png_data_url, CoordinatorBuilder, TEST_PUBLIC_BASE_URL};
use docsign_core::application::{LoadState, SealSearchConfig};
use docsign_core::domain::{DocumentType, OrganizationSettings, SignDenial, SignerRole};
use docsign_core::foundation::DEFAULT_SETTINGS_BUCKET;
use docsign_core::infrastructure::storage::{DocumentStore, ObjectStore};
use std::sync::atomic::Ordering;

const SETTINGS_SEAL_URL: &str = "https://cdn.test/branding/official-seal.png";

#[tokio::test]
async fn settings_url_is_used_without_scanning() {
    let builder = CoordinatorBuilder::new(DocumentType::CompletionCertificate);
    let store = builder.shared_store();
    store
        .inner
        .put_organization_settings(OrganizationSettings {
            organization_name: Some("Acme Training".to_string()),
            seal_url: Some(SETTINGS_SEAL_URL.to_string()),
            seal_path: None,
        })
        .await
        .expect("settings");

    let mut coordinator = builder.open().await;
    assert_eq!(coordinator.signatures().organization_seal.as_deref(), Some(SETTINGS_SEAL_URL));
    assert_eq!(store.list_objects_calls.load(Ordering::SeqCst), 0);
    assert_eq!(coordinator.can_sign(SignerRole::OrganizationSeal).denial, Some(SignDenial::AlreadySigned));

    coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect("trainer");
    assert_eq!(coordinator.state(), LoadState::Complete);
}

#[tokio::test]
async fn settings_path_resolves_inside_settings_bucket() {
    let builder = CoordinatorBuilder::new(DocumentType::Invoice);
    let store = builder.shared_store();
    store
        .inner
        .put_organization_settings(OrganizationSettings { seal_path: Some("brand/seal.png".to_string()), ..Default::default() })
        .await
        .expect("settings");

    let coordinator = builder.open().await;
    let expected = format!("{TEST_PUBLIC_BASE_URL}/{DEFAULT_SETTINGS_BUCKET}/brand/seal.png");
    assert_eq!(coordinator.signatures().organization_seal, Some(expected));
    assert_eq!(store.list_objects_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn storage_scan_finds_seal_like_image() {
    let builder = CoordinatorBuilder::new(DocumentType::CompletionCertificate);
    let store = builder.shared_store();
    store.inner.put_object(DEFAULT_SETTINGS_BUCKET, "uploads/logo.png", png_bytes(1), "image/png").await.expect("put");
    store.inner.put_object(DEFAULT_SETTINGS_BUCKET, "uploads/Tampon-2024.png", png_bytes(2), "image/png").await.expect("put");

    let coordinator = builder.open().await;
    let expected = format!("{TEST_PUBLIC_BASE_URL}/{DEFAULT_SETTINGS_BUCKET}/uploads/Tampon-2024.png");
    assert_eq!(coordinator.signatures().organization_seal, Some(expected));
    assert!(store.list_objects_calls.load(Ordering::SeqCst) > 0);
}

#[tokio::test]
async fn custom_buckets_and_patterns_drive_the_scan() {
    let config = SealSearchConfig {
        settings_bucket: DEFAULT_SETTINGS_BUCKET.to_string(),
        buckets: vec!["branding".to_string()],
        name_patterns: vec!["signature-officielle".to_string()],
    };
    let builder = CoordinatorBuilder::new(DocumentType::Program).seal_config(config);
    let store = builder.shared_store();
    store.inner.put_object(DEFAULT_SETTINGS_BUCKET, "seal.png", png_bytes(1), "image/png").await.expect("put");
    store.inner.put_object("branding", "signature-officielle.png", png_bytes(2), "image/png").await.expect("put");

    let coordinator = builder.open().await;
    assert_eq!(
        coordinator.signatures().organization_seal,
        Some(format!("{TEST_PUBLIC_BASE_URL}/branding/signature-officielle.png"))
    );
}

#[tokio::test]
async fn settings_read_failure_falls_through_to_scan() {
    let builder = CoordinatorBuilder::new(DocumentType::Invoice);
    let store = builder.shared_store();
    store.fail_settings.store(true, Ordering::SeqCst);
    store.inner.put_object(DEFAULT_SETTINGS_BUCKET, "stamp.jpg", png_bytes(1), "image/jpeg").await.expect("put");

    let coordinator = builder.open().await;
    let expected = format!("{TEST_PUBLIC_BASE_URL}/{DEFAULT_SETTINGS_BUCKET}/stamp.jpg");
    assert_eq!(coordinator.signatures().organization_seal, Some(expected));
}

#[tokio::test]
async fn document_record_is_the_last_resort() {
    let builder = CoordinatorBuilder::new(DocumentType::CompletionCertificate);
    let mut coordinator = builder.open().await;
    assert_eq!(coordinator.signatures().organization_seal, None);
    assert!(coordinator.can_sign(SignerRole::OrganizationSeal).allowed);

    let url = coordinator.save_signature(&png_data_url(9), SignerRole::OrganizationSeal).await.expect("seal");
    // The uploaded seal lives in the signatures bucket, which the scan does not cover.
    assert!(!url.contains(DEFAULT_SETTINGS_BUCKET));

    let reader = CoordinatorBuilder::new(DocumentType::CompletionCertificate).store(builder.shared_store()).open().await;
    assert_eq!(reader.signatures().organization_seal, Some(url));
}

#[tokio::test]
async fn no_seal_anywhere_leaves_slot_empty() {
    let builder = CoordinatorBuilder::new(DocumentType::Invoice);
    let store = builder.shared_store();
    store.inner.put_object(DEFAULT_SETTINGS_BUCKET, "logo.svg", vec![1, 2, 3], "image/svg+xml").await.expect("put");

    let coordinator = builder.open().await;
    assert_eq!(coordinator.signatures().organization_seal, None);
    // Nothing is required on an invoice.
    assert!(coordinator.is_fully_signed());
}
