use crate::fixtures::{png_data_url, CoordinatorBuilder};
use docsign_core::application::capture_channel;
use docsign_core::domain::{DocumentType, SignerRole};
use docsign_core::foundation::SignatureError;

#[tokio::test]
async fn captured_signature_is_saved() {
    let mut coordinator = CoordinatorBuilder::new(DocumentType::Attestation).open().await;
    let (pad, subscription) = capture_channel();
    coordinator.attach_capture(subscription);

    pad.submit(SignerRole::Trainer, png_data_url(1)).await.expect("submit");
    let url = coordinator.process_next_capture().await.expect("capture pending").expect("saved");
    assert_eq!(coordinator.signatures().trainer, Some(url));
    assert!(coordinator.is_fully_signed());
}

#[tokio::test]
async fn rejected_capture_reports_error() {
    let mut coordinator = CoordinatorBuilder::new(DocumentType::Attestation).open().await;
    let (pad, subscription) = capture_channel();
    coordinator.attach_capture(subscription);

    pad.submit(SignerRole::Trainer, "data:image/png;base64,").await.expect("submit");
    let result = coordinator.process_next_capture().await.expect("capture pending");
    assert!(matches!(result, Err(SignatureError::InvalidSignaturePayload { .. })));
    assert_eq!(coordinator.signatures().trainer, None);
}

#[tokio::test]
async fn without_subscription_nothing_is_processed() {
    let mut coordinator = CoordinatorBuilder::new(DocumentType::Attestation).open().await;
    assert!(coordinator.process_next_capture().await.is_none());
}

#[tokio::test]
async fn pad_dropped_ends_the_stream() {
    let mut coordinator = CoordinatorBuilder::new(DocumentType::Attestation).open().await;
    let (pad, subscription) = capture_channel();
    coordinator.attach_capture(subscription);
    drop(pad);
    assert!(coordinator.process_next_capture().await.is_none());
}

#[tokio::test]
async fn reattaching_closes_previous_subscription() {
    let mut coordinator = CoordinatorBuilder::new(DocumentType::Attestation).open().await;
    let (old_pad, old_subscription) = capture_channel();
    let (new_pad, new_subscription) = capture_channel();
    coordinator.attach_capture(old_subscription);
    coordinator.attach_capture(new_subscription);

    assert!(old_pad.is_closed());
    assert!(matches!(old_pad.submit(SignerRole::Trainer, png_data_url(1)).await, Err(SignatureError::CaptureClosed)));
    assert!(!new_pad.is_closed());
}

#[tokio::test]
async fn destroy_and_drop_close_the_subscription() {
    let mut coordinator = CoordinatorBuilder::new(DocumentType::Attestation).open().await;
    let (pad, subscription) = capture_channel();
    coordinator.attach_capture(subscription);
    coordinator.destroy();
    assert!(matches!(pad.submit(SignerRole::Trainer, png_data_url(1)).await, Err(SignatureError::CaptureClosed)));

    let mut dropped = CoordinatorBuilder::new(DocumentType::Attestation).open().await;
    let (pad, subscription) = capture_channel();
    dropped.attach_capture(subscription);
    drop(dropped);
    assert!(pad.is_closed());
}
