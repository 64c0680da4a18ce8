use crate::fixtures::{png_data_url, CoordinatorBuilder, RecordingObserver, TEST_SIGNATURES_PREFIX};
use docsign_core::application::{CompositeObserver, LoadState, SignatureObserver, ViewerKind};
use docsign_core::domain::{requirements, DocumentType, SignDenial, SignatureSnapshot, SignatureStatus, SignerRole};
use docsign_core::foundation::SignatureError;
use docsign_core::infrastructure::storage::DocumentStore;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::test]
async fn unloaded_coordinator_denies_everything() {
    let coordinator = CoordinatorBuilder::new(DocumentType::Attestation).auto_load(false).open().await;

    assert_eq!(coordinator.state(), LoadState::Unloaded);
    for role in SignerRole::ALL {
        let permission = coordinator.can_sign(role);
        assert!(!permission.allowed);
        assert_eq!(permission.denial, Some(SignDenial::Loading));
    }
    assert!(!coordinator.is_fully_signed());
    assert_eq!(coordinator.signature_status(), SignatureStatus::Loading);
    assert_eq!(coordinator.signatures(), SignatureSnapshot::default());
}

#[tokio::test]
async fn quote_enforces_representative_before_participant() {
    let mut coordinator = CoordinatorBuilder::new(DocumentType::Quote).viewer(ViewerKind::Student).open().await;
    let quote_message = requirements(DocumentType::Quote).pending_message;

    assert_eq!(coordinator.viewer_role(), Some(SignerRole::Participant));
    assert_eq!(coordinator.signature_status_message(), quote_message);

    let err = coordinator.save_signature(&png_data_url(1), SignerRole::Participant).await.expect_err("out of order");
    match err {
        SignatureError::OutOfOrder { message, .. } => assert_eq!(message, quote_message),
        other => panic!("expected OutOfOrder, got {other:?}"),
    }
    assert_eq!(coordinator.signatures().participant, None);

    let url = coordinator.save_signature(&png_data_url(2), SignerRole::Representative).await.expect("representative signs");
    assert!(url.starts_with(TEST_SIGNATURES_PREFIX), "{url}");
    assert!(coordinator.is_fully_signed());
    assert_eq!(coordinator.signature_status(), SignatureStatus::Complete);

    assert!(coordinator.can_sign(SignerRole::Participant).allowed);
    coordinator.save_signature(&png_data_url(3), SignerRole::Participant).await.expect("participant signs after");
    assert!(coordinator.signatures().participant.is_some());
}

#[tokio::test]
async fn invalid_payload_changes_nothing() {
    let observer = Arc::new(RecordingObserver::default());
    let builder = CoordinatorBuilder::new(DocumentType::Attestation).observer(observer.clone());
    let store = builder.shared_store();
    let mut coordinator = builder.open().await;

    let err = coordinator.save_signature("data:text/plain;base64,aGk=", SignerRole::Trainer).await.expect_err("invalid");
    assert!(matches!(err, SignatureError::InvalidSignaturePayload { .. }));
    assert_eq!(store.inner.object_count(), 0);
    assert_eq!(coordinator.signatures().trainer, None);
    assert_eq!(coordinator.state(), LoadState::Incomplete);
    assert_eq!(observer.events().last().map(String::as_str), Some("failed:trainer"));
}

#[tokio::test]
async fn oversized_image_is_rejected() {
    let mut coordinator = CoordinatorBuilder::new(DocumentType::Attestation).max_image_bytes(4).open().await;
    let err = coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect_err("too large");
    assert!(matches!(err, SignatureError::InvalidSignaturePayload { .. }));
}

#[tokio::test]
async fn trainer_resign_keeps_latest_image() {
    let observer = Arc::new(RecordingObserver::default());
    let builder = CoordinatorBuilder::new(DocumentType::Attestation).observer(observer.clone());
    let mut coordinator = builder.open().await;

    let first = coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect("first");
    let second = coordinator.save_signature(&png_data_url(2), SignerRole::Trainer).await.expect("resign");
    assert_ne!(first, second);
    assert_eq!(coordinator.signatures().trainer.as_deref(), Some(second.as_str()));

    // A fresh reader sees the newest record too.
    let reader = CoordinatorBuilder::new(DocumentType::Attestation).store(builder.shared_store()).open().await;
    assert_eq!(reader.signatures().trainer.as_deref(), Some(second.as_str()));

    let events = observer.events();
    assert!(events.contains(&"saved:trainer:false".to_string()));
    assert!(events.contains(&"saved:trainer:true".to_string()));
    assert_eq!(events.iter().filter(|event| *event == "fully_signed").count(), 1);
}

#[tokio::test]
async fn participant_cannot_sign_twice() {
    let mut coordinator = CoordinatorBuilder::new(DocumentType::AttendanceSheet).viewer(ViewerKind::Student).open().await;
    coordinator.save_signature(&png_data_url(1), SignerRole::Participant).await.expect("first");
    let err = coordinator.save_signature(&png_data_url(2), SignerRole::Participant).await.expect_err("second");
    assert!(matches!(err, SignatureError::AlreadySigned { .. }));
}

#[tokio::test]
async fn convention_read_only_viewer_sees_pending_message() {
    let coordinator = CoordinatorBuilder::new(DocumentType::Convention).viewer(ViewerKind::ReadOnly).open().await;

    assert_eq!(coordinator.viewer_role(), None);
    assert!(coordinator.can_sign(SignerRole::Representative).allowed);
    assert!(coordinator.can_sign(SignerRole::Trainer).allowed);
    assert!(!coordinator.is_fully_signed());
    assert_eq!(
        coordinator.signature_status(),
        SignatureStatus::Pending(requirements(DocumentType::Convention).pending_message.to_string())
    );
}

#[tokio::test]
async fn attestation_trainer_completes_and_participant_is_refused() {
    let mut coordinator = CoordinatorBuilder::new(DocumentType::Attestation).open().await;
    assert_eq!(coordinator.signature_status(), SignatureStatus::YourTurn);

    coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect("trainer signs");
    assert!(coordinator.is_fully_signed());
    assert_eq!(coordinator.state(), LoadState::Complete);

    let err = coordinator.save_signature(&png_data_url(2), SignerRole::Participant).await.expect_err("not required");
    assert!(matches!(err, SignatureError::NotPermittedForRole { .. }));
}

#[tokio::test]
async fn anonymous_viewer_cannot_save() {
    let builder = CoordinatorBuilder::new(DocumentType::Attestation).anonymous();
    let store = builder.shared_store();
    let mut coordinator = builder.open().await;

    let err = coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect_err("no session");
    assert!(matches!(err, SignatureError::AuthenticationRequired));
    assert_eq!(store.inner.object_count(), 0);
}

#[tokio::test]
async fn destroyed_coordinator_refuses_work() {
    let observer = Arc::new(RecordingObserver::default());
    let mut coordinator = CoordinatorBuilder::new(DocumentType::Attestation).observer(observer.clone()).open().await;

    coordinator.destroy();
    assert!(coordinator.is_closed());
    let err = coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect_err("closed");
    assert!(matches!(err, SignatureError::CoordinatorClosed { .. }));

    coordinator.reload().await;
    drop(coordinator);
    let events = observer.events();
    assert_eq!(events.iter().filter(|event| *event == "destroyed").count(), 1);
    assert_eq!(events.iter().filter(|event| event.starts_with("loaded:")).count(), 1);
}

#[tokio::test]
async fn drop_notifies_destroyed() {
    let observer = Arc::new(RecordingObserver::default());
    let coordinator = CoordinatorBuilder::new(DocumentType::Program).observer(observer.clone()).open().await;
    drop(coordinator);
    assert_eq!(observer.events(), vec!["opened", "loaded:0", "destroyed"]);
}

#[tokio::test]
async fn failed_record_insert_leaves_set_untouched() {
    let builder = CoordinatorBuilder::new(DocumentType::Attestation);
    let store = builder.shared_store();
    let mut coordinator = builder.open().await;
    store.fail_signature_inserts.store(true, Ordering::SeqCst);

    let err = coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect_err("insert fails");
    match err {
        SignatureError::StoreWriteFailed { operation, .. } => assert_eq!(operation, "insert_signature"),
        other => panic!("expected StoreWriteFailed, got {other:?}"),
    }
    assert_eq!(coordinator.signatures().trainer, None);
    assert!(!coordinator.is_fully_signed());
    // The uploaded image stays behind as an orphan.
    assert_eq!(store.inner.object_count(), 1);
}

#[tokio::test]
async fn failed_upload_skips_record_insert() {
    let builder = CoordinatorBuilder::new(DocumentType::Attestation);
    let store = builder.shared_store();
    let mut coordinator = builder.open().await;
    store.fail_uploads.store(true, Ordering::SeqCst);

    let err = coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect_err("upload fails");
    match err {
        SignatureError::StoreWriteFailed { operation, .. } => assert_eq!(operation, "upload_signature_image"),
        other => panic!("expected StoreWriteFailed, got {other:?}"),
    }
    let document_id = coordinator.document().id.clone();
    let records = store.inner.list_signatures(&document_id).await.expect("list");
    assert!(records.is_empty());
}

#[tokio::test]
async fn read_failure_counts_as_unsigned() {
    let builder = CoordinatorBuilder::new(DocumentType::Attestation);
    let store = builder.shared_store();
    let mut writer = builder.open().await;
    writer.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect("sign");

    store.fail_signature_reads.store(true, Ordering::SeqCst);
    let reader = CoordinatorBuilder::new(DocumentType::Attestation).store(store.clone()).open().await;
    assert_eq!(reader.state(), LoadState::Incomplete);
    assert_eq!(reader.signatures().trainer, None);
}

#[tokio::test]
async fn save_forces_load_when_auto_load_is_off() {
    let builder = CoordinatorBuilder::new(DocumentType::Attestation).auto_load(false);
    let store = builder.shared_store();
    let mut coordinator = builder.open().await;
    assert_eq!(store.latest_signature_calls.load(Ordering::SeqCst), 0);

    coordinator.load_existing_signatures().await;
    assert_eq!(coordinator.state(), LoadState::Unloaded);

    coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect("save loads first");
    assert!(store.latest_signature_calls.load(Ordering::SeqCst) > 0);
    assert_eq!(coordinator.state(), LoadState::Complete);
}

#[tokio::test]
async fn viewer_role_follows_viewer_preferences() {
    let cases = [
        (ViewerKind::Crm, DocumentType::CompletionCertificate, Some(SignerRole::Trainer)),
        (ViewerKind::Crm, DocumentType::Invoice, Some(SignerRole::OrganizationSeal)),
        (ViewerKind::Crm, DocumentType::Quote, None),
        (ViewerKind::Crm, DocumentType::Other, Some(SignerRole::Trainer)),
        (ViewerKind::Student, DocumentType::AttendanceSheet, Some(SignerRole::Participant)),
        (ViewerKind::Student, DocumentType::Convention, Some(SignerRole::Representative)),
        (ViewerKind::Student, DocumentType::Invoice, None),
        (ViewerKind::ReadOnly, DocumentType::Other, None),
    ];
    for (viewer, document_type, expected) in cases {
        let coordinator = CoordinatorBuilder::new(document_type).viewer(viewer).auto_load(false).open().await;
        assert_eq!(coordinator.viewer_role(), expected, "{viewer:?} on {document_type}");
    }
}

#[tokio::test]
async fn attendance_sheet_transitions_to_complete() {
    let observer = Arc::new(RecordingObserver::default());
    let mut coordinator = CoordinatorBuilder::new(DocumentType::AttendanceSheet).observer(observer.clone()).open().await;
    assert_eq!(coordinator.state(), LoadState::Incomplete);

    coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect("trainer");
    assert_eq!(coordinator.state(), LoadState::Incomplete);

    coordinator.save_signature(&png_data_url(2), SignerRole::Participant).await.expect("participant");
    assert_eq!(coordinator.state(), LoadState::Complete);
    assert_eq!(
        observer.events(),
        vec!["opened", "loaded:0", "saved:trainer:false", "saved:participant:false", "fully_signed"]
    );
}

#[tokio::test]
async fn other_viewer_sees_signature_after_reload() {
    let crm = CoordinatorBuilder::new(DocumentType::AttendanceSheet);
    let mut trainer_view = crm.open().await;
    let mut student_view =
        CoordinatorBuilder::new(DocumentType::AttendanceSheet).store(crm.shared_store()).viewer(ViewerKind::Student).open().await;
    assert_eq!(trainer_view.document().id, student_view.document().id);

    let url = trainer_view.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect("trainer");
    assert_eq!(student_view.signatures().trainer, None);

    student_view.reload().await;
    assert_eq!(student_view.signatures().trainer.as_deref(), Some(url.as_str()));
    assert_eq!(student_view.signature_status(), SignatureStatus::YourTurn);
}

#[tokio::test]
async fn composite_observer_fans_out_failures() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let mut composite = CompositeObserver::new();
    composite.add_observer(first.clone());
    composite.add_observer(second.clone());
    let composite: Arc<dyn SignatureObserver> = Arc::new(composite);

    let mut coordinator = CoordinatorBuilder::new(DocumentType::Invoice).observer(composite).open().await;
    let err = coordinator.save_signature(&png_data_url(1), SignerRole::Trainer).await.expect_err("not on invoices");
    assert!(matches!(err, SignatureError::NotPermittedForRole { .. }));

    for observer in [&first, &second] {
        assert_eq!(observer.events(), vec!["opened", "loaded:0", "failed:trainer"]);
    }
}
