use docsign_core::domain::audit::AuditEvent;
use docsign_core::infrastructure::audit::human_summary;

#[test]
fn audit_events_serialize_with_type_tag() {
    let event = AuditEvent::SignatureCaptured {
        document_id: "doc-1".to_string(),
        document_type: "quote".to_string(),
        role: "representative".to_string(),
        signature_id: "sig-1".to_string(),
        image_url: "https://storage.test/public/signatures/a.png".to_string(),
        created_by: "user-1".to_string(),
        resigned: false,
        timestamp_ns: 10,
    };
    let json = serde_json::to_value(&event).expect("serialize");
    assert_eq!(json["type"], "signature_captured");
    assert_eq!(json["role"], "representative");

    let back: AuditEvent = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, event);
}

#[test]
fn human_summary_names_the_document() {
    let event = AuditEvent::DocumentFullySigned {
        document_id: "doc-7".to_string(),
        document_type: "attestation".to_string(),
        signature_count: 1,
        timestamp_ns: 1,
    };
    assert!(human_summary(&event).contains("doc-7"));

    let seal = AuditEvent::OrganizationSealResolved {
        source: "storage_scan".to_string(),
        url: "https://storage.test/public/organization-assets/seal.png".to_string(),
        timestamp_ns: 2,
    };
    assert!(human_summary(&seal).contains("storage_scan"));
}
