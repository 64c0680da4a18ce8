use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    DocumentOpened {
        document_id: String,
        document_type: String,
        training_id: String,
        participant_id: String,
        timestamp_ns: u64,
    },
    SignatureCaptured {
        document_id: String,
        document_type: String,
        role: String,
        signature_id: String,
        image_url: String,
        created_by: String,
        resigned: bool,
        timestamp_ns: u64,
    },
    SignatureRejected {
        document_id: String,
        role: String,
        reason: String,
        timestamp_ns: u64,
    },
    DocumentFullySigned {
        document_id: String,
        document_type: String,
        signature_count: usize,
        timestamp_ns: u64,
    },
    SignatureRevoked {
        document_id: String,
        signature_id: String,
        timestamp_ns: u64,
    },
    OrganizationSealResolved {
        source: String,
        url: String,
        timestamp_ns: u64,
    },
}
