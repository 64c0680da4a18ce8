//! Per-document-type signature rules.

use crate::domain::policy::types::SignatureRequirements;
use crate::domain::{DocumentType, SignerRole};

pub const GENERIC_PENDING_MESSAGE: &str = "Waiting for other signatures";

const CONVENTION: SignatureRequirements = SignatureRequirements {
    document_type: DocumentType::Convention,
    required: &[SignerRole::Representative, SignerRole::Trainer, SignerRole::CompanySeal, SignerRole::OrganizationSeal],
    optional: &[],
    order: None,
    pending_message: "Waiting for the company representative and the training organization to sign the agreement",
};

const ATTESTATION: SignatureRequirements = SignatureRequirements {
    document_type: DocumentType::Attestation,
    required: &[SignerRole::Trainer],
    optional: &[],
    order: None,
    pending_message: "Waiting for the trainer's signature",
};

const ATTENDANCE_SHEET: SignatureRequirements = SignatureRequirements {
    document_type: DocumentType::AttendanceSheet,
    required: &[SignerRole::Trainer, SignerRole::Participant],
    optional: &[],
    order: None,
    pending_message: "Waiting for the participant and the trainer to sign the attendance sheet",
};

const COMPLETION_CERTIFICATE: SignatureRequirements = SignatureRequirements {
    document_type: DocumentType::CompletionCertificate,
    required: &[SignerRole::Trainer, SignerRole::OrganizationSeal],
    optional: &[],
    order: None,
    pending_message: "Waiting for the trainer's signature and the organization seal",
};

const QUOTE: SignatureRequirements = SignatureRequirements {
    document_type: DocumentType::Quote,
    required: &[SignerRole::Representative],
    optional: &[SignerRole::Participant],
    order: Some(&[SignerRole::Representative, SignerRole::Participant]),
    pending_message: "Waiting for the company representative to sign the quote first",
};

const INVOICE: SignatureRequirements = SignatureRequirements {
    document_type: DocumentType::Invoice,
    required: &[],
    optional: &[SignerRole::OrganizationSeal],
    order: None,
    pending_message: "No signature required",
};

const PROGRAM: SignatureRequirements = SignatureRequirements {
    document_type: DocumentType::Program,
    required: &[],
    optional: &[SignerRole::OrganizationSeal],
    order: None,
    pending_message: "No signature required",
};

const OTHER: SignatureRequirements = SignatureRequirements {
    document_type: DocumentType::Other,
    required: &[],
    optional: &SignerRole::ALL,
    order: None,
    pending_message: GENERIC_PENDING_MESSAGE,
};

pub fn requirements(document_type: DocumentType) -> &'static SignatureRequirements {
    match document_type {
        DocumentType::Convention => &CONVENTION,
        DocumentType::Attestation => &ATTESTATION,
        DocumentType::AttendanceSheet => &ATTENDANCE_SHEET,
        DocumentType::CompletionCertificate => &COMPLETION_CERTIFICATE,
        DocumentType::Quote => &QUOTE,
        DocumentType::Invoice => &INVOICE,
        DocumentType::Program => &PROGRAM,
        DocumentType::Other => &OTHER,
    }
}
