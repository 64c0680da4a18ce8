use crate::foundation::{DocumentId, ParticipantId, SignatureError, SignatureId, TrainingId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A party or stamp whose mark may appear on a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerRole {
    Participant,
    Representative,
    Trainer,
    CompanySeal,
    OrganizationSeal,
}

impl SignerRole {
    pub const ALL: [SignerRole; 5] = [
        SignerRole::Participant,
        SignerRole::Representative,
        SignerRole::Trainer,
        SignerRole::CompanySeal,
        SignerRole::OrganizationSeal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignerRole::Participant => "participant",
            SignerRole::Representative => "representative",
            SignerRole::Trainer => "trainer",
            SignerRole::CompanySeal => "company_seal",
            SignerRole::OrganizationSeal => "organization_seal",
        }
    }

    pub fn is_seal(&self) -> bool {
        matches!(self, SignerRole::CompanySeal | SignerRole::OrganizationSeal)
    }

    /// Trainers may overwrite their own signature.
    pub fn may_resign(&self) -> bool {
        matches!(self, SignerRole::Trainer)
    }
}

impl fmt::Display for SignerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignerRole {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        SignerRole::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| SignatureError::InvalidIdentifier { kind: "signer role".to_string(), value: s.to_string() })
    }
}

/// Category of generated document; each has its own signature policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Training agreement between the organization and a client company.
    Convention,
    Attestation,
    AttendanceSheet,
    CompletionCertificate,
    Quote,
    Invoice,
    Program,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 8] = [
        DocumentType::Convention,
        DocumentType::Attestation,
        DocumentType::AttendanceSheet,
        DocumentType::CompletionCertificate,
        DocumentType::Quote,
        DocumentType::Invoice,
        DocumentType::Program,
        DocumentType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Convention => "convention",
            DocumentType::Attestation => "attestation",
            DocumentType::AttendanceSheet => "attendance_sheet",
            DocumentType::CompletionCertificate => "completion_certificate",
            DocumentType::Quote => "quote",
            DocumentType::Invoice => "invoice",
            DocumentType::Program => "program",
            DocumentType::Other => "other",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            DocumentType::Convention => "Training agreement",
            DocumentType::Attestation => "Training attestation",
            DocumentType::AttendanceSheet => "Attendance sheet",
            DocumentType::CompletionCertificate => "Certificate of completion",
            DocumentType::Quote => "Quote",
            DocumentType::Invoice => "Invoice",
            DocumentType::Program => "Training program",
            DocumentType::Other => "Document",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        DocumentType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == normalized)
            .ok_or_else(|| SignatureError::InvalidIdentifier { kind: "document type".to_string(), value: s.to_string() })
    }
}

/// Identity of a logical document: one per (type, training, participant).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentKey {
    pub document_type: DocumentType,
    pub training_id: TrainingId,
    pub participant_id: ParticipantId,
}

impl DocumentKey {
    pub fn new(document_type: DocumentType, training_id: impl Into<TrainingId>, participant_id: impl Into<ParticipantId>) -> Self {
        Self { document_type, training_id: training_id.into(), participant_id: participant_id.into() }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.document_type, self.training_id, self.participant_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub document_type: DocumentType,
    pub training_id: TrainingId,
    pub participant_id: ParticipantId,
    pub title: String,
    pub created_at_nanos: u64,
}

impl Document {
    /// New document for `key` with the type's default title.
    pub fn for_key(key: &DocumentKey, created_at_nanos: u64) -> Self {
        Self {
            id: DocumentId::generate(),
            document_type: key.document_type,
            training_id: key.training_id.clone(),
            participant_id: key.participant_id.clone(),
            title: key.document_type.default_title().to_string(),
            created_at_nanos,
        }
    }

    pub fn key(&self) -> DocumentKey {
        DocumentKey {
            document_type: self.document_type,
            training_id: self.training_id.clone(),
            participant_id: self.participant_id.clone(),
        }
    }
}

/// Pointer row for one captured signature or seal image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub id: SignatureId,
    pub document_id: DocumentId,
    pub role: SignerRole,
    pub image_url: String,
    /// Object key inside the signatures bucket.
    pub storage_key: String,
    pub created_at_nanos: u64,
    pub created_by: UserId,
}

impl SignatureRecord {
    /// Ordering key for "latest": timestamp first, then signature id.
    pub fn recency(&self) -> (u64, &str) {
        (self.created_at_nanos, self.id.as_str())
    }
}

/// Organization-wide settings record; source of truth for the organization seal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSettings {
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub seal_url: Option<String>,
    /// Object key (in the settings bucket) of the seal image.
    #[serde(default)]
    pub seal_path: Option<String>,
}
