use crate::domain::{DocumentKey, SignerRole};
use crate::foundation::DocumentId;

/// Helper to build storage keys consistently.
pub struct KeyBuilder {
    buf: Vec<u8>,
}

impl KeyBuilder {
    pub fn with_capacity(cap: usize) -> Self {
        Self { buf: Vec::with_capacity(cap) }
    }

    pub fn prefix(mut self, prefix: &[u8]) -> Self {
        self.buf.extend_from_slice(prefix);
        self
    }

    pub fn str(mut self, value: &str) -> Self {
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// Length-prefixed string. Free-form ids go through here so no id can spill into the next segment.
    pub fn field(mut self, value: &str) -> Self {
        let len = u32::try_from(value.len()).unwrap_or(u32::MAX);
        self.buf.extend_from_slice(&len.to_be_bytes());
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    pub fn u64_be(mut self, value: u64) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn sep(mut self) -> Self {
        self.buf.push(b':');
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

pub const CF_DEFAULT: &str = "default";
pub const CF_METADATA: &str = "metadata";
pub const CF_DOCUMENT: &str = "document";
pub const CF_DOCUMENT_INDEX: &str = "document_index";
pub const CF_SIGNATURE: &str = "signature";
pub const CF_OBJECT: &str = "object";
pub const CF_SETTINGS: &str = "settings";

pub const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";
pub const ORGANIZATION_SETTINGS_KEY: &[u8] = b"organization";

pub fn key_document(document_id: &DocumentId) -> Vec<u8> {
    KeyBuilder::with_capacity(4 + document_id.len()).prefix(b"doc:").str(document_id).build()
}

/// `idx:<len><type><len><training><len><participant>`
pub fn key_document_index(key: &DocumentKey) -> Vec<u8> {
    KeyBuilder::with_capacity(16 + key.training_id.len() + key.participant_id.len())
        .prefix(b"idx:")
        .field(key.document_type.as_str())
        .field(&key.training_id)
        .field(&key.participant_id)
        .build()
}

/// `sig:<len><document>`: all signatures of a document.
pub fn key_signature_document_prefix(document_id: &DocumentId) -> Vec<u8> {
    KeyBuilder::with_capacity(8 + document_id.len()).prefix(b"sig:").field(document_id).build()
}

/// `sig:<len><document><role>:`: signatures of one role, ordered by timestamp.
pub fn key_signature_role_prefix(document_id: &DocumentId, role: SignerRole) -> Vec<u8> {
    KeyBuilder::with_capacity(32 + document_id.len())
        .prefix(b"sig:")
        .field(document_id)
        .str(role.as_str())
        .sep()
        .build()
}

pub fn key_signature(document_id: &DocumentId, role: SignerRole, created_at_nanos: u64, signature_id: &str) -> Vec<u8> {
    let mut key = key_signature_role_prefix(document_id, role);
    key.extend(KeyBuilder::with_capacity(9 + signature_id.len()).u64_be(created_at_nanos).sep().str(signature_id).build());
    key
}

/// `<len><bucket><key>`. The object key stays unprefixed so key prefixes scan in order.
pub fn key_object(bucket: &str, key: &str) -> Vec<u8> {
    KeyBuilder::with_capacity(object_bucket_prefix_len(bucket) + key.len()).field(bucket).str(key).build()
}

pub fn object_bucket_prefix_len(bucket: &str) -> usize {
    4 + bucket.len()
}
