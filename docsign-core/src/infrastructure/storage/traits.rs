use crate::domain::{Document, DocumentKey, OrganizationSettings, SignatureRecord, SignerRole};
use crate::foundation::{now_nanos, DocumentId, SignatureError, SignatureId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, SignatureError>;

/// Metadata of one stored object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectEntry {
    pub bucket: String,
    pub key: String,
    pub size: usize,
    pub content_type: String,
    pub updated_at_nanos: u64,
}

impl ObjectEntry {
    /// Last path segment of the key.
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

/// Document and signature pointer rows.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_document(&self, key: &DocumentKey) -> Result<Option<Document>>;
    async fn get_document(&self, document_id: &DocumentId) -> Result<Option<Document>>;

    /// Insert `document` unless one already exists for its key; returns the stored document.
    async fn insert_document(&self, document: Document) -> Result<Document>;

    /// Documents are created lazily the first time they are viewed.
    async fn get_or_create_document(&self, key: &DocumentKey) -> Result<Document> {
        if let Some(existing) = self.find_document(key).await? {
            return Ok(existing);
        }
        self.insert_document(Document::for_key(key, now_nanos())).await
    }

    async fn insert_signature(&self, record: SignatureRecord) -> Result<()>;

    /// Most recent record for `role`: highest `created_at_nanos`, ties broken by the greater
    /// signature id (`SignatureRecord::recency`).
    async fn latest_signature(&self, document_id: &DocumentId, role: SignerRole) -> Result<Option<SignatureRecord>>;

    /// All records of a document, oldest first in `recency` order.
    async fn list_signatures(&self, document_id: &DocumentId) -> Result<Vec<SignatureRecord>>;

    /// Returns `Ok(true)` if a record was removed.
    async fn delete_signature(&self, document_id: &DocumentId, signature_id: &SignatureId) -> Result<bool>;

    async fn organization_settings(&self) -> Result<Option<OrganizationSettings>>;
    async fn put_organization_settings(&self, settings: OrganizationSettings) -> Result<()>;

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// Object storage for signature and seal images.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>>;
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectEntry>>;
    fn public_url(&self, bucket: &str, key: &str) -> String;
}
