use crate::domain::{Document, DocumentKey, OrganizationSettings, SignatureRecord, SignerRole};
use crate::foundation::{now_nanos, DocumentId, SignatureError, SignatureId, DEFAULT_PUBLIC_BASE_URL};
use crate::infrastructure::storage::{public_object_url, DocumentStore, ObjectEntry, ObjectStore};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
    updated_at_nanos: u64,
}

struct MemoryInner {
    documents: HashMap<DocumentId, Document>,
    document_index: HashMap<DocumentKey, DocumentId>,
    signatures: HashMap<DocumentId, Vec<SignatureRecord>>,
    objects: BTreeMap<(String, String), StoredObject>,
    settings: Option<OrganizationSettings>,
}

impl MemoryInner {
    fn new() -> Self {
        Self {
            documents: HashMap::new(),
            document_index: HashMap::new(),
            signatures: HashMap::new(),
            objects: BTreeMap::new(),
            settings: None,
        }
    }
}

/// In-process store implementing both the record table and the object store.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
    public_base_url: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_public_base_url(DEFAULT_PUBLIC_BASE_URL)
    }

    pub fn with_public_base_url(public_base_url: impl Into<String>) -> Self {
        Self { inner: Arc::new(Mutex::new(MemoryInner::new())), public_base_url: public_base_url.into() }
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, MemoryInner>, SignatureError> {
        self.inner.lock().map_err(|_| SignatureError::StorageError {
            operation: "memory store lock".to_string(),
            details: "poisoned".to_string(),
        })
    }

    pub fn object_count(&self) -> usize {
        self.lock_inner().map(|inner| inner.objects.len()).unwrap_or(0)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_document(&self, key: &DocumentKey) -> Result<Option<Document>, SignatureError> {
        let inner = self.lock_inner()?;
        Ok(inner.document_index.get(key).and_then(|id| inner.documents.get(id)).cloned())
    }

    async fn get_document(&self, document_id: &DocumentId) -> Result<Option<Document>, SignatureError> {
        Ok(self.lock_inner()?.documents.get(document_id).cloned())
    }

    async fn insert_document(&self, document: Document) -> Result<Document, SignatureError> {
        let mut inner = self.lock_inner()?;
        let key = document.key();
        if let Some(existing) = inner.document_index.get(&key).and_then(|id| inner.documents.get(id)) {
            return Ok(existing.clone());
        }
        inner.document_index.insert(key, document.id.clone());
        inner.documents.insert(document.id.clone(), document.clone());
        Ok(document)
    }

    async fn insert_signature(&self, record: SignatureRecord) -> Result<(), SignatureError> {
        let mut inner = self.lock_inner()?;
        if !inner.documents.contains_key(&record.document_id) {
            return Err(SignatureError::StorageError {
                operation: "insert_signature".to_string(),
                details: format!("unknown document {}", record.document_id),
            });
        }
        inner.signatures.entry(record.document_id.clone()).or_default().push(record);
        Ok(())
    }

    async fn latest_signature(&self, document_id: &DocumentId, role: SignerRole) -> Result<Option<SignatureRecord>, SignatureError> {
        let inner = self.lock_inner()?;
        let Some(records) = inner.signatures.get(document_id) else {
            return Ok(None);
        };
        let latest = records.iter().filter(|record| record.role == role).max_by(|a, b| a.recency().cmp(&b.recency()));
        Ok(latest.cloned())
    }

    async fn list_signatures(&self, document_id: &DocumentId) -> Result<Vec<SignatureRecord>, SignatureError> {
        let inner = self.lock_inner()?;
        let mut records = inner.signatures.get(document_id).cloned().unwrap_or_default();
        records.sort_by(|a, b| a.recency().cmp(&b.recency()));
        Ok(records)
    }

    async fn delete_signature(&self, document_id: &DocumentId, signature_id: &SignatureId) -> Result<bool, SignatureError> {
        let mut inner = self.lock_inner()?;
        let Some(records) = inner.signatures.get_mut(document_id) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|record| &record.id != signature_id);
        Ok(records.len() != before)
    }

    async fn organization_settings(&self) -> Result<Option<OrganizationSettings>, SignatureError> {
        Ok(self.lock_inner()?.settings.clone())
    }

    async fn put_organization_settings(&self, settings: OrganizationSettings) -> Result<(), SignatureError> {
        self.lock_inner()?.settings = Some(settings);
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), SignatureError> {
        let mut inner = self.lock_inner()?;
        inner.objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject { bytes, content_type: content_type.to_string(), updated_at_nanos: now_nanos() },
        );
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>, SignatureError> {
        let inner = self.lock_inner()?;
        Ok(inner.objects.get(&(bucket.to_string(), key.to_string())).map(|object| object.bytes.clone()))
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectEntry>, SignatureError> {
        let inner = self.lock_inner()?;
        Ok(inner
            .objects
            .iter()
            .filter(|((b, key), _)| b == bucket && key.starts_with(prefix))
            .map(|((b, key), object)| ObjectEntry {
                bucket: b.clone(),
                key: key.clone(),
                size: object.bytes.len(),
                content_type: object.content_type.clone(),
                updated_at_nanos: object.updated_at_nanos,
            })
            .collect())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        public_object_url(&self.public_base_url, bucket, key)
    }
}
