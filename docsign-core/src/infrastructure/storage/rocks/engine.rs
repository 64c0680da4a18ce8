//! RocksDB-backed storage engine.
//!
//! # Lock Semantics
//!
//! RocksDB itself is thread-safe; `index_lock` serializes the find-then-insert of
//! `insert_document` so one key never maps to two documents. Signature rows and objects are
//! written without locks ("last write wins" on read).
//!
//! # Column Families
//!
//! See `schema.rs` for column family names and key layout.

use crate::domain::{Document, DocumentKey, OrganizationSettings, SignatureRecord, SignerRole};
use crate::foundation::{now_nanos, DocumentId, SignatureError, SignatureId, STORAGE_SCHEMA_VERSION};
use crate::infrastructure::storage::rocks::schema::*;
use crate::infrastructure::storage::rocks::util::IndexLock;
use crate::infrastructure::storage::{public_object_url, DocumentStore, ObjectEntry, ObjectStore};
use crate::storage_err;
use async_trait::async_trait;
use log::{debug, info, trace, warn};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options as RocksOptions, WriteBatch, DB};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

const STORE_DIR_NAME: &str = "signatures-db";

#[derive(Serialize, Deserialize)]
struct StoredObject {
    content_type: String,
    bytes: Vec<u8>,
    updated_at_nanos: u64,
}

pub struct RocksStore {
    db: Arc<DB>,
    index_lock: IndexLock,
    public_base_url: String,
}

impl RocksStore {
    pub fn open(path: impl AsRef<Path>, public_base_url: impl Into<String>) -> Result<Self, SignatureError> {
        let path = path.as_ref();
        debug!("opening RocksStore path={}", path.display());
        let db = open_db_with_cfs(path)?;
        let store = Self { db: Arc::new(db), index_lock: IndexLock::new(), public_base_url: public_base_url.into() };
        store.check_schema_version()?;
        info!("RocksStore opened path={}", path.display());
        Ok(store)
    }

    pub fn open_in_dir(data_dir: impl AsRef<Path>, public_base_url: impl Into<String>) -> Result<Self, SignatureError> {
        let dir = data_dir.as_ref();
        fs::create_dir_all(dir).map_err(|err| storage_err!("fs::create_dir_all open_in_dir", err))?;
        Self::open(dir.join(STORE_DIR_NAME), public_base_url)
    }

    fn cf_handle(&self, name: &str) -> Result<&ColumnFamily, SignatureError> {
        self.db.cf_handle(name).ok_or_else(|| SignatureError::StorageError {
            operation: "rocksdb cf_handle".to_string(),
            details: format!("missing column family: {}", name),
        })
    }

    fn check_schema_version(&self) -> Result<(), SignatureError> {
        let cf = self.cf_handle(CF_METADATA)?;
        match self.db.get_cf(cf, SCHEMA_VERSION_KEY).map_err(|err| storage_err!("rocksdb get_cf schema_version", err))? {
            None => {
                self.db
                    .put_cf(cf, SCHEMA_VERSION_KEY, STORAGE_SCHEMA_VERSION.to_be_bytes())
                    .map_err(|err| storage_err!("rocksdb put_cf schema_version", err))?;
                Ok(())
            }
            Some(bytes) => {
                let array: [u8; 4] =
                    bytes.as_slice().try_into().map_err(|_| storage_err!("decode schema_version", "corrupt value"))?;
                let stored = u32::from_be_bytes(array);
                if stored != STORAGE_SCHEMA_VERSION {
                    warn!("schema mismatch stored={} current={}", stored, STORAGE_SCHEMA_VERSION);
                    return Err(SignatureError::SchemaMismatch { stored, current: STORAGE_SCHEMA_VERSION });
                }
                Ok(())
            }
        }
    }

    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, SignatureError> {
        bincode::serialize(value).map_err(|err| err.into())
    }

    fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, SignatureError> {
        bincode::deserialize(bytes).map_err(|err| err.into())
    }

    fn get_decoded<T: serde::de::DeserializeOwned>(&self, cf_name: &str, key: &[u8]) -> Result<Option<T>, SignatureError> {
        let cf = self.cf_handle(cf_name)?;
        match self.db.get_cf(cf, key).map_err(|err| storage_err!("rocksdb get_cf", err))? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// All `(key, value)` pairs of `cf_name` whose key starts with `prefix`.
    fn scan_prefix(&self, cf_name: &str, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, SignatureError> {
        let cf = self.cf_handle(cf_name)?;
        let mut out = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::From(prefix, Direction::Forward)) {
            let (key, value) = item.map_err(|err| storage_err!("rocksdb iterator_cf", err))?;
            if !key.starts_with(prefix) {
                break;
            }
            out.push((key.to_vec(), value.to_vec()));
        }
        Ok(out)
    }

    fn load_document(&self, document_id: &DocumentId) -> Result<Option<Document>, SignatureError> {
        self.get_decoded(CF_DOCUMENT, &key_document(document_id))
    }
}

fn open_db_with_cfs(path: &Path) -> Result<DB, SignatureError> {
    let mut options = RocksOptions::default();
    options.create_if_missing(true);
    options.create_missing_column_families(true);
    options.set_use_fsync(true);
    options.set_paranoid_checks(true);

    let cfs = vec![
        ColumnFamilyDescriptor::new(CF_DEFAULT, RocksOptions::default()),
        ColumnFamilyDescriptor::new(CF_METADATA, RocksOptions::default()),
        ColumnFamilyDescriptor::new(CF_DOCUMENT, RocksOptions::default()),
        ColumnFamilyDescriptor::new(CF_DOCUMENT_INDEX, RocksOptions::default()),
        ColumnFamilyDescriptor::new(CF_SIGNATURE, RocksOptions::default()),
        ColumnFamilyDescriptor::new(CF_OBJECT, RocksOptions::default()),
        ColumnFamilyDescriptor::new(CF_SETTINGS, RocksOptions::default()),
    ];

    DB::open_cf_descriptors(&options, path, cfs).map_err(|err| storage_err!("rocksdb open_cf_descriptors", err))
}

#[async_trait]
impl DocumentStore for RocksStore {
    async fn find_document(&self, key: &DocumentKey) -> Result<Option<Document>, SignatureError> {
        trace!("find_document key={}", key);
        let cf = self.cf_handle(CF_DOCUMENT_INDEX)?;
        let index_key = key_document_index(key);
        let Some(id_bytes) = self.db.get_cf(cf, index_key).map_err(|err| storage_err!("rocksdb get_cf index", err))? else {
            return Ok(None);
        };
        let document_id = String::from_utf8(id_bytes).map_err(|err| storage_err!("decode document index", err))?;
        self.load_document(&DocumentId::from(document_id))
    }

    async fn get_document(&self, document_id: &DocumentId) -> Result<Option<Document>, SignatureError> {
        self.load_document(document_id)
    }

    async fn insert_document(&self, document: Document) -> Result<Document, SignatureError> {
        let _guard = self.index_lock.acquire("insert_document").await?;
        let key = document.key();
        let index_cf = self.cf_handle(CF_DOCUMENT_INDEX)?;
        let index_key = key_document_index(&key);
        if let Some(id_bytes) = self.db.get_cf(index_cf, &index_key).map_err(|err| storage_err!("rocksdb get_cf index", err))? {
            let existing_id = String::from_utf8(id_bytes).map_err(|err| storage_err!("decode document index", err))?;
            if let Some(existing) = self.load_document(&DocumentId::from(existing_id))? {
                return Ok(existing);
            }
            warn!("document index points to a missing document key={}", key);
        }

        let doc_cf = self.cf_handle(CF_DOCUMENT)?;
        let mut batch = WriteBatch::default();
        batch.put_cf(doc_cf, key_document(&document.id), Self::encode(&document)?);
        batch.put_cf(index_cf, index_key, document.id.as_bytes());
        self.db.write(batch).map_err(|err| storage_err!("rocksdb write insert_document", err))?;
        debug!("document stored document_id={} key={}", document.id, key);
        Ok(document)
    }

    async fn insert_signature(&self, record: SignatureRecord) -> Result<(), SignatureError> {
        if self.load_document(&record.document_id)?.is_none() {
            return Err(storage_err!("insert_signature", format!("unknown document {}", record.document_id)));
        }
        let key = key_signature(&record.document_id, record.role, record.created_at_nanos, &record.id);
        let cf = self.cf_handle(CF_SIGNATURE)?;
        self.db.put_cf(cf, key, Self::encode(&record)?).map_err(|err| storage_err!("rocksdb put_cf signature", err))?;
        debug!("signature stored document_id={} role={} signature_id={}", record.document_id, record.role, record.id);
        Ok(())
    }

    async fn latest_signature(
        &self,
        document_id: &DocumentId,
        role: SignerRole,
    ) -> Result<Option<SignatureRecord>, SignatureError> {
        // Keys sort by (timestamp, signature id) within a role, so the last row is the latest.
        let prefix = key_signature_role_prefix(document_id, role);
        match self.scan_prefix(CF_SIGNATURE, &prefix)?.pop() {
            Some((_, value)) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    async fn list_signatures(&self, document_id: &DocumentId) -> Result<Vec<SignatureRecord>, SignatureError> {
        let prefix = key_signature_document_prefix(document_id);
        let mut records: Vec<SignatureRecord> = self
            .scan_prefix(CF_SIGNATURE, &prefix)?
            .iter()
            .map(|(_, value)| Self::decode(value))
            .collect::<Result<_, _>>()?;
        records.sort_by(|a, b| a.recency().cmp(&b.recency()));
        Ok(records)
    }

    async fn delete_signature(&self, document_id: &DocumentId, signature_id: &SignatureId) -> Result<bool, SignatureError> {
        let prefix = key_signature_document_prefix(document_id);
        let cf = self.cf_handle(CF_SIGNATURE)?;
        for (key, value) in self.scan_prefix(CF_SIGNATURE, &prefix)? {
            let record: SignatureRecord = Self::decode(&value)?;
            if &record.id == signature_id {
                self.db.delete_cf(cf, key).map_err(|err| storage_err!("rocksdb delete_cf signature", err))?;
                info!("signature deleted document_id={} signature_id={}", document_id, signature_id);
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn organization_settings(&self) -> Result<Option<OrganizationSettings>, SignatureError> {
        self.get_decoded(CF_SETTINGS, ORGANIZATION_SETTINGS_KEY)
    }

    async fn put_organization_settings(&self, settings: OrganizationSettings) -> Result<(), SignatureError> {
        let cf = self.cf_handle(CF_SETTINGS)?;
        self.db
            .put_cf(cf, ORGANIZATION_SETTINGS_KEY, Self::encode(&settings)?)
            .map_err(|err| storage_err!("rocksdb put_cf settings", err))
    }

    async fn health_check(&self) -> Result<(), SignatureError> {
        self.cf_handle(CF_METADATA).map(|_| ())
    }
}

#[async_trait]
impl ObjectStore for RocksStore {
    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), SignatureError> {
        let cf = self.cf_handle(CF_OBJECT)?;
        let size = bytes.len();
        let value = Self::encode(&StoredObject { content_type: content_type.to_string(), bytes, updated_at_nanos: now_nanos() })?;
        self.db.put_cf(cf, key_object(bucket, key), value).map_err(|err| storage_err!("rocksdb put_cf object", err))?;
        debug!("object stored bucket={} key={} size={}", bucket, key, size);
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>, SignatureError> {
        let stored: Option<StoredObject> = self.get_decoded(CF_OBJECT, &key_object(bucket, key))?;
        Ok(stored.map(|object| object.bytes))
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectEntry>, SignatureError> {
        let scan_prefix = key_object(bucket, prefix);
        let bucket_prefix_len = object_bucket_prefix_len(bucket);
        let mut entries = Vec::new();
        for (raw_key, value) in self.scan_prefix(CF_OBJECT, &scan_prefix)? {
            let stored: StoredObject = Self::decode(&value)?;
            let key = String::from_utf8_lossy(&raw_key[bucket_prefix_len..]).into_owned();
            entries.push(ObjectEntry {
                bucket: bucket.to_string(),
                key,
                size: stored.bytes.len(),
                content_type: stored.content_type,
                updated_at_nanos: stored.updated_at_nanos,
            });
        }
        Ok(entries)
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        public_object_url(&self.public_base_url, bucket, key)
    }
}
