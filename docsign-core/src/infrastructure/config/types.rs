use crate::foundation::{
    DEFAULT_MAX_SIGNATURE_IMAGE_BYTES, DEFAULT_PUBLIC_BASE_URL, DEFAULT_SEAL_NAME_PATTERNS, DEFAULT_SETTINGS_BUCKET,
    DEFAULT_SIGNATURES_BUCKET,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_FILTERS: &str = "info";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Directory holding the RocksDB store; filled from the resolved data dir when empty.
    #[serde(default)]
    pub data_dir: String,
    /// Directory for rolling log files. Console only when unset.
    #[serde(default)]
    pub log_dir: Option<String>,
    /// `log4rs` filter expression, e.g. `"info,docsign_core=debug"`.
    #[serde(default)]
    pub log_filters: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub public_base_url: String,
    #[serde(default)]
    pub signatures_bucket: String,
    /// Bucket the organization seal path is relative to.
    #[serde(default)]
    pub settings_bucket: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            signatures_bucket: DEFAULT_SIGNATURES_BUCKET.to_string(),
            settings_bucket: DEFAULT_SETTINGS_BUCKET.to_string(),
        }
    }
}

/// Where to look for an organization seal when the settings record has none.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SealConfig {
    #[serde(default)]
    pub buckets: Vec<String>,
    #[serde(default)]
    pub name_patterns: Vec<String>,
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            buckets: vec![DEFAULT_SETTINGS_BUCKET.to_string()],
            name_patterns: DEFAULT_SEAL_NAME_PATTERNS.iter().map(|pattern| pattern.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Load existing signatures as soon as a document is opened.
    #[serde(default = "default_auto_load")]
    pub auto_load: bool,
    #[serde(default)]
    pub max_image_bytes: usize,
}

fn default_auto_load() -> bool {
    true
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self { auto_load: true, max_image_bytes: DEFAULT_MAX_SIGNATURE_IMAGE_BYTES }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// JSON-lines audit file. Audit events only go to the log when unset.
    #[serde(default)]
    pub log_path: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seal: SealConfig,
    #[serde(default)]
    pub signing: SigningConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}
