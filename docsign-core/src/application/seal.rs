//! Organization seal lookup.
//!
//! Resolution order: settings `seal_url`, then settings `seal_path` (relative to the settings
//! bucket), then a scan of the configured buckets for an image whose file name looks like a seal.
//! A failing tier is logged and the next one is tried. Every load resolves again; only a change
//! of the resolved seal is audited.

use crate::foundation::{now_nanos, DEFAULT_SEAL_NAME_PATTERNS, DEFAULT_SETTINGS_BUCKET, SEAL_IMAGE_EXTENSIONS};
use crate::infrastructure::audit::{audit, AuditEvent};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::storage::{DocumentStore, ObjectEntry, ObjectStore};
use log::{debug, info, warn};
use std::fmt;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SealSource {
    SettingsUrl,
    SettingsPath,
    StorageScan,
}

impl fmt::Display for SealSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SealSource::SettingsUrl => "settings_url",
            SealSource::SettingsPath => "settings_path",
            SealSource::StorageScan => "storage_scan",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealResolution {
    pub url: String,
    pub source: SealSource,
}

#[derive(Clone, Debug)]
pub struct SealSearchConfig {
    pub settings_bucket: String,
    pub buckets: Vec<String>,
    /// Lower-case fragments matched against object file names.
    pub name_patterns: Vec<String>,
}

impl Default for SealSearchConfig {
    fn default() -> Self {
        Self {
            settings_bucket: DEFAULT_SETTINGS_BUCKET.to_string(),
            buckets: vec![DEFAULT_SETTINGS_BUCKET.to_string()],
            name_patterns: DEFAULT_SEAL_NAME_PATTERNS.iter().map(|pattern| pattern.to_string()).collect(),
        }
    }
}

impl SealSearchConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            settings_bucket: config.storage.settings_bucket.clone(),
            buckets: config.seal.buckets.clone(),
            name_patterns: config.seal.name_patterns.clone(),
        }
    }

    fn matches(&self, entry: &ObjectEntry) -> bool {
        let name = entry.file_name().to_ascii_lowercase();
        let is_image = name.rsplit_once('.').is_some_and(|(_, ext)| SEAL_IMAGE_EXTENSIONS.contains(&ext));
        is_image && self.name_patterns.iter().any(|pattern| name.contains(pattern.as_str()))
    }
}

pub struct OrganizationSealResolver {
    documents: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
    config: SealSearchConfig,
    last_resolved: Mutex<Option<SealResolution>>,
}

impl OrganizationSealResolver {
    pub fn new(documents: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStore>, config: SealSearchConfig) -> Self {
        Self { documents, objects, config, last_resolved: Mutex::new(None) }
    }

    pub async fn resolve(&self) -> Option<SealResolution> {
        let resolution = match self.from_settings().await {
            Some(resolution) => Some(resolution),
            None => self.from_storage_scan().await,
        };
        match &resolution {
            Some(found) => debug!("organization seal resolved source={} url={}", found.source, found.url),
            None => debug!("no organization seal configured or found"),
        }
        if self.record_resolution(&resolution) {
            if let Some(found) = &resolution {
                info!("organization seal changed source={} url={}", found.source, found.url);
                audit(AuditEvent::OrganizationSealResolved {
                    source: found.source.to_string(),
                    url: found.url.clone(),
                    timestamp_ns: now_nanos(),
                });
            }
        }
        resolution
    }

    /// Remember `resolution`; true when it differs from the previous one.
    fn record_resolution(&self, resolution: &Option<SealResolution>) -> bool {
        let Ok(mut last) = self.last_resolved.lock() else {
            return resolution.is_some();
        };
        if *last == *resolution {
            return false;
        }
        *last = resolution.clone();
        true
    }

    async fn from_settings(&self) -> Option<SealResolution> {
        let settings = match self.documents.organization_settings().await {
            Ok(Some(settings)) => settings,
            Ok(None) => return None,
            Err(err) => {
                warn!("organization settings read failed error={}", err);
                return None;
            }
        };

        if let Some(url) = settings.seal_url.as_deref().map(str::trim).filter(|url| !url.is_empty()) {
            return Some(SealResolution { url: url.to_string(), source: SealSource::SettingsUrl });
        }

        let path = settings.seal_path.as_deref().map(str::trim).filter(|path| !path.is_empty())?;
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            self.objects.public_url(&self.config.settings_bucket, path)
        };
        Some(SealResolution { url, source: SealSource::SettingsPath })
    }

    async fn from_storage_scan(&self) -> Option<SealResolution> {
        let mut candidates: Vec<ObjectEntry> = Vec::new();
        for bucket in &self.config.buckets {
            match self.objects.list_objects(bucket, "").await {
                Ok(entries) => candidates.extend(entries.into_iter().filter(|entry| self.config.matches(entry))),
                Err(err) => warn!("seal scan failed bucket={} error={}", bucket, err),
            }
        }
        // Most recently updated first; key order breaks ties.
        candidates.sort_by(|a, b| b.updated_at_nanos.cmp(&a.updated_at_nanos).then_with(|| a.key.cmp(&b.key)));
        let best = candidates.into_iter().next()?;
        debug!("seal candidate bucket={} key={}", best.bucket, best.key);
        Some(SealResolution { url: self.objects.public_url(&best.bucket, &best.key), source: SealSource::StorageScan })
    }
}
