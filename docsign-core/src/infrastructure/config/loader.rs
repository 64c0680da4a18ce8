//! Layered configuration loading.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Environment variables (`DOCSIGN_` prefix)

use crate::foundation::{SignatureError, DEFAULT_MAX_SIGNATURE_IMAGE_BYTES, DEFAULT_PUBLIC_BASE_URL, DEFAULT_SIGNATURES_BUCKET};
use crate::infrastructure::config::env::CONFIG_FILE_NAME;
use crate::infrastructure::config::types::{AppConfig, DEFAULT_LOG_FILTERS};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::{debug, info};
use std::path::Path;

/// Environment variable prefix for config overrides.
///
/// Example: `DOCSIGN_STORAGE__PUBLIC_BASE_URL` -> `storage.public_base_url`
pub const ENV_PREFIX: &str = "DOCSIGN_";

/// Load `docsign.toml` from `data_dir`.
pub fn load_config(data_dir: &Path) -> Result<AppConfig, SignatureError> {
    load_config_from_file(&data_dir.join(CONFIG_FILE_NAME), data_dir)
}

pub fn load_config_from_file(path: &Path, data_dir: &Path) -> Result<AppConfig, SignatureError> {
    info!("loading configuration path={} data_dir={}", path.display(), data_dir.display());
    let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        debug!("configuration file missing; using defaults and env only path={}", path.display());
    }
    // `CONFIG_PATH` and `DATA_DIR` select the files themselves; `TEST_NOW_NANOS` is the clock override.
    let env = Env::prefixed(ENV_PREFIX).ignore(&["CONFIG_PATH", "DATA_DIR", "TEST_NOW_NANOS"]).split("__");
    let mut config: AppConfig = figment
        .merge(env)
        .extract()
        .map_err(|err| SignatureError::ConfigError(format!("config extraction failed: {err}")))?;
    postprocess(&mut config, data_dir);
    debug!(
        "configuration loaded data_dir={} public_base_url={} signatures_bucket={} auto_load={}",
        config.service.data_dir, config.storage.public_base_url, config.storage.signatures_bucket, config.signing.auto_load
    );
    Ok(config)
}

fn postprocess(config: &mut AppConfig, data_dir: &Path) {
    if config.service.data_dir.trim().is_empty() {
        config.service.data_dir = data_dir.to_string_lossy().to_string();
    }
    if config.service.log_filters.trim().is_empty() {
        config.service.log_filters = DEFAULT_LOG_FILTERS.to_string();
    }
    if config.storage.public_base_url.trim().is_empty() {
        config.storage.public_base_url = DEFAULT_PUBLIC_BASE_URL.to_string();
    }
    if config.storage.signatures_bucket.trim().is_empty() {
        config.storage.signatures_bucket = DEFAULT_SIGNATURES_BUCKET.to_string();
    }
    if config.signing.max_image_bytes == 0 {
        config.signing.max_image_bytes = DEFAULT_MAX_SIGNATURE_IMAGE_BYTES;
    }
    config.seal.name_patterns =
        config.seal.name_patterns.iter().map(|pattern| pattern.trim().to_ascii_lowercase()).filter(|p| !p.is_empty()).collect();
}
