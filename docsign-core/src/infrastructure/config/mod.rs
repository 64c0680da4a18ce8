mod env;
mod loader;
mod types;
pub mod validation;

pub use env::{resolve_config_path, resolve_data_dir, CONFIG_FILE_NAME, CONFIG_PATH_ENV, DATA_DIR_ENV};
pub use loader::{load_config, load_config_from_file, ENV_PREFIX};
pub use types::*;

use crate::foundation::SignatureError;
use std::path::Path;

fn validated(config: AppConfig) -> Result<AppConfig, SignatureError> {
    config.validate().map_err(|errors| SignatureError::ConfigError(format!("validation failed: {}", errors.join("; "))))?;
    Ok(config)
}

/// Load and validate configuration using `DOCSIGN_DATA_DIR` / `DOCSIGN_CONFIG_PATH`.
pub fn load_app_config() -> Result<AppConfig, SignatureError> {
    let data_dir = resolve_data_dir()?;
    let config_path = resolve_config_path(&data_dir);
    validated(load_config_from_file(&config_path, &data_dir)?)
}

pub fn load_app_config_from_path(path: &Path, data_dir: &Path) -> Result<AppConfig, SignatureError> {
    validated(load_config_from_file(path, data_dir)?)
}
