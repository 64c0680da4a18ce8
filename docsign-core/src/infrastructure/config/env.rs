use crate::foundation::SignatureError;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "DOCSIGN_CONFIG_PATH";
pub const DATA_DIR_ENV: &str = "DOCSIGN_DATA_DIR";
pub const CONFIG_FILE_NAME: &str = "docsign.toml";
pub const DEFAULT_DATA_DIR_NAME: &str = ".docsign";

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

pub fn resolve_config_path(data_dir: &Path) -> PathBuf {
    match non_empty_env(CONFIG_PATH_ENV) {
        Some(path) => PathBuf::from(path),
        None => data_dir.join(CONFIG_FILE_NAME),
    }
}

pub fn resolve_data_dir() -> Result<PathBuf, SignatureError> {
    if let Some(dir) = non_empty_env(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let cwd = std::env::current_dir().map_err(|err| SignatureError::ConfigError(format!("env::current_dir: {}", err)))?;
    Ok(cwd.join(DEFAULT_DATA_DIR_NAME))
}
