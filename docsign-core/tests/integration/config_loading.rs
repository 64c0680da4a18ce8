use docsign_core::application::{CoordinatorOptions, SealSearchConfig};
use docsign_core::infrastructure::config::{load_app_config_from_path, CONFIG_FILE_NAME};
use docsign_core::SignatureError;
use tempfile::tempdir;

#[test]
fn file_settings_flow_into_coordinator_options() {
    let dir = tempdir().expect("test setup: temp dir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
        [storage]
        public_base_url = "https://files.example.org/public"
        signatures_bucket = "signed-documents"
        settings_bucket = "branding"

        [seal]
        buckets = ["branding"]
        name_patterns = ["Cachet"]

        [signing]
        auto_load = false
        max_image_bytes = 65536
    "#,
    )
    .expect("test setup: write config");

    let config = load_app_config_from_path(&path, dir.path()).expect("valid config");
    let options = CoordinatorOptions::from_app_config(&config);
    assert!(!options.auto_load);
    assert_eq!(options.max_image_bytes, 65536);
    assert_eq!(options.signatures_bucket, "signed-documents");

    let seal = SealSearchConfig::from_app_config(&config);
    assert_eq!(seal.settings_bucket, "branding");
    assert_eq!(seal.buckets, vec!["branding"]);
    assert_eq!(seal.name_patterns, vec!["cachet"]);
}

#[test]
fn invalid_values_fail_validation() {
    let dir = tempdir().expect("test setup: temp dir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
        [storage]
        public_base_url = "ftp://files.example.org"

        [signing]
        max_image_bytes = 999999999
    "#,
    )
    .expect("test setup: write config");

    let err = load_app_config_from_path(&path, dir.path()).expect_err("invalid config");
    match err {
        SignatureError::ConfigError(message) => {
            assert!(message.contains("public_base_url"), "{message}");
            assert!(message.contains("max_image_bytes"), "{message}");
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn missing_file_yields_valid_defaults() {
    let dir = tempdir().expect("test setup: temp dir");
    let config = load_app_config_from_path(&dir.path().join("absent.toml"), dir.path()).expect("defaults");
    let options = CoordinatorOptions::from_app_config(&config);
    assert!(options.auto_load);
    assert_eq!(options.signatures_bucket, "signatures");
}
