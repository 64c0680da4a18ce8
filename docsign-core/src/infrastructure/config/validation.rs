use crate::infrastructure::config::types::AppConfig;

/// Hard cap for `signing.max_image_bytes` (16 MiB).
const MAX_IMAGE_BYTES_CEILING: usize = 16 * 1024 * 1024;

impl AppConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let base_url = self.storage.public_base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            errors.push(format!("storage.public_base_url must be an http(s) URL: {}", base_url));
        }

        for (field, bucket) in [
            ("storage.signatures_bucket", &self.storage.signatures_bucket),
            ("storage.settings_bucket", &self.storage.settings_bucket),
        ] {
            if !is_valid_bucket_name(bucket) {
                errors.push(format!("{} is not a valid bucket name: '{}'", field, bucket));
            }
        }
        for bucket in &self.seal.buckets {
            if !is_valid_bucket_name(bucket) {
                errors.push(format!("seal.buckets entry is not a valid bucket name: '{}'", bucket));
            }
        }

        if !self.seal.buckets.is_empty() && self.seal.name_patterns.is_empty() {
            errors.push("seal.name_patterns must not be empty when seal.buckets are scanned".to_string());
        }

        if self.signing.max_image_bytes == 0 {
            errors.push("signing.max_image_bytes must be > 0".to_string());
        }
        if self.signing.max_image_bytes > MAX_IMAGE_BYTES_CEILING {
            errors.push(format!("signing.max_image_bytes should not exceed {}", MAX_IMAGE_BYTES_CEILING));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_valid_bucket_name(bucket: &str) -> bool {
    !bucket.is_empty()
        && !bucket.contains(':')
        && bucket.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
