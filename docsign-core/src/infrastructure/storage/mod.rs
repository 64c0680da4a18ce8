pub mod memory;
pub mod rocks;
pub mod traits;

pub use memory::MemoryStore;
pub use rocks::RocksStore;
pub use traits::*;

/// Public URL of `key` inside `bucket`.
pub fn public_object_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), bucket.trim_matches('/'), key.trim_start_matches('/'))
}
