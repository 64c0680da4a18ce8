//! System-wide constants for document signature coordination.

/// Nanoseconds per second (10^9).
pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Default upper bound for a decoded signature image (512 KiB).
///
/// Captured pads produce PNGs of a few hundred KB at most.
pub const DEFAULT_MAX_SIGNATURE_IMAGE_BYTES: usize = 512 * 1024;

/// Default bucket for captured signature images.
pub const DEFAULT_SIGNATURES_BUCKET: &str = "signatures";

/// Default bucket holding organization-wide assets (seal, logo).
pub const DEFAULT_SETTINGS_BUCKET: &str = "organization-assets";

/// Default base URL used to build public object URLs.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:8080/storage/v1/object/public";

/// File name fragments that make a stored object a plausible organization seal.
pub const DEFAULT_SEAL_NAME_PATTERNS: &[&str] = &["seal", "stamp", "cachet", "tampon"];

/// Image extensions considered when scanning storage for a seal.
pub const SEAL_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Length of the random suffix appended to generated storage keys (bytes, hex-encoded).
pub const STORAGE_KEY_RANDOM_BYTES: usize = 6;

/// Test-only clock override (nanoseconds since epoch).
pub const TEST_NOW_NANOS_ENV_VAR: &str = "DOCSIGN_TEST_NOW_NANOS";

/// Bounded wait for coarse storage locks.
pub const STORAGE_LOCK_TIMEOUT_SECS: u64 = 5;

/// Current on-disk schema version of the RocksDB store.
pub const STORAGE_SCHEMA_VERSION: u32 = 1;
