//! Logging constants for the signature service and its tools.

/// Log file name.
pub const LOG_FILE_NAME: &str = "docsign.log";
/// Error log file name (warn+error).
pub const ERR_LOG_FILE_NAME: &str = "docsign_err.log";

/// Console log pattern (colored).
///
/// Format: `timestamp [LEVEL] message [module]`
pub const LOG_LINE_PATTERN_COLORED: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{h({l:5})}] {m} [{M}]{n}";

/// File log pattern (no colors).
pub const LOG_LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l:5}] {m} [{M}]{n}";

/// Rotate log files at 20 MB.
pub const LOG_FILE_MAX_SIZE: u64 = 20_000_000;

pub const LOG_FILE_MAX_ROLLS: u32 = 5;

/// Crates logged at the application level; everything else is off unless opted in.
pub const WHITELISTED_CRATES: &[&str] = &["docsign_core", "signature_admin"];
