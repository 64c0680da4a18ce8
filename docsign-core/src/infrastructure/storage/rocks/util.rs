//! Write lock for the document index.

use crate::foundation::{SignatureError, STORAGE_LOCK_TIMEOUT_SECS};
use log::warn;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};

/// Serializes find-then-insert on the document index. Waiters give up after `timeout`.
pub struct IndexLock {
    inner: Mutex<()>,
    timeout: Duration,
}

impl IndexLock {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(STORAGE_LOCK_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { inner: Mutex::new(()), timeout }
    }

    pub async fn acquire(&self, operation: &'static str) -> Result<MutexGuard<'_, ()>, SignatureError> {
        tokio::time::timeout(self.timeout, self.inner.lock()).await.map_err(|_| {
            warn!("document index lock timed out operation={} timeout_ms={}", operation, self.timeout.as_millis());
            SignatureError::StorageLockTimeout { operation: operation.to_string(), timeout_secs: self.timeout.as_secs() }
        })
    }
}

impl Default for IndexLock {
    fn default() -> Self {
        Self::new()
    }
}
