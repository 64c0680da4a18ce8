use log::{debug, info, trace, warn};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

pub use crate::domain::audit::AuditEvent;

pub trait AuditLogger: Send + Sync {
    fn log(&self, event: AuditEvent);
}

fn event_json(event: &AuditEvent) -> String {
    serde_json::to_string(event).unwrap_or_else(|err| {
        warn!("audit: failed to serialize audit event error={}", err);
        "{\"type\":\"serialize_failed\"}".to_string()
    })
}

/// Emits every event twice through `log`: JSON on `docsign::audit::json`, prose on `docsign::audit::human`.
pub struct StructuredAuditLogger;

impl AuditLogger for StructuredAuditLogger {
    fn log(&self, event: AuditEvent) {
        debug!(target: "docsign::audit::json", "audit event audit_event={}", event_json(&event));
        info!(target: "docsign::audit::human", "{}", human_summary(&event));
    }
}

/// Appends one JSON line per event.
pub struct FileAuditLogger {
    file: Mutex<std::fs::File>,
}

impl FileAuditLogger {
    pub fn new(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file) })
    }
}

impl AuditLogger for FileAuditLogger {
    fn log(&self, event: AuditEvent) {
        let json = event_json(&event);
        let Ok(mut file) = self.file.lock() else {
            warn!("audit: audit file mutex poisoned");
            return;
        };
        if let Err(err) = writeln!(file, "{}", json).and_then(|_| file.flush()) {
            warn!("audit: failed to write audit event to file error={}", err);
        }
    }
}

#[derive(Default)]
pub struct MultiAuditLogger {
    loggers: Vec<Box<dyn AuditLogger>>,
}

impl MultiAuditLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_logger(&mut self, logger: Box<dyn AuditLogger>) {
        self.loggers.push(logger);
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl AuditLogger for MultiAuditLogger {
    fn log(&self, event: AuditEvent) {
        for logger in &self.loggers {
            logger.log(event.clone());
        }
    }
}

static AUDIT_LOGGER: OnceLock<Box<dyn AuditLogger>> = OnceLock::new();

pub fn init_audit_logger(logger: Box<dyn AuditLogger>) {
    if AUDIT_LOGGER.set(logger).is_err() {
        warn!("init_audit_logger called more than once; ignoring");
    }
}

/// Send `event` to the process-wide audit logger, if one was installed.
pub fn audit(event: AuditEvent) {
    match AUDIT_LOGGER.get() {
        Some(logger) => logger.log(event),
        None => trace!("audit event dropped: no logger configured event={:?}", event),
    }
}

pub fn human_summary(event: &AuditEvent) -> String {
    match event {
        AuditEvent::DocumentOpened { document_id, document_type, training_id, participant_id, .. } => format!(
            "AUDIT: document opened - {} (document: {}, training: {}, participant: {})",
            document_type, document_id, training_id, participant_id
        ),
        AuditEvent::SignatureCaptured { document_id, role, signature_id, created_by, resigned, .. } => format!(
            "AUDIT: signature captured - role={} by={} resigned={} (document: {}, signature: {})",
            role, created_by, resigned, document_id, signature_id
        ),
        AuditEvent::SignatureRejected { document_id, role, reason, .. } => {
            format!("AUDIT: signature rejected - role={} reason={} (document: {})", role, reason, document_id)
        }
        AuditEvent::DocumentFullySigned { document_id, document_type, signature_count, .. } => format!(
            "AUDIT: document fully signed - {} with {} signature(s) (document: {})",
            document_type, signature_count, document_id
        ),
        AuditEvent::SignatureRevoked { document_id, signature_id, .. } => {
            format!("AUDIT: signature revoked - signature={} (document: {})", signature_id, document_id)
        }
        AuditEvent::OrganizationSealResolved { source, url, .. } => {
            format!("AUDIT: organization seal resolved - source={} url={}", source, url)
        }
    }
}
