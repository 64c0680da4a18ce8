use crate::domain::{Document, SignatureRecord, SignatureSet};
use crate::foundation::{now_nanos, SignatureError};
use crate::infrastructure::audit::{audit, AuditEvent};
use log::{debug, info, trace, warn};
use std::sync::Arc;

/// Hooks fired by [`crate::application::SignatureCoordinator`] as a document session progresses.
pub trait SignatureObserver: Send + Sync {
    fn on_document_opened(&self, _document: &Document) {}
    fn on_signatures_loaded(&self, _document: &Document, _signatures: &SignatureSet) {}
    fn on_signature_saved(&self, _document: &Document, _record: &SignatureRecord, _resigned: bool) {}
    fn on_fully_signed(&self, _document: &Document, _signatures: &SignatureSet) {}
    fn on_save_failed(&self, _document: &Document, _role: &str, _error: &SignatureError) {}
    fn on_destroyed(&self, _document: &Document) {}
}

pub struct NoopObserver;

impl SignatureObserver for NoopObserver {}

#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn SignatureObserver>>,
}

impl CompositeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observer(&mut self, observer: Arc<dyn SignatureObserver>) {
        self.observers.push(observer);
    }
}

impl SignatureObserver for CompositeObserver {
    fn on_document_opened(&self, document: &Document) {
        trace!("on_document_opened dispatch observer_count={} document_id={}", self.observers.len(), document.id);
        for observer in &self.observers {
            observer.on_document_opened(document);
        }
    }

    fn on_signatures_loaded(&self, document: &Document, signatures: &SignatureSet) {
        debug!("signatures loaded document_id={} signature_count={}", document.id, signatures.len());
        for observer in &self.observers {
            observer.on_signatures_loaded(document, signatures);
        }
    }

    fn on_signature_saved(&self, document: &Document, record: &SignatureRecord, resigned: bool) {
        debug!("signature saved document_id={} role={} resigned={}", document.id, record.role, resigned);
        for observer in &self.observers {
            observer.on_signature_saved(document, record, resigned);
        }
    }

    fn on_fully_signed(&self, document: &Document, signatures: &SignatureSet) {
        info!("document fully signed document_id={} document_type={}", document.id, document.document_type);
        for observer in &self.observers {
            observer.on_fully_signed(document, signatures);
        }
    }

    fn on_save_failed(&self, document: &Document, role: &str, error: &SignatureError) {
        warn!("signature save failed document_id={} role={} error={}", document.id, role, error);
        for observer in &self.observers {
            observer.on_save_failed(document, role, error);
        }
    }

    fn on_destroyed(&self, document: &Document) {
        trace!("on_destroyed dispatch observer_count={} document_id={}", self.observers.len(), document.id);
        for observer in &self.observers {
            observer.on_destroyed(document);
        }
    }
}

/// Forwards lifecycle hooks to the process-wide audit logger.
pub struct AuditObserver;

impl SignatureObserver for AuditObserver {
    fn on_document_opened(&self, document: &Document) {
        audit(AuditEvent::DocumentOpened {
            document_id: document.id.to_string(),
            document_type: document.document_type.to_string(),
            training_id: document.training_id.to_string(),
            participant_id: document.participant_id.to_string(),
            timestamp_ns: now_nanos(),
        });
    }

    fn on_signature_saved(&self, document: &Document, record: &SignatureRecord, resigned: bool) {
        audit(AuditEvent::SignatureCaptured {
            document_id: document.id.to_string(),
            document_type: document.document_type.to_string(),
            role: record.role.to_string(),
            signature_id: record.id.to_string(),
            image_url: record.image_url.clone(),
            created_by: record.created_by.to_string(),
            resigned,
            timestamp_ns: record.created_at_nanos,
        });
    }

    fn on_fully_signed(&self, document: &Document, signatures: &SignatureSet) {
        audit(AuditEvent::DocumentFullySigned {
            document_id: document.id.to_string(),
            document_type: document.document_type.to_string(),
            signature_count: signatures.len(),
            timestamp_ns: now_nanos(),
        });
    }

    fn on_save_failed(&self, document: &Document, role: &str, error: &SignatureError) {
        audit(AuditEvent::SignatureRejected {
            document_id: document.id.to_string(),
            role: role.to_string(),
            reason: error.to_string(),
            timestamp_ns: now_nanos(),
        });
    }
}
