//! Per-document signature session.
//!
//! A [`SignatureCoordinator`] is owned by whoever displays one document (CRM page, student
//! portal, admin tool). It reads the current signatures, answers "who may sign now", and records
//! new signatures. Nothing is shared between coordinators except the stores; two viewers of the
//! same document see each other's work only after a [`SignatureCoordinator::reload`].

use crate::application::capture::CaptureSubscription;
use crate::application::lifecycle::{NoopObserver, SignatureObserver};
use crate::application::seal::{OrganizationSealResolver, SealSearchConfig};
use crate::domain::policy::{evaluate_can_sign, evaluate_status, is_fully_signed};
use crate::domain::signature::signature_storage_key;
use crate::domain::{
    requirements, Document, DocumentKey, SignatureEntry, SignatureImage, SignaturePermission, SignatureRecord,
    SignatureRequirements, SignatureSet, SignatureSnapshot, SignatureStatus, SignerRole,
};
use crate::foundation::util::time::next_after;
use crate::foundation::{now_nanos, SignatureError, SignatureId, DEFAULT_MAX_SIGNATURE_IMAGE_BYTES, DEFAULT_SIGNATURES_BUCKET};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::session::SessionProvider;
use crate::infrastructure::storage::{DocumentStore, ObjectStore};
use futures_util::future::join_all;
use log::{debug, info, trace, warn};
use std::sync::Arc;

/// Which application the document is viewed from; drives role inference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerKind {
    /// Back-office staff: trainer and organization.
    Crm,
    /// Learner portal: participant or their company representative.
    Student,
    /// Watches progress without signing (reporting, admin status).
    ReadOnly,
}

impl ViewerKind {
    fn role_preference(&self) -> &'static [SignerRole] {
        match self {
            ViewerKind::Crm => &[SignerRole::Trainer, SignerRole::OrganizationSeal, SignerRole::CompanySeal],
            ViewerKind::Student => &[SignerRole::Participant, SignerRole::Representative],
            ViewerKind::ReadOnly => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Incomplete,
    Complete,
}

#[derive(Clone, Debug)]
pub struct CoordinatorOptions {
    /// Load existing signatures on open. When false only an explicit `reload` or a save loads them.
    pub auto_load: bool,
    pub max_image_bytes: usize,
    pub signatures_bucket: String,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            auto_load: true,
            max_image_bytes: DEFAULT_MAX_SIGNATURE_IMAGE_BYTES,
            signatures_bucket: DEFAULT_SIGNATURES_BUCKET.to_string(),
        }
    }
}

impl CoordinatorOptions {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            auto_load: config.signing.auto_load,
            max_image_bytes: config.signing.max_image_bytes,
            signatures_bucket: config.storage.signatures_bucket.clone(),
        }
    }
}

/// Collaborators shared by every coordinator of a process.
#[derive(Clone)]
pub struct CoordinatorContext {
    pub documents: Arc<dyn DocumentStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub sessions: Arc<dyn SessionProvider>,
    pub seal_resolver: Arc<OrganizationSealResolver>,
    pub observer: Arc<dyn SignatureObserver>,
}

impl CoordinatorContext {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
        sessions: Arc<dyn SessionProvider>,
        seal_config: SealSearchConfig,
    ) -> Self {
        let seal_resolver = Arc::new(OrganizationSealResolver::new(documents.clone(), objects.clone(), seal_config));
        Self { documents, objects, sessions, seal_resolver, observer: Arc::new(NoopObserver) }
    }

    /// Context over one store serving both records and objects.
    pub fn from_store<S>(store: Arc<S>, sessions: Arc<dyn SessionProvider>, seal_config: SealSearchConfig) -> Self
    where
        S: DocumentStore + ObjectStore + 'static,
    {
        Self::new(store.clone(), store, sessions, seal_config)
    }

    pub fn with_observer(mut self, observer: Arc<dyn SignatureObserver>) -> Self {
        self.observer = observer;
        self
    }
}

pub struct SignatureCoordinator {
    context: CoordinatorContext,
    options: CoordinatorOptions,
    document: Document,
    requirements: &'static SignatureRequirements,
    viewer: ViewerKind,
    /// `None` until the first load completes; replaced whole on every load.
    signatures: Option<SignatureSet>,
    loading: bool,
    closed: bool,
    capture: Option<CaptureSubscription>,
}

impl SignatureCoordinator {
    /// Open (creating if needed) the document for `key` and, with `auto_load`, load its signatures.
    pub async fn open(
        key: DocumentKey,
        viewer: ViewerKind,
        context: CoordinatorContext,
        options: CoordinatorOptions,
    ) -> Result<Self, SignatureError> {
        let document = context
            .documents
            .get_or_create_document(&key)
            .await
            .map_err(|err| SignatureError::store_read("get_or_create_document", err))?;
        debug!("document opened document_id={} key={} viewer={:?}", document.id, key, viewer);
        context.observer.on_document_opened(&document);

        let mut coordinator = Self {
            requirements: requirements(document.document_type),
            context,
            options,
            document,
            viewer,
            signatures: None,
            loading: false,
            closed: false,
            capture: None,
        };
        coordinator.load_existing_signatures().await;
        Ok(coordinator)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn requirements(&self) -> &'static SignatureRequirements {
        self.requirements
    }

    pub fn viewer(&self) -> ViewerKind {
        self.viewer
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn state(&self) -> LoadState {
        match &self.signatures {
            None if self.loading => LoadState::Loading,
            None => LoadState::Unloaded,
            Some(set) if is_fully_signed(self.requirements, set) => LoadState::Complete,
            Some(_) => LoadState::Incomplete,
        }
    }

    /// Load signatures once. No-op when already loaded, auto-load is off, or the session is closed.
    pub async fn load_existing_signatures(&mut self) {
        if self.closed || self.signatures.is_some() || !self.options.auto_load {
            trace!(
                "load_existing_signatures skipped document_id={} closed={} loaded={} auto_load={}",
                self.document.id,
                self.closed,
                self.signatures.is_some(),
                self.options.auto_load
            );
            return;
        }
        self.fetch_signatures().await;
    }

    /// Read the set again from the stores; the previous set stays visible until the new one is complete.
    pub async fn reload(&mut self) {
        if self.closed {
            return;
        }
        self.fetch_signatures().await;
    }

    async fn fetch_signatures(&mut self) {
        self.loading = true;
        let roles = self.requirements.permitted_roles();
        let results = {
            let this = &*self;
            join_all(roles.iter().map(|role| this.load_role(*role))).await
        };

        let mut set = SignatureSet::new();
        for (role, entry) in results {
            if let Some(entry) = entry {
                set.record(role, entry);
            }
        }
        debug!("signatures loaded document_id={} roles={} signed={}", self.document.id, roles.len(), set.len());
        self.context.observer.on_signatures_loaded(&self.document, &set);
        self.signatures = Some(set);
        self.loading = false;
    }

    /// Latest known signature for `role`; read failures count as "not signed".
    async fn load_role(&self, role: SignerRole) -> (SignerRole, Option<SignatureEntry>) {
        if role == SignerRole::OrganizationSeal {
            if let Some(seal) = self.context.seal_resolver.resolve().await {
                return (role, Some(SignatureEntry { image_url: seal.url, created_at_nanos: 0 }));
            }
        }
        match self.context.documents.latest_signature(&self.document.id, role).await {
            Ok(record) => (role, record.map(|r| SignatureEntry { image_url: r.image_url, created_at_nanos: r.created_at_nanos })),
            Err(err) => {
                let err = SignatureError::store_read("latest_signature", err);
                warn!("signature read failed; treating as unsigned document_id={} role={} error={}", self.document.id, role, err);
                (role, None)
            }
        }
    }

    pub fn can_sign(&self, role: SignerRole) -> SignaturePermission {
        evaluate_can_sign(self.requirements, self.signatures.as_ref(), role)
    }

    pub fn is_fully_signed(&self) -> bool {
        self.signatures.as_ref().is_some_and(|set| is_fully_signed(self.requirements, set))
    }

    /// Role the current viewer signs as: first of the viewer's preferences this document accepts.
    pub fn viewer_role(&self) -> Option<SignerRole> {
        self.viewer.role_preference().iter().copied().find(|role| self.requirements.permits(*role))
    }

    pub fn signature_status(&self) -> SignatureStatus {
        evaluate_status(self.requirements, self.signatures.as_ref(), self.viewer_role())
    }

    pub fn signature_status_message(&self) -> String {
        self.signature_status().message().to_string()
    }

    /// Five-slot view for the renderer. Empty until loaded.
    pub fn signatures(&self) -> SignatureSnapshot {
        self.signatures.as_ref().map(SignatureSet::snapshot).unwrap_or_default()
    }

    /// Validate, upload and record a signature for `role`; returns its public URL.
    ///
    /// The in-memory set changes only after both the upload and the record insert succeed.
    pub async fn save_signature(&mut self, image_data: &str, role: SignerRole) -> Result<String, SignatureError> {
        match self.try_save_signature(image_data, role).await {
            Ok(url) => Ok(url),
            Err(err) => {
                self.context.observer.on_save_failed(&self.document, role.as_str(), &err);
                Err(err)
            }
        }
    }

    async fn try_save_signature(&mut self, image_data: &str, role: SignerRole) -> Result<String, SignatureError> {
        if self.closed {
            return Err(SignatureError::CoordinatorClosed { document_id: self.document.id.to_string() });
        }
        let session = self.context.sessions.current_session().await.ok_or(SignatureError::AuthenticationRequired)?;
        let image = SignatureImage::from_data_url(image_data, self.options.max_image_bytes)?;

        if self.signatures.is_none() {
            self.fetch_signatures().await;
        }
        self.can_sign(role).enforce(self.document.document_type)?;

        let previous = self.signatures.as_ref().and_then(|set| set.get(role)).map(|entry| entry.created_at_nanos);
        let created_at_nanos = next_after(previous, now_nanos());
        let bucket = self.options.signatures_bucket.clone();
        let storage_key = signature_storage_key(&self.document.id, role, created_at_nanos, image.format);

        self.context
            .objects
            .put_object(&bucket, &storage_key, image.bytes, image.format.content_type())
            .await
            .map_err(|err| SignatureError::store_write("upload_signature_image", err))?;
        let image_url = self.context.objects.public_url(&bucket, &storage_key);

        let record = SignatureRecord {
            id: SignatureId::generate(),
            document_id: self.document.id.clone(),
            role,
            image_url: image_url.clone(),
            storage_key: storage_key.clone(),
            created_at_nanos,
            created_by: session.user_id,
        };
        if let Err(err) = self.context.documents.insert_signature(record.clone()).await {
            warn!(
                "signature record insert failed; uploaded image left orphaned document_id={} role={} bucket={} key={}",
                self.document.id, role, bucket, storage_key
            );
            return Err(SignatureError::store_write("insert_signature", err));
        }

        let Some(set) = self.signatures.as_mut() else {
            return Err(SignatureError::SignaturesNotLoaded);
        };
        let was_complete = is_fully_signed(self.requirements, set);
        let resigned = set.has(role);
        set.record(role, SignatureEntry { image_url: image_url.clone(), created_at_nanos });
        let now_complete = is_fully_signed(self.requirements, set);

        info!("signature saved document_id={} role={} resigned={} url={}", self.document.id, role, resigned, image_url);
        self.context.observer.on_signature_saved(&self.document, &record, resigned);
        if now_complete && !was_complete {
            if let Some(set) = self.signatures.as_ref() {
                self.context.observer.on_fully_signed(&self.document, set);
            }
        }
        Ok(image_url)
    }

    /// Route captures from a signature pad into this session. Replaces any earlier subscription.
    pub fn attach_capture(&mut self, subscription: CaptureSubscription) {
        if let Some(mut previous) = self.capture.replace(subscription) {
            previous.close();
        }
    }

    /// Wait for the next capture and save it. `None` when no subscription is attached or it ended.
    pub async fn process_next_capture(&mut self) -> Option<Result<String, SignatureError>> {
        let captured = self.capture.as_mut()?.next().await?;
        trace!("capture received document_id={} role={}", self.document.id, captured.role);
        Some(self.save_signature(&captured.image_data, captured.role).await)
    }

    /// End the session: stop listening for captures. In-flight store writes are not aborted.
    pub fn destroy(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(mut subscription) = self.capture.take() {
            subscription.close();
        }
        debug!("signature session closed document_id={}", self.document.id);
        self.context.observer.on_destroyed(&self.document);
    }
}

impl Drop for SignatureCoordinator {
    fn drop(&mut self) {
        self.destroy();
    }
}
