//! Application layer: orchestration across domain logic and infrastructure I/O.

pub mod capture;
pub mod coordinator;
pub mod lifecycle;
pub mod seal;

pub use capture::{capture_channel, CaptureHandle, CaptureSubscription, CapturedSignature};
pub use coordinator::{CoordinatorContext, CoordinatorOptions, LoadState, SignatureCoordinator, ViewerKind};
pub use lifecycle::{AuditObserver, CompositeObserver, NoopObserver, SignatureObserver};
pub use seal::{OrganizationSealResolver, SealResolution, SealSearchConfig, SealSource};
