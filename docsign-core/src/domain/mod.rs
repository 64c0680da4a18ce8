//! Domain layer: pure signature rules. No I/O, no logging.

pub mod audit;
pub mod model;
pub mod policy;
pub mod questionnaire;
pub mod signature;

pub use model::*;
pub use policy::{requirements, SignDenial, SignaturePermission, SignatureRequirements};
pub use signature::{SignatureEntry, SignatureImage, SignatureSet, SignatureSnapshot, SignatureStatus};
