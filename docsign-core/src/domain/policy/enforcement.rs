use crate::domain::policy::types::{SignDenial, SignaturePermission, SignatureRequirements};
use crate::domain::signature::{SignatureSet, SignatureStatus};
use crate::domain::SignerRole;

pub const LOADING_REASON: &str = "Signatures are still loading";
pub const NOT_REQUIRED_REASON: &str = "Signature not required for this document";
pub const ALREADY_SIGNED_REASON: &str = "Already signed";

/// Decide whether `role` may sign now. `signatures` is `None` until the set has been loaded.
pub fn evaluate_can_sign(
    requirements: &SignatureRequirements,
    signatures: Option<&SignatureSet>,
    role: SignerRole,
) -> SignaturePermission {
    let Some(signatures) = signatures else {
        return SignaturePermission::denied(role, SignDenial::Loading, LOADING_REASON);
    };

    if !requirements.permits(role) {
        return SignaturePermission::denied(role, SignDenial::NotRequired, NOT_REQUIRED_REASON);
    }

    if signatures.has(role) && !role.may_resign() {
        return SignaturePermission::denied(role, SignDenial::AlreadySigned, ALREADY_SIGNED_REASON);
    }

    let waiting_for: Vec<SignerRole> =
        requirements.predecessors(role).iter().copied().filter(|predecessor| !signatures.has(*predecessor)).collect();
    if !waiting_for.is_empty() {
        return SignaturePermission::denied(role, SignDenial::OutOfOrder { waiting_for }, requirements.pending_message);
    }

    SignaturePermission::allowed(role)
}

/// True iff every required role has a recorded signature.
pub fn is_fully_signed(requirements: &SignatureRequirements, signatures: &SignatureSet) -> bool {
    requirements.required.iter().all(|role| signatures.has(*role))
}

pub fn evaluate_status(
    requirements: &SignatureRequirements,
    signatures: Option<&SignatureSet>,
    viewer_role: Option<SignerRole>,
) -> SignatureStatus {
    let Some(set) = signatures else {
        return SignatureStatus::Loading;
    };
    if is_fully_signed(requirements, set) {
        return SignatureStatus::Complete;
    }
    if let Some(role) = viewer_role {
        if evaluate_can_sign(requirements, signatures, role).allowed {
            return SignatureStatus::YourTurn;
        }
    }
    SignatureStatus::Pending(requirements.pending_message.to_string())
}
