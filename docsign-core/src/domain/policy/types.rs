//! Rich result types for signature policy evaluation (no logging in domain).

use crate::domain::{DocumentType, SignerRole};
use crate::foundation::SignatureError;

/// Static signature rules for one document type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureRequirements {
    pub document_type: DocumentType,
    pub required: &'static [SignerRole],
    pub optional: &'static [SignerRole],
    /// Roles that must sign in sequence; roles absent from the list are unconstrained.
    pub order: Option<&'static [SignerRole]>,
    pub pending_message: &'static str,
}

impl SignatureRequirements {
    pub fn is_required(&self, role: SignerRole) -> bool {
        self.required.contains(&role)
    }

    pub fn permits(&self, role: SignerRole) -> bool {
        self.required.contains(&role) || self.optional.contains(&role)
    }

    /// Required roles first, then optional ones, without duplicates.
    pub fn permitted_roles(&self) -> Vec<SignerRole> {
        let mut roles: Vec<SignerRole> = self.required.to_vec();
        for role in self.optional {
            if !roles.contains(role) {
                roles.push(*role);
            }
        }
        roles
    }

    /// Roles that must have signed before `role` may sign.
    pub fn predecessors(&self, role: SignerRole) -> &'static [SignerRole] {
        let Some(order) = self.order else {
            return &[];
        };
        match order.iter().position(|r| *r == role) {
            Some(index) => &order[..index],
            None => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignDenial {
    Loading,
    NotRequired,
    AlreadySigned,
    OutOfOrder { waiting_for: Vec<SignerRole> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePermission {
    pub role: SignerRole,
    pub allowed: bool,
    pub reason: Option<String>,
    pub denial: Option<SignDenial>,
}

impl SignaturePermission {
    pub fn allowed(role: SignerRole) -> Self {
        Self { role, allowed: true, reason: None, denial: None }
    }

    pub fn denied(role: SignerRole, denial: SignDenial, reason: impl Into<String>) -> Self {
        Self { role, allowed: false, reason: Some(reason.into()), denial: Some(denial) }
    }

    /// Convert a denial into the matching workflow error.
    pub fn enforce(&self, document_type: DocumentType) -> Result<(), SignatureError> {
        if self.allowed {
            return Ok(());
        }
        let role = self.role.to_string();
        match &self.denial {
            Some(SignDenial::Loading) => Err(SignatureError::SignaturesNotLoaded),
            Some(SignDenial::NotRequired) => {
                Err(SignatureError::NotPermittedForRole { role, document_type: document_type.to_string() })
            }
            Some(SignDenial::AlreadySigned) => Err(SignatureError::AlreadySigned { role }),
            Some(SignDenial::OutOfOrder { waiting_for }) => Err(SignatureError::OutOfOrder {
                role,
                waiting_for: waiting_for.iter().map(ToString::to_string).collect(),
                message: self.reason.clone().unwrap_or_default(),
            }),
            None => Err(SignatureError::Message("signature permission denied without a denial".to_string())),
        }
    }
}
