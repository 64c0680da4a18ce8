use crate::domain::SignerRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub image_url: String,
    pub created_at_nanos: u64,
}

/// Known signatures of one document instance, keyed by role.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureSet {
    entries: BTreeMap<SignerRole, SignatureEntry>,
}

impl SignatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: SignerRole) -> Option<&SignatureEntry> {
        self.entries.get(&role)
    }

    pub fn url(&self, role: SignerRole) -> Option<&str> {
        self.entries.get(&role).map(|entry| entry.image_url.as_str())
    }

    pub fn has(&self, role: SignerRole) -> bool {
        self.entries.contains_key(&role)
    }

    /// Record `entry` for `role`; an older entry never replaces a newer one.
    pub fn record(&mut self, role: SignerRole, entry: SignatureEntry) -> bool {
        match self.entries.get(&role) {
            Some(existing) if existing.created_at_nanos > entry.created_at_nanos => false,
            _ => {
                self.entries.insert(role, entry);
                true
            }
        }
    }

    pub fn remove(&mut self, role: SignerRole) -> Option<SignatureEntry> {
        self.entries.remove(&role)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn roles(&self) -> impl Iterator<Item = SignerRole> + '_ {
        self.entries.keys().copied()
    }

    pub fn snapshot(&self) -> SignatureSnapshot {
        let url = |role| self.url(role).map(str::to_string);
        SignatureSnapshot {
            participant: url(SignerRole::Participant),
            representative: url(SignerRole::Representative),
            trainer: url(SignerRole::Trainer),
            company_seal: url(SignerRole::CompanySeal),
            organization_seal: url(SignerRole::OrganizationSeal),
        }
    }
}

/// Renderer-facing view: one optional image URL per role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSnapshot {
    pub participant: Option<String>,
    pub representative: Option<String>,
    pub trainer: Option<String>,
    pub company_seal: Option<String>,
    pub organization_seal: Option<String>,
}

impl SignatureSnapshot {
    pub fn get(&self, role: SignerRole) -> Option<&str> {
        let slot = match role {
            SignerRole::Participant => &self.participant,
            SignerRole::Representative => &self.representative,
            SignerRole::Trainer => &self.trainer,
            SignerRole::CompanySeal => &self.company_seal,
            SignerRole::OrganizationSeal => &self.organization_seal,
        };
        slot.as_deref()
    }

    pub fn slots(&self) -> impl Iterator<Item = (SignerRole, Option<&str>)> + '_ {
        SignerRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}
