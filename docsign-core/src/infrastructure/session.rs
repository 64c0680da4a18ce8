//! Authenticated user lookup.

use crate::foundation::UserId;
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub email: Option<String>,
}

impl AuthSession {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self { user_id: user_id.into(), email: None }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The signed-in user, or `None` when nobody is authenticated.
    async fn current_session(&self) -> Option<AuthSession>;
}

/// Fixed session, used by the admin tool where the operator is the signer.
pub struct StaticSessionProvider {
    session: Option<AuthSession>,
}

impl StaticSessionProvider {
    pub fn signed_in(session: AuthSession) -> Self {
        Self { session: Some(session) }
    }

    pub fn anonymous() -> Self {
        Self { session: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_session(&self) -> Option<AuthSession> {
        self.session.clone()
    }
}

/// Session that can change while a coordinator is alive (sign-out mid-session).
#[derive(Default)]
pub struct SharedSessionProvider {
    session: RwLock<Option<AuthSession>>,
}

impl SharedSessionProvider {
    pub fn new(session: Option<AuthSession>) -> Self {
        Self { session: RwLock::new(session) }
    }

    pub fn sign_in(&self, session: AuthSession) {
        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session);
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.session.write() {
            *guard = None;
        }
    }
}

#[async_trait]
impl SessionProvider for SharedSessionProvider {
    async fn current_session(&self) -> Option<AuthSession> {
        self.session.read().ok().and_then(|guard| guard.clone())
    }
}
