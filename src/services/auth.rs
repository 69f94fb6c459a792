//! Auth context: the single authority on who is logged in for one browser.
//!
//! ARCHITECTURE
//! ============
//! `AuthContext` owns a `SessionStore` slot and shares an `AuthBackend`.
//! Every operation takes `&mut self`, so calls against one context are
//! serialized by the borrow checker rather than racing on the user record.
//!
//! STATE MACHINE
//! =============
//! `Unauthenticated --login/register ok--> Authenticated(role)`
//! `Authenticated --logout--> Unauthenticated`
//! `any --restore with persisted role--> Authenticated(role)`
//! `Loading` is only observable while a backend call is in flight.

use std::sync::Arc;

use super::backend::{AuthBackend, RegisterRequest};
use super::guard::{DASHBOARD_PATH, LOGIN_PATH};
use super::session::{Role, SessionStore, User, restore_user};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("not logged in")]
    Unauthenticated,
    #[error("auth session used outside the route guard")]
    MissingSessionContext,
    #[error("auth backend error: {0}")]
    Backend(String),
}

// =============================================================================
// PHASE + NAVIGATION
// =============================================================================

/// Where the context stands. Operations run under `&mut self`, so a caller
/// holding the context only ever sees a settled phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Unauthenticated,
    /// Set for the duration of a backend call inside `login`, `register`
    /// or `restore_session`. Internal only: cleared before the operation
    /// returns, whether it succeeds or fails.
    Loading,
    Authenticated(Role),
}

/// Where the caller should send the browser after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub to: &'static str,
}

impl Navigation {
    pub const DASHBOARD: Self = Self { to: DASHBOARD_PATH };
    pub const LOGIN: Self = Self { to: LOGIN_PATH };
}

// =============================================================================
// CONTEXT
// =============================================================================

pub struct AuthContext<S> {
    backend: Arc<dyn AuthBackend>,
    store: S,
    user: Option<User>,
    loading: bool,
}

impl<S: SessionStore> AuthContext<S> {
    /// Build a context and immediately restore any persisted session.
    pub fn new(backend: Arc<dyn AuthBackend>, store: S) -> Self {
        let mut ctx = Self { backend, store, user: None, loading: true };
        ctx.restore_session();
        ctx
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// False whenever the caller can ask; see `AuthPhase::Loading`.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Settled phase: `Unauthenticated` or `Authenticated`. `Loading` is
    /// only reported from inside an operation.
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            return AuthPhase::Loading;
        }
        match &self.user {
            Some(user) => AuthPhase::Authenticated(user.role),
            None => AuthPhase::Unauthenticated,
        }
    }

    /// Persisted role, if the slot holds a valid one.
    #[must_use]
    pub fn session_role(&self) -> Option<Role> {
        self.store.load().and_then(|raw| raw.parse().ok())
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the slot back, e.g. to write it into a response.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Re-read the session slot. An unparseable value is dropped from the
    /// slot and treated as logged out.
    pub fn restore_session(&mut self) {
        self.loading = true;
        self.user = match self.store.load() {
            None => None,
            Some(raw) => match raw.parse::<Role>() {
                Ok(role) => Some(restore_user(role)),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unrecognized session marker");
                    self.store.clear();
                    None
                }
            },
        };
        self.loading = false;
    }

    /// Log in against the backend. The session slot is untouched on failure.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when the pair is unknown, `Backend` when the
    /// backend itself fails.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Navigation, AuthError> {
        self.loading = true;
        let result = self.backend.authenticate(email, password).await;
        self.loading = false;

        let user = result.inspect_err(|e| tracing::info!(%email, error = %e, "login rejected"))?;
        tracing::info!(%email, role = %user.role, "login succeeded");
        self.establish(user);
        Ok(Navigation::DASHBOARD)
    }

    /// Clear the user and the session slot. Idempotent.
    pub fn logout(&mut self) -> Navigation {
        if let Some(user) = self.user.take() {
            tracing::info!(email = %user.email, "logout");
        }
        self.store.clear();
        Navigation::LOGIN
    }

    /// Register a new user. Only the password confirmation is validated.
    ///
    /// # Errors
    ///
    /// `PasswordMismatch` before any backend call or slot write, `Backend`
    /// when the backend fails.
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<Navigation, AuthError> {
        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        self.loading = true;
        let result = self.backend.register(request).await;
        self.loading = false;

        let user = result?;
        tracing::info!(email = %user.email, role = %user.role, "registered");
        self.establish(user);
        Ok(Navigation::DASHBOARD)
    }

    fn establish(&mut self, user: User) {
        self.store.save(user.role);
        self.user = Some(user);
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
