//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds no per-user data: identity lives in each browser's session
//! cookie and an `AuthContext` is rebuilt per request over it. The state
//! only carries the shared collaborators (auth backend and map provider)
//! plus a few settings.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, DEFAULT_TRANSCRIPTION_DELAY_MS};
use crate::map::{MapProvider, PlaceholderMap};
use crate::services::auth::AuthError;
use crate::services::backend::{AuthBackend, DemoBackend, HttpBackend};

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum, so all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthBackend>,
    pub map: Arc<dyn MapProvider>,
    /// Set the `Secure` attribute on the session cookie.
    pub cookie_secure: bool,
    /// How long voice-complaint transcription takes.
    pub transcription_delay: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthBackend>, map: Arc<dyn MapProvider>, cookie_secure: bool) -> Self {
        Self {
            auth,
            map,
            cookie_secure,
            transcription_delay: Duration::from_millis(DEFAULT_TRANSCRIPTION_DELAY_MS),
        }
    }

    #[must_use]
    pub fn with_transcription_delay(mut self, delay: Duration) -> Self {
        self.transcription_delay = delay;
        self
    }

    /// Wire collaborators from config. `AUTH_BACKEND_URL` selects the network
    /// backend; otherwise the demo credential table answers after
    /// `auth_delay`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Backend` if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AuthError> {
        let auth: Arc<dyn AuthBackend> = match &config.auth_backend_url {
            Some(url) => {
                tracing::info!(%url, "using remote auth backend");
                Arc::new(HttpBackend::new(url, config.auth_backend_timeout)?)
            }
            None => {
                tracing::info!(delay = ?config.auth_delay, "using demo auth backend");
                Arc::new(DemoBackend::new(config.auth_delay))
            }
        };
        let map = Arc::new(PlaceholderMap::new(config.here_api_key.clone()));
        Ok(Self::new(auth, map, config.cookie_secure).with_transcription_delay(config.transcription_delay))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
