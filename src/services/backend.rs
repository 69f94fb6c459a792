//! Authentication backends.
//!
//! DESIGN
//! ======
//! `AuthContext` talks to identity providers only through `AuthBackend`.
//! `DemoBackend` answers from the fixed credential table after an artificial
//! delay standing in for network latency; `HttpBackend` forwards the same two
//! calls to a remote service.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::AuthError;
use super::session::{DEFAULT_AVATAR, Role, User, demo_profile};

// =============================================================================
// CREDENTIAL TABLE
// =============================================================================

/// One demo login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credential {
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
}

pub const CREDENTIALS: [Credential; 3] = [
    Credential { email: "citizen@example.com", password: "password", role: Role::Citizen },
    Credential { email: "officer@example.com", password: "password", role: Role::Officer },
    Credential { email: "admin@example.com", password: "password", role: Role::Admin },
];

/// Exact-match lookup. No trimming or case folding.
#[must_use]
pub fn match_credentials(email: &str, password: &str) -> Option<Credential> {
    CREDENTIALS
        .iter()
        .find(|c| c.email == email && c.password == password)
        .copied()
}

impl Credential {
    fn to_user(self) -> User {
        let (id, name) = demo_profile(self.role);
        User {
            id: id.to_owned(),
            name: name.to_owned(),
            email: self.email.to_owned(),
            role: self.role,
            avatar: Some(DEFAULT_AVATAR.to_owned()),
        }
    }
}

// =============================================================================
// REGISTRATION INPUT
// =============================================================================

/// Registration form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub user_type: Role,
    #[serde(default)]
    pub phone_number: String,
}

// =============================================================================
// BACKEND TRAIT
// =============================================================================

#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    /// Resolve a login to a user, or `AuthError::InvalidCredentials`.
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Create a user from an already-validated registration.
    async fn register(&self, request: &RegisterRequest) -> Result<User, AuthError>;
}

// =============================================================================
// DEMO BACKEND
// =============================================================================

pub const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(1000);

/// Credential-table backend with a fixed artificial delay per call.
#[derive(Debug, Clone)]
pub struct DemoBackend {
    delay: Duration,
}

impl DemoBackend {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No delay; for tests.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_DELAY)
    }
}

#[async_trait::async_trait]
impl AuthBackend for DemoBackend {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_latency().await;
        match_credentials(email, password)
            .map(Credential::to_user)
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, AuthError> {
        self.simulate_latency().await;
        Ok(User {
            id: Uuid::new_v4().to_string(),
            name: request.name.clone(),
            email: request.email.clone(),
            role: request.user_type,
            avatar: Some(DEFAULT_AVATAR.to_owned()),
        })
    }
}

// =============================================================================
// HTTP BACKEND
// =============================================================================

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Remote identity service reached over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Backend(e.to_string()))?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_for_user<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<User, AuthError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::Backend(format!("{status}: {body}")));
        }

        resp.json::<User>()
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AuthBackend for HttpBackend {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.post_for_user("/auth/login", &LoginBody { email, password })
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, AuthError> {
        self.post_for_user("/auth/register", request).await
    }
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
