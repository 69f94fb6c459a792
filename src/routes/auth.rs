//! Auth routes: login, registration, logout and the session cookie.
//!
//! DESIGN
//! ======
//! The `userRole` cookie is the session slot. Each request wraps its cookie
//! jar in a `CookieSessionStore`, builds an `AuthContext` over it, runs one
//! operation, and writes the jar back into the response so any slot change
//! reaches the browser.

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::services::auth::{AuthContext, AuthError, Navigation};
use crate::services::backend::RegisterRequest;
use crate::services::session::{Role, SessionStore, User};
use crate::state::AppState;

pub const COOKIE_NAME: &str = "userRole";

// =============================================================================
// COOKIE SESSION STORE
// =============================================================================

fn session_cookie(value: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, value.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Session slot backed by the request's cookie jar.
#[derive(Debug, Clone)]
pub struct CookieSessionStore {
    jar: CookieJar,
    secure: bool,
}

impl CookieSessionStore {
    #[must_use]
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar, secure }
    }

    /// Jar carrying any cookie changes made through the store.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl SessionStore for CookieSessionStore {
    fn load(&self) -> Option<String> {
        self.jar
            .get(COOKIE_NAME)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty())
    }

    fn save(&mut self, role: Role) {
        let jar = std::mem::take(&mut self.jar);
        self.jar = jar.add(session_cookie(role.as_str(), self.secure));
    }

    fn clear(&mut self) {
        let mut cookie = session_cookie("", self.secure);
        cookie.set_max_age(Duration::ZERO);
        let jar = std::mem::take(&mut self.jar);
        self.jar = jar.add(cookie);
    }
}

/// Build the per-request auth context over the request's cookies.
pub(crate) fn context_for(state: &AppState, jar: CookieJar) -> AuthContext<CookieSessionStore> {
    AuthContext::new(state.auth.clone(), CookieSessionStore::new(jar, state.cookie_secure))
}

// =============================================================================
// ERRORS
// =============================================================================

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidCredentials | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
        AuthError::PasswordMismatch => StatusCode::BAD_REQUEST,
        AuthError::MissingSessionContext => StatusCode::INTERNAL_SERVER_ERROR,
        AuthError::Backend(_) => StatusCode::BAD_GATEWAY,
    }
}

pub(crate) fn auth_error_response(err: &AuthError) -> Response {
    let status = auth_error_to_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "auth request failed");
    }
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

// =============================================================================
// EXTRACTORS
// =============================================================================

/// Session restored by the route guard for the current navigation.
/// Only available on routes mounted behind the guard middleware.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: Option<User>,
}

impl AuthSession {
    /// # Errors
    ///
    /// `Unauthenticated` when the navigation carries no session.
    pub fn require_user(self) -> Result<User, AuthError> {
        self.user.ok_or(AuthError::Unauthenticated)
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| auth_error_response(&AuthError::MissingSessionContext))
    }
}

/// Logged-in user restored from the session cookie.
/// Use as a handler parameter to require authentication on API routes.
pub struct AuthUser {
    pub user: User,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let ctx = context_for(&app_state, jar);
        match ctx.user() {
            Some(user) => Ok(Self { user: user.clone() }),
            None => Err(auth_error_response(&AuthError::Unauthenticated)),
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Answer an auth operation with the user, the next path and the jar.
fn reply(ctx: AuthContext<CookieSessionStore>, result: Result<Navigation, AuthError>) -> Response {
    match result {
        Ok(nav) => {
            let body = serde_json::json!({ "user": ctx.user(), "redirect_to": nav.to });
            (ctx.into_store().into_jar(), Json(body)).into_response()
        }
        Err(e) => (ctx.into_store().into_jar(), auth_error_response(&e)).into_response(),
    }
}

/// `POST /api/auth/login`: check credentials, set the session cookie.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(body): Json<LoginRequest>) -> Response {
    let mut ctx = context_for(&state, jar);
    let result = ctx.login(&body.email, &body.password).await;
    reply(ctx, result)
}

/// `POST /api/auth/register`: create a user, set the session cookie.
pub async fn register(State(state): State<AppState>, jar: CookieJar, Json(body): Json<RegisterRequest>) -> Response {
    let mut ctx = context_for(&state, jar);
    let result = ctx.register(&body).await;
    reply(ctx, result)
}

/// `POST /api/auth/logout`: clear the session cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let mut ctx = context_for(&state, jar);
    let nav = ctx.logout();
    (ctx.into_store().into_jar(), Json(serde_json::json!({ "redirect_to": nav.to })))
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
