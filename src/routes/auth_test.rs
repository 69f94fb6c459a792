use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use serde_json::json;

use super::*;
use crate::routes::app;
use crate::routes::test_helpers::{get as get_req, post_json, send};
use crate::services::session::MemorySessionStore;
use crate::state::test_helpers::{test_app_state, test_app_state_with_auth};

fn router() -> Router {
    app(test_app_state())
}

fn register_body(password: &str, confirm: &str) -> serde_json::Value {
    json!({
        "name": "Priya Patel",
        "email": "priya@example.com",
        "password": password,
        "confirmPassword": confirm,
        "userType": "officer",
        "phoneNumber": "+91 90000 00000",
    })
}

// =============================================================================
// auth_error_to_status
// =============================================================================

#[test]
fn auth_error_status_mapping() {
    assert_eq!(auth_error_to_status(&AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED);
    assert_eq!(auth_error_to_status(&AuthError::Unauthenticated), StatusCode::UNAUTHORIZED);
    assert_eq!(auth_error_to_status(&AuthError::PasswordMismatch), StatusCode::BAD_REQUEST);
    assert_eq!(auth_error_to_status(&AuthError::MissingSessionContext), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(auth_error_to_status(&AuthError::Backend("down".into())), StatusCode::BAD_GATEWAY);
}

// =============================================================================
// CookieSessionStore
// =============================================================================

#[test]
fn cookie_store_round_trip() {
    let mut store = CookieSessionStore::new(CookieJar::new(), false);
    assert_eq!(store.load(), None);
    store.save(Role::Officer);
    assert_eq!(store.load().as_deref(), Some("officer"));
    store.clear();
    assert_eq!(store.load(), None);
}

#[test]
fn cookie_store_sets_secure_flag_when_configured() {
    let mut store = CookieSessionStore::new(CookieJar::new(), true);
    store.save(Role::Admin);
    let jar = store.into_jar();
    let cookie = jar.get(COOKIE_NAME).unwrap();
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
}

#[test]
fn memory_and_cookie_stores_agree_on_restore() {
    let state = test_app_state();
    let mut jar_store = CookieSessionStore::new(CookieJar::new(), false);
    jar_store.save(Role::Citizen);
    let from_cookie = AuthContext::new(state.auth.clone(), jar_store);
    let from_memory = AuthContext::new(state.auth.clone(), MemorySessionStore::with_raw("citizen"));
    assert_eq!(from_cookie.user(), from_memory.user());
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_sets_role_cookie_and_redirects_to_dashboard() {
    let body = json!({ "email": "citizen@example.com", "password": "password" });
    let resp = send(router(), post_json("/api/auth/login", &body, None)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["redirect_to"], "/dashboard");
    assert_eq!(resp.body["user"]["id"], "c123");
    assert_eq!(resp.body["user"]["name"], "John Citizen");
    let cookie = resp.session_cookie().unwrap();
    assert!(cookie.starts_with("userRole=citizen"), "{cookie}");
    assert!(cookie.contains("HttpOnly"), "{cookie}");
}

#[tokio::test]
async fn bad_login_is_unauthorized_without_cookie() {
    let body = json!({ "email": "citizen@example.com", "password": "Password" });
    let resp = send(router(), post_json("/api/auth/login", &body, None)).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "invalid credentials");
    assert!(resp.session_cookie().is_none());
}

#[tokio::test]
async fn bad_login_keeps_existing_session_cookie() {
    let body = json!({ "email": "nobody@example.com", "password": "password" });
    let resp = send(router(), post_json("/api/auth/login", &body, Some("admin"))).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert!(resp.session_cookie().is_none());
}

#[tokio::test]
async fn backend_failure_maps_to_bad_gateway() {
    struct DownBackend;

    #[async_trait::async_trait]
    impl crate::services::backend::AuthBackend for DownBackend {
        async fn authenticate(&self, _email: &str, _password: &str) -> Result<User, AuthError> {
            Err(AuthError::Backend("connection refused".into()))
        }

        async fn register(&self, _request: &RegisterRequest) -> Result<User, AuthError> {
            Err(AuthError::Backend("connection refused".into()))
        }
    }

    let router = app(test_app_state_with_auth(Arc::new(DownBackend)));
    let body = json!({ "email": "citizen@example.com", "password": "password" });
    let resp = send(router, post_json("/api/auth/login", &body, None)).await;
    assert_eq!(resp.status, StatusCode::BAD_GATEWAY);
}

// =============================================================================
// register
// =============================================================================

#[tokio::test]
async fn register_sets_cookie_for_requested_role() {
    let resp = send(router(), post_json("/api/auth/register", &register_body("s3cret", "s3cret"), None)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["redirect_to"], "/dashboard");
    assert_eq!(resp.body["user"]["name"], "Priya Patel");
    assert_eq!(resp.body["user"]["role"], "officer");
    assert!(resp.session_cookie().unwrap().starts_with("userRole=officer"));
}

#[tokio::test]
async fn register_password_mismatch_is_bad_request_without_cookie() {
    let resp = send(router(), post_json("/api/auth/register", &register_body("one", "two"), None)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "passwords do not match");
    assert!(resp.session_cookie().is_none());
}

// =============================================================================
// logout / me
// =============================================================================

#[tokio::test]
async fn logout_clears_cookie_and_points_to_login() {
    let resp = send(router(), post_json("/api/auth/logout", &json!({}), Some("officer"))).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["redirect_to"], "/login");
    assert!(resp.session_cookie().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn logout_without_session_still_succeeds() {
    let resp = send(router(), post_json("/api/auth/logout", &json!({}), None)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["redirect_to"], "/login");
}

#[tokio::test]
async fn me_restores_demo_profile_from_cookie() {
    let resp = send(router(), get_req("/api/auth/me", Some("officer"))).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["id"], "o456");
    assert_eq!(resp.body["email"], "officer@example.com");
}

#[tokio::test]
async fn me_without_session_is_unauthorized() {
    let resp = send(router(), get_req("/api/auth/me", None)).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["error"], "not logged in");
}

// =============================================================================
// AuthSession outside the guard
// =============================================================================

#[tokio::test]
async fn auth_session_outside_guard_is_server_error() {
    async fn orphan(session: AuthSession) -> String {
        format!("{:?}", session.user)
    }

    let router = Router::new().route("/orphan", get(orphan));
    let resp = send(router, get_req("/orphan", Some("citizen"))).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body["error"], "auth session used outside the route guard");
}
