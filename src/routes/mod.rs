//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page routes (public and dashboard) run behind the route guard
//! middleware. The JSON API under `/api` checks the session cookie itself
//! and is never redirected.
//!
//! The guard wraps the page router's fallback as well as its routes, so a
//! navigation to an unknown dashboard path is redirected like any other
//! guarded page before it can 404.

pub mod auth;
pub mod guard;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Guarded page routes. Unmatched paths land on the guarded fallback.
fn page_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(pages::landing))
        .route("/login", get(pages::login_page))
        .route("/register", get(pages::register_page))
        .route("/forgot-password", get(pages::forgot_password_page))
        .route("/dashboard", get(pages::overview))
        .route("/dashboard/complaint-status", get(pages::complaint_status))
        .route("/dashboard/emergency", get(pages::emergency))
        .route("/dashboard/waste-pickup", get(pages::waste_pickup))
        .route("/dashboard/guardian-tracking", get(pages::guardian_tracking))
        .route("/dashboard/heatmap", get(pages::heatmap))
        .route("/dashboard/grievance", get(pages::grievance))
        .route("/dashboard/voice-complaint", get(pages::voice_complaint))
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(state, guard::route_guard))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/emergency/sos", post(pages::sos))
        .route("/api/grievances", post(pages::submit_grievance))
        .route("/api/voice-complaints", post(pages::submit_voice_complaint))
        .route("/api/voice-complaints/transcribe", post(pages::transcribe_voice))
        .route("/healthz", get(healthz))
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(page_routes(state.clone()))
        .merge(api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
