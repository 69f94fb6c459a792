//! Route guard middleware.
//!
//! Restores the session from the request cookie, applies
//! `services::guard::decide`, and either redirects or hands the restored
//! session to the page handler as an `AuthSession` extension. The guard
//! steers navigation only; API routes do their own checks.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::auth::{AuthSession, context_for};
use crate::services::guard::{self, GuardDecision};
use crate::state::AppState;

pub async fn route_guard(State(state): State<AppState>, jar: CookieJar, mut req: Request, next: Next) -> Response {
    let ctx = context_for(&state, jar);
    let path = req.uri().path().to_owned();
    let decision = guard::decide(&path, ctx.session_role());
    let session = AuthSession { user: ctx.user().cloned() };
    let jar = ctx.into_store().into_jar();

    match decision {
        GuardDecision::Redirect(to) => {
            tracing::debug!(%path, %to, "guard redirect");
            (jar, Redirect::temporary(to)).into_response()
        }
        GuardDecision::Pass => {
            req.extensions_mut().insert(session);
            let response = next.run(req).await;
            (jar, response).into_response()
        }
    }
}
