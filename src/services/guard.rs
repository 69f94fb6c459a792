//! Route guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Applied to every page navigation by `routes::guard`. The decision is
//! advisory UI routing only; it is not an access-control boundary.

use super::session::Role;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const FORGOT_PASSWORD_PATH: &str = "/forgot-password";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// API requests check the session cookie themselves and are never redirected.
pub const API_PREFIX: &str = "/api/";

/// Paths reachable without a session.
pub const PUBLIC_PATHS: [&str; 4] = [ROOT_PATH, LOGIN_PATH, REGISTER_PATH, FORGOT_PASSWORD_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(&'static str),
}

#[must_use]
pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

#[must_use]
pub fn is_api(path: &str) -> bool {
    path.starts_with(API_PREFIX)
}

/// Decide what to do with a navigation to `path` given the persisted role.
#[must_use]
pub fn decide(path: &str, session: Option<Role>) -> GuardDecision {
    if is_api(path) {
        return GuardDecision::Pass;
    }
    match session {
        None if !is_public(path) => GuardDecision::Redirect(LOGIN_PATH),
        Some(_) if path == LOGIN_PATH || path == REGISTER_PATH => GuardDecision::Redirect(DASHBOARD_PATH),
        _ => GuardDecision::Pass,
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
