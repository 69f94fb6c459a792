//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own identity, guard and dashboard logic so route handlers
//! can stay focused on cookie plumbing and status codes.

pub mod auth;
pub mod backend;
pub mod civic;
pub mod dashboard;
pub mod guard;
pub mod session;
