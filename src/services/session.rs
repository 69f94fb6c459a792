//! Session marker storage and the identity types it reconstructs.
//!
//! ARCHITECTURE
//! ============
//! A browser session is a single slot holding the role literal of the
//! logged-in user. Everything else about the user is rebuilt from that role
//! on restore, so the slot is the only durable piece of identity.
//!
//! TRADE-OFFS
//! ==========
//! Restoring from the role alone loses the name a registered user signed up
//! with. Restore always yields the demo account profile for the role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Avatar reference assigned to every user.
pub const DEFAULT_AVATAR: &str = "/placeholder.svg?height=40&width=40";

// =============================================================================
// ROLE
// =============================================================================

/// Role of an authenticated user. Determines visible navigation and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Officer,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Citizen, Role::Officer, Role::Admin];

    /// Literal written into the session slot.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Officer => "officer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "citizen" => Ok(Self::Citizen),
            "officer" => Ok(Self::Officer),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

// =============================================================================
// USER
// =============================================================================

/// Identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Demo account profile for a role: `(id, display name)`.
#[must_use]
pub fn demo_profile(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Citizen => ("c123", "John Citizen"),
        Role::Officer => ("o456", "Officer Smith"),
        Role::Admin => ("a789", "Admin Kumar"),
    }
}

/// Rebuild a user from a persisted role. Only the role survives a restore;
/// the rest is the demo profile for that role.
#[must_use]
pub fn restore_user(role: Role) -> User {
    let (id, name) = demo_profile(role);
    User {
        id: id.to_owned(),
        name: name.to_owned(),
        email: format!("{role}@example.com"),
        role,
        avatar: Some(DEFAULT_AVATAR.to_owned()),
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Single persisted slot holding the session marker.
pub trait SessionStore {
    /// Raw persisted value, if any.
    fn load(&self) -> Option<String>;
    fn save(&mut self, role: Role);
    fn clear(&mut self);
}

/// In-process slot. Used by tests and by callers embedding an `AuthContext`
/// without an HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Option<String>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary raw value already persisted.
    #[must_use]
    pub fn with_raw(value: impl Into<String>) -> Self {
        Self { slot: Some(value.into()) }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<String> {
        self.slot.clone()
    }

    fn save(&mut self, role: Role) {
        self.slot = Some(role.as_str().to_owned());
    }

    fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
