use super::*;

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_parses_every_literal() {
    for role in Role::ALL {
        assert_eq!(role.as_str().parse::<Role>(), Ok(role));
    }
}

#[test]
fn role_rejects_unknown_literal() {
    assert_eq!("superuser".parse::<Role>(), Err(UnknownRole("superuser".into())));
}

#[test]
fn role_parse_is_case_sensitive() {
    assert!("Admin".parse::<Role>().is_err());
    assert!("".parse::<Role>().is_err());
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Role::Officer).unwrap(), "officer");
    let role: Role = serde_json::from_str("\"citizen\"").unwrap();
    assert_eq!(role, Role::Citizen);
}

// =============================================================================
// restore_user
// =============================================================================

#[test]
fn restore_officer_uses_fixed_profile() {
    let user = restore_user(Role::Officer);
    assert_eq!(user.role, Role::Officer);
    assert_eq!(user.name, "Officer Smith");
    assert_eq!(user.email, "officer@example.com");
    assert_eq!(user.id, "o456");
}

#[test]
fn restore_is_deterministic() {
    for role in Role::ALL {
        assert_eq!(restore_user(role), restore_user(role));
    }
}

#[test]
fn restore_sets_default_avatar() {
    let user = restore_user(Role::Admin);
    assert_eq!(user.avatar.as_deref(), Some(DEFAULT_AVATAR));
}

#[test]
fn user_serialize_skips_missing_avatar() {
    let user = User {
        id: "x".into(),
        name: "Eve".into(),
        email: "eve@example.com".into(),
        role: Role::Citizen,
        avatar: None,
    };
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("avatar").is_none());
    assert_eq!(json["role"], "citizen");
}

// =============================================================================
// MemorySessionStore
// =============================================================================

#[test]
fn memory_store_starts_empty() {
    assert_eq!(MemorySessionStore::new().load(), None);
}

#[test]
fn memory_store_save_then_clear() {
    let mut store = MemorySessionStore::new();
    store.save(Role::Admin);
    assert_eq!(store.load().as_deref(), Some("admin"));
    store.clear();
    assert_eq!(store.load(), None);
}

#[test]
fn memory_store_with_raw_keeps_value_verbatim() {
    let store = MemorySessionStore::with_raw("garbage");
    assert_eq!(store.load().as_deref(), Some("garbage"));
}
