use super::*;

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_true_variants() {
    for val in ["1", "true", "yes", "on", "TRUE", " On "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
}

#[test]
fn parse_bool_false_variants() {
    for val in ["0", "false", "no", "off", "False"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_invalid_returns_none() {
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}

// =============================================================================
// env_bool
// =============================================================================

#[test]
fn env_bool_unset_is_none() {
    assert_eq!(env_bool("__TEST_CFG_BOOL_UNSET_70__"), None);
}

#[test]
fn env_bool_unrecognized_is_none() {
    let key = "__TEST_CFG_BOOL_BAD_74__";
    unsafe { std::env::set_var(key, "sometimes") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_reads_value() {
    let key = "__TEST_CFG_BOOL_SET_75__";
    unsafe { std::env::set_var(key, "yes") };
    assert_eq!(env_bool(key), Some(true));
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// env_parse (unique env var names per test)
// =============================================================================

#[test]
fn env_parse_unset_returns_default() {
    assert_eq!(env_parse("__TEST_CFG_SURELY_UNSET_71__", 42_u16).unwrap(), 42);
}

#[test]
fn env_parse_reads_trimmed_value() {
    let key = "__TEST_CFG_PARSE_72__";
    unsafe { std::env::set_var(key, " 8080 ") };
    assert_eq!(env_parse(key, 0_u16).unwrap(), 8080);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_malformed_is_an_error() {
    let key = "__TEST_CFG_BAD_73__";
    unsafe { std::env::set_var(key, "eighty") };
    let err = env_parse(key, 0_u16).unwrap_err();
    assert!(err.to_string().contains("eighty"));
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// defaults
// =============================================================================

#[test]
fn default_config_uses_demo_backend() {
    let config = AppConfig::default();
    assert_eq!(config.port, 3000);
    assert_eq!(config.auth_delay, Duration::from_millis(1000));
    assert!(config.auth_backend_url.is_none());
    assert!(!config.cookie_secure);
    assert_eq!(config.here_api_key, PLACEHOLDER_HERE_API_KEY);
    assert_eq!(config.transcription_delay, Duration::from_secs(2));
}
