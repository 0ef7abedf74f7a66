// --- File: crates/solarify_auth/src/logic_test.rs ---
use crate::logic::{
    build_session_cookie, cookie_name, generate_session_token, hash_password, session_ttl,
    validate_registration, verify_password, RegisterRequest, DEFAULT_COOKIE_NAME,
};
use solarify_config::{AppConfig, DatabaseConfig, ServerConfig, SessionConfig};

fn base_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: None,
        },
        use_gcal: false,
        use_smtp: false,
        gcal: None,
        smtp: None,
        session: None,
    }
}

fn register_request(username: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: None,
        notification_preference: None,
    }
}

#[test]
fn test_password_hash_round_trip() {
    let hash = hash_password("correct-horse-battery").unwrap();

    assert!(verify_password("correct-horse-battery", &hash).unwrap());
    assert!(!verify_password("wrong-password", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_password("correct-horse-battery").unwrap();
    let second = hash_password("correct-horse-battery").unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_session_token_shape() {
    let token = generate_session_token();

    // 32 bytes, hex encoded
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_session_tokens_are_unique() {
    assert_ne!(generate_session_token(), generate_session_token());
}

#[test]
fn test_cookie_defaults() {
    let config = base_config();

    assert_eq!(cookie_name(&config), DEFAULT_COOKIE_NAME);
    assert_eq!(session_ttl(&config).num_days(), 7);
}

#[test]
fn test_cookie_overrides_from_config() {
    let mut config = base_config();
    config.session = Some(SessionConfig {
        cookie_name: Some("crm_session".to_string()),
        ttl_minutes: Some(60),
    });

    assert_eq!(cookie_name(&config), "crm_session");
    assert_eq!(session_ttl(&config).num_minutes(), 60);
}

#[test]
fn test_session_cookie_attributes() {
    let cookie = build_session_cookie("solarify_session", "abc123");

    assert_eq!(cookie.name(), "solarify_session");
    assert_eq!(cookie.value(), "abc123");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
}

#[test]
fn test_registration_validation() {
    assert!(validate_registration(&register_request("ops", "ops@example.com", "longenough")).is_ok());
    assert!(validate_registration(&register_request("", "ops@example.com", "longenough")).is_err());
    assert!(validate_registration(&register_request("ab", "ops@example.com", "longenough")).is_err());
    assert!(validate_registration(&register_request("ops", "not-an-email", "longenough")).is_err());
    assert!(validate_registration(&register_request("ops", "ops@example.com", "short")).is_err());
}
