// --- File: crates/solarify_auth/src/logic.rs ---
use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Duration;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use solarify_common::{validation_error, SolarifyError};
use solarify_config::AppConfig;
use solarify_db::models::{NotificationPreference, UserRole};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Cookie name used when the config does not override it.
pub const DEFAULT_COOKIE_NAME: &str = "solarify_session";
/// Session lifetime used when the config does not override it (7 days).
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 7 * 24 * 60;

const SESSION_TOKEN_BYTES: usize = 32;
const MIN_USERNAME_LENGTH: usize = 3;
const MIN_PASSWORD_LENGTH: usize = 8;

// --- Data Structures ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RegisterRequest {
    #[cfg_attr(feature = "openapi", schema(example = "ops"))]
    pub username: String,
    #[cfg_attr(feature = "openapi", schema(example = "ops@solarify.example"))]
    pub email: String,
    pub password: String,
    /// Defaults to `staff` when omitted.
    pub role: Option<UserRole>,
    /// Defaults to `in_app` when omitted.
    pub notification_preference: Option<NotificationPreference>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PreferenceRequest {
    pub notification_preference: NotificationPreference,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

// --- Password Hashing ---

/// Hash a plaintext password with Argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, SolarifyError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SolarifyError::InternalError(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored Argon2 hash.
///
/// A mismatch is `Ok(false)`; only an unparseable hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, SolarifyError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| SolarifyError::InternalError(format!("stored hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

// --- Session Tokens ---

/// Generate an opaque session token: 32 random bytes, hex encoded.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn cookie_name(config: &AppConfig) -> &str {
    config
        .session
        .as_ref()
        .and_then(|s| s.cookie_name.as_deref())
        .unwrap_or(DEFAULT_COOKIE_NAME)
}

pub fn session_ttl(config: &AppConfig) -> Duration {
    let minutes = config
        .session
        .as_ref()
        .and_then(|s| s.ttl_minutes)
        .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);
    Duration::minutes(minutes)
}

/// Build the session cookie. HttpOnly keeps the token away from scripts;
/// SameSite=Lax lets the browser send it on top-level navigations. Expiry
/// is enforced server side, so the cookie itself carries no max-age.
pub fn build_session_cookie(name: &str, token: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_string(), token.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

// --- Validation ---

pub fn validate_registration(request: &RegisterRequest) -> Result<(), SolarifyError> {
    if request.username.trim().len() < MIN_USERNAME_LENGTH {
        return Err(validation_error(format!(
            "username must be at least {MIN_USERNAME_LENGTH} characters"
        )));
    }
    if !request.email.contains('@') {
        return Err(validation_error("email address is not valid"));
    }
    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(validation_error(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
