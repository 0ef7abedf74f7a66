// --- File: crates/solarify_auth/src/handlers.rs ---
use crate::logic::{
    self, LoginRequest, LogoutResponse, PreferenceRequest, RegisterRequest,
};
use crate::middleware::CurrentUser;
use axum::{extract::State, response::Json, Extension};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Utc;
use solarify_common::{auth_error, not_found, SolarifyError};
use solarify_config::AppConfig;
use solarify_db::models::{NewUser, NotificationPreference, User, UserRole};
use solarify_db::repositories::{SessionRepository, UserRepository};
use solarify_db::Repositories;
use std::sync::Arc;
use tracing::info;

// Shared state for the auth handlers and the session middleware
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AppConfig>,
    pub repos: Repositories,
}

/// Handler to register a new staff user.
#[axum::debug_handler]
pub async fn register_handler(
    State(state): State<Arc<AuthState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<User>, SolarifyError> {
    logic::validate_registration(&payload)?;

    let password_hash = logic::hash_password(&payload.password)?;
    let user = state
        .repos
        .users
        .create(NewUser {
            username: payload.username,
            email: payload.email,
            password_hash,
            role: payload.role.unwrap_or(UserRole::Staff),
            notification_preference: payload
                .notification_preference
                .unwrap_or(NotificationPreference::InApp),
        })
        .await?;

    info!("Registered user {}", user.username);
    Ok(Json(user))
}

/// Handler to log in and receive a session cookie.
#[axum::debug_handler]
pub async fn login_handler(
    State(state): State<Arc<AuthState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<User>), SolarifyError> {
    let user = state
        .repos
        .users
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(|| auth_error("invalid username or password"))?;

    if !logic::verify_password(&payload.password, &user.password_hash)? {
        return Err(auth_error("invalid username or password"));
    }

    let token = logic::generate_session_token();
    let expires_at = Utc::now() + logic::session_ttl(&state.config);
    state
        .repos
        .sessions
        .create(&token, user.id, expires_at)
        .await?;

    let name = logic::cookie_name(&state.config);
    let jar = jar.add(logic::build_session_cookie(name, &token));

    info!("User {} logged in", user.username);
    Ok((jar, Json(user)))
}

/// Handler to log out and invalidate the session.
#[axum::debug_handler]
pub async fn logout_handler(
    State(state): State<Arc<AuthState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>), SolarifyError> {
    let name = logic::cookie_name(&state.config);
    if let Some(cookie) = jar.get(name) {
        state.repos.sessions.delete(cookie.value()).await?;
    }
    let jar = jar.remove(Cookie::from(name.to_string()));

    Ok((
        jar,
        Json(LogoutResponse {
            success: true,
            message: "Logged out.".to_string(),
        }),
    ))
}

/// Handler to return the currently authenticated user.
#[axum::debug_handler]
pub async fn me_handler(
    State(state): State<Arc<AuthState>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<User>, SolarifyError> {
    let user = state
        .repos
        .users
        .find_by_id(current.user_id)
        .await?
        .ok_or_else(|| not_found("user no longer exists"))?;

    Ok(Json(user))
}

/// Handler to change how stock alerts reach the current user.
#[axum::debug_handler]
pub async fn set_notification_preference_handler(
    State(state): State<Arc<AuthState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<PreferenceRequest>,
) -> Result<Json<User>, SolarifyError> {
    let user = state
        .repos
        .users
        .set_notification_preference(current.user_id, payload.notification_preference)
        .await?
        .ok_or_else(|| not_found("user no longer exists"))?;

    Ok(Json(user))
}
