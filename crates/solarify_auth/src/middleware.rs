// --- File: crates/solarify_auth/src/middleware.rs ---
use crate::handlers::AuthState;
use crate::logic;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use solarify_common::{auth_error, SolarifyError};
use solarify_db::models::UserRole;
use solarify_db::repositories::{SessionRepository, UserRepository};
use std::sync::Arc;

/// Authenticated user attached to the request extensions by
/// [`require_session`]. Handlers behind the middleware can rely on it
/// being present.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}

/// Middleware that rejects requests without a valid session cookie.
///
/// On success the resolved [`CurrentUser`] is inserted into the request
/// extensions. The session token itself is never logged.
pub async fn require_session(
    State(state): State<Arc<AuthState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, SolarifyError> {
    let name = logic::cookie_name(&state.config);
    let token = jar
        .get(name)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| auth_error("authentication required"))?;

    let session = state
        .repos
        .sessions
        .find_valid(&token, Utc::now())
        .await?
        .ok_or_else(|| auth_error("session is invalid or expired"))?;

    let user = state
        .repos
        .users
        .find_by_id(session.user_id)
        .await?
        .ok_or_else(|| auth_error("session user no longer exists"))?;

    request.extensions_mut().insert(CurrentUser {
        user_id: user.id,
        username: user.username,
        role: user.role,
    });

    Ok(next.run(request).await)
}
