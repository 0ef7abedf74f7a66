// --- File: crates/solarify_auth/src/routes.rs ---
use crate::handlers::{
    login_handler, logout_handler, me_handler, register_handler,
    set_notification_preference_handler, AuthState,
};
use crate::middleware::require_session;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use solarify_config::AppConfig;
use solarify_db::Repositories;
use std::sync::Arc;

/// Build the shared auth state. The backend reuses the same handle to guard
/// other routers with [`require_session`].
pub fn auth_state(config: Arc<AppConfig>, repos: Repositories) -> Arc<AuthState> {
    Arc::new(AuthState { config, repos })
}

/// Creates a router containing all routes for authentication.
///
/// `/auth/me` and `/auth/notification-preference` sit behind the session
/// middleware; the rest must stay reachable without a session.
pub fn routes(state: Arc<AuthState>) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(me_handler))
        .route(
            "/auth/notification-preference",
            put(set_notification_preference_handler),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .merge(protected)
        .with_state(state)
}
