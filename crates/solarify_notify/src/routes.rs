// --- File: crates/solarify_notify/src/routes.rs ---
use crate::alerts::AlertStore;
use crate::handlers::{list_notifications_handler, mark_read_handler, NotifyState};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Notification routes. The backend mounts these behind the session
/// middleware, so every handler can rely on a `CurrentUser` extension.
pub fn routes(store: Arc<AlertStore>) -> Router {
    let state = Arc::new(NotifyState { store });

    Router::new()
        .route("/notifications", get(list_notifications_handler))
        .route("/notifications/{alert_id}/read", post(mark_read_handler))
        .with_state(state)
}
