// --- File: crates/solarify_notify/src/handlers.rs ---
use crate::alerts::{Alert, AlertStore};
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use solarify_auth::CurrentUser;
use solarify_common::error::{not_found, SolarifyError};
use std::sync::Arc;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Shared state for the notification handlers.
#[derive(Clone)]
pub struct NotifyState {
    pub store: Arc<AlertStore>,
}

#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct NotificationListQuery {
    /// When true, only alerts that have not been marked read are returned.
    pub unread_only: Option<bool>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NotificationsResponse {
    pub unread: usize,
    pub alerts: Vec<Alert>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MarkReadResponse {
    pub success: bool,
}

/// Handler to list the authenticated user's alerts, newest first.
#[axum::debug_handler]
pub async fn list_notifications_handler(
    State(state): State<Arc<NotifyState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<NotificationsResponse>, SolarifyError> {
    let mut alerts = state.store.list_for_user(current.user_id);
    if query.unread_only.unwrap_or(false) {
        alerts.retain(|a| !a.read);
    }
    let unread = state.store.unread_count(current.user_id);
    Ok(Json(NotificationsResponse { unread, alerts }))
}

/// Handler to mark one of the authenticated user's alerts as read.
#[axum::debug_handler]
pub async fn mark_read_handler(
    State(state): State<Arc<NotifyState>>,
    Extension(current): Extension<CurrentUser>,
    Path(alert_id): Path<String>,
) -> Result<Json<MarkReadResponse>, SolarifyError> {
    if !state.store.mark_read(current.user_id, &alert_id) {
        return Err(not_found(format!("notification {alert_id} not found")));
    }
    Ok(Json(MarkReadResponse { success: true }))
}
