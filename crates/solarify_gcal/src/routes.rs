// --- File: crates/solarify_gcal/src/routes.rs ---
use crate::auth::CalendarAccess;
use crate::handlers::{
    cancel_booking_handler, create_booking_handler, get_availability_handler,
    list_bookings_handler, GcalState,
};
use crate::logic::resolve_time_zone;
use crate::service::GoogleCalendarService;
use axum::{
    routing::{delete, get, post},
    Router,
};
use solarify_config::AppConfig;
use solarify_db::Repositories;
use std::sync::Arc;

/// Build the shared calendar state from the configured calendar id,
/// timezone and the credential environment.
pub fn gcal_state(
    config: Arc<AppConfig>,
    repos: Repositories,
    env: crate::auth::CredentialEnv,
) -> Arc<GcalState> {
    let gcal = config.gcal.clone().unwrap_or_default();
    let calendar_id = gcal.calendar_id.unwrap_or_else(|| "primary".to_string());
    let time_zone = resolve_time_zone(gcal.time_zone.as_deref());

    let access = Arc::new(CalendarAccess::new(env, calendar_id));
    let calendar = GoogleCalendarService::new(access, time_zone);

    Arc::new(GcalState {
        config,
        repos,
        calendar,
    })
}

/// Creates a router with the public booking routes: availability lookup
/// and appointment creation stay reachable without a session.
pub fn routes(state: Arc<GcalState>) -> Router {
    Router::new()
        .route("/gcal/availability", get(get_availability_handler))
        .route("/gcal/bookings", post(create_booking_handler))
        .with_state(state)
}

/// Creates a router with the admin booking routes. The backend wraps this
/// in the session middleware.
pub fn admin_routes(state: Arc<GcalState>) -> Router {
    Router::new()
        .route("/gcal/admin/bookings", get(list_bookings_handler))
        .route("/gcal/admin/bookings/{id}", delete(cancel_booking_handler))
        .with_state(state)
}
