//! Booking flow tests in mock mode against an in-memory database.
//!
//! With no calendar credentials configured the resolver settles on mock
//! mode, so these drive the real handlers end to end without any remote
//! calls: availability lookup, booking creation, listing and cancellation.

use axum::extract::{Path, Query, State};
use axum::Json;
use solarify_common::SolarifyError;
use solarify_config::{AppConfig, DatabaseConfig, GcalConfig, ServerConfig};
use solarify_db::models::{BookingStatus, ServiceType};
use solarify_db::repositories::BookingRepository;
use solarify_db::{DbClient, Repositories};
use solarify_gcal::handlers::{
    cancel_booking_handler, create_booking_handler, get_availability_handler,
    list_bookings_handler, GcalState,
};
use solarify_gcal::logic::{AvailabilityQuery, CreateBookingRequest};
use solarify_gcal::routes::gcal_state;
use solarify_gcal::CredentialEnv;
use std::sync::Arc;

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8086,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        },
        use_gcal: true,
        use_smtp: false,
        gcal: Some(GcalConfig {
            calendar_id: Some("primary".to_string()),
            time_zone: Some("America/New_York".to_string()),
        }),
        smtp: None,
        session: None,
    })
}

async fn setup() -> Arc<GcalState> {
    let db_client = DbClient::from_url("sqlite::memory:")
        .await
        .expect("in-memory db");
    let repos = Repositories::new(db_client);
    repos.init_schema().await.expect("schema");

    // An empty credential environment forces mock mode.
    gcal_state(test_config(), repos, CredentialEnv::default())
}

fn booking_request(date: &str, time: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        name: "Jamie Example".to_string(),
        email: "jamie@example.com".to_string(),
        phone: "+1 555 012 3456".to_string(),
        date: date.to_string(),
        time: time.to_string(),
        service_type: ServiceType::SiteAssessment,
        notes: Some("south-facing roof".to_string()),
    }
}

#[tokio::test]
async fn test_availability_on_an_open_day() {
    let state = setup().await;

    let Json(response) = get_availability_handler(
        State(state.clone()),
        Query(AvailabilityQuery {
            date: "2026-09-14".to_string(),
        }),
    )
    .await
    .expect("availability");

    assert_eq!(response.date, "2026-09-14");
    assert_eq!(response.time_zone, "America/New_York");
    assert_eq!(response.slots.len(), 6);
    // Mock mode reports every slot as available.
    assert!(response.slots.iter().all(|s| s.available));
}

#[tokio::test]
async fn test_availability_on_a_closed_day_is_empty() {
    let state = setup().await;

    let Json(response) = get_availability_handler(
        State(state.clone()),
        Query(AvailabilityQuery {
            date: "2026-09-13".to_string(),
        }),
    )
    .await
    .expect("availability");

    assert!(response.slots.is_empty());
}

#[tokio::test]
async fn test_availability_rejects_malformed_dates() {
    let state = setup().await;

    let result = get_availability_handler(
        State(state.clone()),
        Query(AvailabilityQuery {
            date: "tomorrow".to_string(),
        }),
    )
    .await;

    assert!(matches!(result, Err(SolarifyError::ValidationError(_))));
}

#[tokio::test]
async fn test_booking_in_mock_mode_synthesizes_an_event() {
    let state = setup().await;

    let Json(response) = create_booking_handler(
        State(state.clone()),
        Json(booking_request("2026-09-14", "10:15")),
    )
    .await
    .expect("booked");

    let event_id = response.event_id.expect("mock event id");
    assert!(event_id.starts_with("mock-event-"));
    assert_eq!(response.status, "confirmed");

    // The booking row is stored either way.
    let stored = state
        .repos
        .bookings
        .find_by_id(response.booking_id)
        .await
        .expect("query")
        .expect("booking exists");
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert_eq!(stored.calendar_event_id.as_deref(), Some(event_id.as_str()));
    assert_eq!(stored.service_type, ServiceType::SiteAssessment);
}

#[tokio::test]
async fn test_booking_rejects_invalid_input() {
    let state = setup().await;

    let mut bad_email = booking_request("2026-09-14", "10:15");
    bad_email.email = "not-an-email".to_string();
    let result = create_booking_handler(State(state.clone()), Json(bad_email)).await;
    assert!(matches!(result, Err(SolarifyError::ValidationError(_))));

    let bad_time = booking_request("2026-09-14", "quarter past ten");
    let result = create_booking_handler(State(state.clone()), Json(bad_time)).await;
    assert!(matches!(result, Err(SolarifyError::ValidationError(_))));
}

#[tokio::test]
async fn test_bookings_list_newest_first() {
    let state = setup().await;

    create_booking_handler(
        State(state.clone()),
        Json(booking_request("2026-09-14", "09:00")),
    )
    .await
    .expect("first booking");
    create_booking_handler(
        State(state.clone()),
        Json(booking_request("2026-09-15", "10:15")),
    )
    .await
    .expect("second booking");

    let Json(bookings) = list_bookings_handler(State(state.clone()))
        .await
        .expect("listed");

    assert_eq!(bookings.len(), 2);
    assert!(bookings[0].starts_at > bookings[1].starts_at);
}

#[tokio::test]
async fn test_cancel_booking_is_terminal() {
    let state = setup().await;

    let Json(booked) = create_booking_handler(
        State(state.clone()),
        Json(booking_request("2026-09-14", "10:15")),
    )
    .await
    .expect("booked");

    let Json(cancelled) = cancel_booking_handler(State(state.clone()), Path(booked.booking_id))
        .await
        .expect("cancelled");
    assert!(cancelled.success);

    let stored = state
        .repos
        .bookings
        .find_by_id(booked.booking_id)
        .await
        .expect("query")
        .expect("booking exists");
    assert_eq!(stored.status, BookingStatus::Cancelled);

    let recancel = cancel_booking_handler(State(state.clone()), Path(booked.booking_id)).await;
    assert!(matches!(recancel, Err(SolarifyError::ConflictError(_))));
}

#[tokio::test]
async fn test_cancel_missing_booking_is_not_found() {
    let state = setup().await;

    let result = cancel_booking_handler(State(state.clone()), Path(999)).await;
    assert!(matches!(result, Err(SolarifyError::NotFoundError(_))));
}
