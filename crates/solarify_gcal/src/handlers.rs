// --- File: crates/solarify_gcal/src/handlers.rs ---
use crate::logic::{
    self, AvailabilityQuery, AvailabilityResponse, BookingResponse, CancelBookingResponse,
    CreateBookingRequest,
};
use crate::service::{busy_times_or_available, GoogleCalendarService};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::{Duration, TimeZone, Utc};
use solarify_common::services::{CalendarEvent, CalendarService};
use solarify_common::{conflict, external_service_error, not_found, SolarifyError};
use solarify_config::AppConfig;
use solarify_db::models::{Booking, NewBooking};
use solarify_db::repositories::BookingRepository;
use solarify_db::Repositories;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state for the calendar handlers.
pub struct GcalState {
    pub config: Arc<AppConfig>,
    pub repos: Repositories,
    pub calendar: GoogleCalendarService,
}

/// Handler to list appointment slots for one date.
///
/// A closed day returns an empty slot list. Free/busy failures degrade to
/// every slot available instead of failing the request.
#[axum::debug_handler]
pub async fn get_availability_handler(
    State(state): State<Arc<GcalState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, SolarifyError> {
    let date = logic::parse_date(&query.date)?;
    let tz = state.calendar.time_zone();

    let slots = logic::generate_day_slots(date, tz);
    if slots.is_empty() {
        return Ok(Json(AvailabilityResponse {
            date: query.date,
            time_zone: tz.name().to_string(),
            slots: Vec::new(),
        }));
    }

    // Busy intervals are fetched for the local day, not just the open
    // hours, so events spilling over the boundaries still count.
    let day_start = tz
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight exists"))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| slots[0].start - Duration::hours(12));
    let day_end = day_start + Duration::days(1);

    let busy = busy_times_or_available(&state.calendar, day_start, day_end).await;
    let slots = logic::mark_slots(&slots, &busy, tz);

    Ok(Json(AvailabilityResponse {
        date: query.date,
        time_zone: tz.name().to_string(),
        slots,
    }))
}

/// Handler to book an appointment.
///
/// The calendar event is created first (simulated in mock mode), then the
/// booking row is stored with the resulting event id.
#[axum::debug_handler]
pub async fn create_booking_handler(
    State(state): State<Arc<GcalState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, SolarifyError> {
    let tz = state.calendar.time_zone();
    let (starts_at, ends_at) = logic::validate_booking_request(&payload, tz)?;

    let mut attendee_emails = vec![payload.email.clone()];
    if let Some(owner) = state.calendar.calendar_email() {
        attendee_emails.push(owner);
    }

    let event = CalendarEvent {
        start_time: starts_at.with_timezone(&tz).to_rfc3339(),
        end_time: ends_at.with_timezone(&tz).to_rfc3339(),
        summary: logic::event_summary(payload.service_type, &payload.name),
        description: Some(logic::event_description(&payload)),
        attendee_emails,
        with_conferencing: true,
    };

    let result = state
        .calendar
        .create_event(event)
        .await
        .map_err(|e| external_service_error("google-calendar", e))?;

    let booking = state
        .repos
        .bookings
        .create(NewBooking {
            customer_name: payload.name,
            customer_email: payload.email,
            customer_phone: payload.phone,
            service_type: payload.service_type,
            starts_at,
            ends_at,
            notes: payload.notes,
            calendar_event_id: result.event_id.clone(),
        })
        .await?;

    info!(
        "Booked {} appointment {} at {}",
        booking.service_type.as_str(),
        booking.id,
        booking.starts_at
    );

    Ok(Json(BookingResponse {
        booking_id: booking.id,
        event_id: result.event_id,
        status: result.status,
        html_link: result.html_link,
        meet_link: result.meet_link,
    }))
}

/// Handler to list all bookings, newest first.
#[axum::debug_handler]
pub async fn list_bookings_handler(
    State(state): State<Arc<GcalState>>,
) -> Result<Json<Vec<Booking>>, SolarifyError> {
    let bookings = state.repos.bookings.list().await?;
    Ok(Json(bookings))
}

/// Handler to cancel a booking.
///
/// The row flips to cancelled; removing the remote event is best-effort
/// and a remote failure is only logged.
#[axum::debug_handler]
pub async fn cancel_booking_handler(
    State(state): State<Arc<GcalState>>,
    Path(id): Path<i64>,
) -> Result<Json<CancelBookingResponse>, SolarifyError> {
    let booking = state
        .repos
        .bookings
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(format!("booking {id} not found")))?;

    if !state.repos.bookings.cancel(id).await? {
        return Err(conflict(format!("booking {id} is already cancelled")));
    }

    if let Some(event_id) = booking.calendar_event_id.as_deref() {
        if let Err(e) = state.calendar.delete_event(event_id).await {
            warn!(
                "Could not delete calendar event {} for cancelled booking {}: {}",
                event_id, id, e
            );
        }
    }

    info!("Cancelled booking {}", id);
    Ok(Json(CancelBookingResponse {
        success: true,
        message: format!("Booking {id} cancelled."),
    }))
}
