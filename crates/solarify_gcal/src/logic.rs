// --- File: crates/solarify_gcal/src/logic.rs ---
//! Slot generation, availability and booking input validation.
//!
//! Appointments are a fixed 60-minute grid with a 15-minute buffer between
//! slots, laid out within static per-weekday business hours in the
//! configured timezone. Availability is computed by subtracting busy
//! intervals; on free/busy failure the day degrades to fully available.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use solarify_common::{validation_error, SolarifyError};
use solarify_db::models::ServiceType;
use std::str::FromStr;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Appointment length in minutes.
pub const SLOT_DURATION_MINUTES: i64 = 60;
/// Gap between the end of one slot and the start of the next.
pub const SLOT_BUFFER_MINUTES: i64 = 15;

pub const DEFAULT_TIME_ZONE: Tz = Tz::America__New_York;

/// Open and close times for a weekday, or `None` when closed.
///
/// The map is static: Mon-Fri 09:00-17:00, Sat 10:00-14:00, Sun closed.
pub fn business_hours(weekday: Weekday) -> Option<(NaiveTime, NaiveTime)> {
    let open_close = match weekday {
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => (9, 17),
        Weekday::Sat => (10, 14),
        Weekday::Sun => return None,
    };
    Some((
        NaiveTime::from_hms_opt(open_close.0, 0, 0).expect("valid open time"),
        NaiveTime::from_hms_opt(open_close.1, 0, 0).expect("valid close time"),
    ))
}

/// Resolve the configured IANA timezone name, falling back to the default
/// when missing or unparseable.
pub fn resolve_time_zone(name: Option<&str>) -> Tz {
    name.and_then(|raw| Tz::from_str(raw).ok())
        .unwrap_or(DEFAULT_TIME_ZONE)
}

/// One appointment slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The fixed slot grid for one calendar date, in chronological order.
///
/// Slots start at the opening time and step by duration plus buffer; a slot
/// is only emitted when it ends at or before closing. A closed day yields
/// an empty grid. Local times that do not exist on that date (DST gaps)
/// are skipped.
pub fn generate_day_slots(date: NaiveDate, tz: Tz) -> Vec<Slot> {
    let Some((open, close)) = business_hours(date.weekday()) else {
        return Vec::new();
    };

    let duration = Duration::minutes(SLOT_DURATION_MINUTES);
    let step = duration + Duration::minutes(SLOT_BUFFER_MINUTES);

    let mut slots = Vec::new();
    let mut cursor = open;
    loop {
        let slot_end = cursor + duration;
        if slot_end > close || slot_end < cursor {
            break;
        }

        let local_start = tz.from_local_datetime(&date.and_time(cursor)).single();
        let local_end = tz.from_local_datetime(&date.and_time(slot_end)).single();
        if let (Some(start), Some(end)) = (local_start, local_end) {
            slots.push(Slot {
                start: start.with_timezone(&Utc),
                end: end.with_timezone(&Utc),
            });
        }

        cursor += step;
        if cursor <= open {
            break;
        }
    }
    slots
}

/// Whether a slot conflicts with a busy interval.
///
/// Three tests: the slot starts inside the interval, the slot ends inside
/// the interval, or the slot fully contains the interval.
pub fn slot_overlaps_busy(slot: &Slot, busy: &(DateTime<Utc>, DateTime<Utc>)) -> bool {
    let (busy_start, busy_end) = *busy;
    let starts_inside = slot.start >= busy_start && slot.start < busy_end;
    let ends_inside = slot.end > busy_start && slot.end <= busy_end;
    let contains = slot.start <= busy_start && slot.end >= busy_end;
    starts_inside || ends_inside || contains
}

/// A slot with its availability flag, as returned to callers.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotView {
    /// Slot start in RFC 3339 with the business timezone offset
    pub start: String,
    /// Slot end in RFC 3339 with the business timezone offset
    pub end: String,
    pub available: bool,
}

/// Mark each generated slot against the busy intervals and render it in
/// the business timezone. An empty busy list leaves every slot available.
pub fn mark_slots(slots: &[Slot], busy: &[(DateTime<Utc>, DateTime<Utc>)], tz: Tz) -> Vec<SlotView> {
    slots
        .iter()
        .map(|slot| SlotView {
            start: slot.start.with_timezone(&tz).to_rfc3339(),
            end: slot.end.with_timezone(&tz).to_rfc3339(),
            available: !busy.iter().any(|interval| slot_overlaps_busy(slot, interval)),
        })
        .collect()
}

// --- Request / response shapes ---

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", param(example = "2026-09-14"))]
    pub date: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailabilityResponse {
    pub date: String,
    pub time_zone: String,
    pub slots: Vec<SlotView>,
}

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateBookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Date in YYYY-MM-DD format
    pub date: String,
    /// Start time in HH:MM format
    pub time: String,
    pub service_type: ServiceType,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingResponse {
    pub booking_id: i64,
    pub event_id: Option<String>,
    pub status: String,
    pub html_link: Option<String>,
    pub meet_link: Option<String>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancelBookingResponse {
    pub success: bool,
    pub message: String,
}

// --- Input validation ---

/// Parse a strictly `YYYY-MM-DD` shaped date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, SolarifyError> {
    if raw.len() != 10 {
        return Err(validation_error("date must be in YYYY-MM-DD format"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| validation_error("date must be in YYYY-MM-DD format"))
}

/// Parse a strictly `HH:MM` shaped time.
pub fn parse_time(raw: &str) -> Result<NaiveTime, SolarifyError> {
    if raw.len() != 5 {
        return Err(validation_error("time must be in HH:MM format"));
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| validation_error("time must be in HH:MM format"))
}

fn is_email_shaped(raw: &str) -> bool {
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

/// Check the booking payload and resolve its appointment window.
///
/// Returns the [start, start + slot duration] window in the business
/// timezone, converted to UTC.
pub fn validate_booking_request(
    request: &CreateBookingRequest,
    tz: Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>), SolarifyError> {
    if request.name.trim().is_empty() {
        return Err(validation_error("name must not be empty"));
    }
    if !is_email_shaped(&request.email) {
        return Err(validation_error("email address is not valid"));
    }
    let digits = request.phone.chars().filter(char::is_ascii_digit).count();
    if digits < 7 {
        return Err(validation_error("phone number must contain at least 7 digits"));
    }

    let date = parse_date(&request.date)?;
    let time = parse_time(&request.time)?;

    let start = tz
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| validation_error("requested time does not exist in the business timezone"))?
        .with_timezone(&Utc);
    let end = start + Duration::minutes(SLOT_DURATION_MINUTES);
    Ok((start, end))
}

/// Event summary line, e.g. "Solar Consultation: Jamie Example".
pub fn event_summary(service_type: ServiceType, name: &str) -> String {
    format!("{}: {}", service_type.label(), name)
}

/// Event description from the contact details plus optional notes.
pub fn event_description(request: &CreateBookingRequest) -> String {
    let mut description = format!(
        "Service: {}\nCustomer: {}\nEmail: {}\nPhone: {}",
        request.service_type.label(),
        request.name,
        request.email,
        request.phone
    );
    if let Some(notes) = request.notes.as_deref() {
        if !notes.trim().is_empty() {
            description.push_str("\nNotes: ");
            description.push_str(notes.trim());
        }
    }
    description
}
