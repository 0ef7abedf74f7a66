// --- File: crates/solarify_gcal/src/logic_test.rs ---
use crate::logic::{
    business_hours, event_description, event_summary, generate_day_slots, mark_slots, parse_date,
    parse_time, resolve_time_zone, slot_overlaps_busy, validate_booking_request,
    CreateBookingRequest, Slot, DEFAULT_TIME_ZONE, SLOT_BUFFER_MINUTES, SLOT_DURATION_MINUTES,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

fn utc(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

fn booking_request() -> CreateBookingRequest {
    CreateBookingRequest {
        name: "Jamie Example".to_string(),
        email: "jamie@example.com".to_string(),
        phone: "+1 555 012 3456".to_string(),
        date: "2026-09-14".to_string(),
        time: "10:15".to_string(),
        service_type: solarify_db::models::ServiceType::Consultation,
        notes: None,
    }
}

// --- Business hours and the slot grid ---

#[test]
fn test_sunday_is_closed() {
    assert!(business_hours(Weekday::Sun).is_none());

    // 2026-09-13 is a Sunday.
    let sunday = NaiveDate::from_ymd_opt(2026, 9, 13).unwrap();
    assert!(generate_day_slots(sunday, DEFAULT_TIME_ZONE).is_empty());
}

#[test]
fn test_weekday_grid_fills_the_open_hours() {
    // 2026-09-14 is a Monday; 09:00-17:00 with 75-minute steps gives six
    // slots, the last starting at 15:15.
    let monday = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
    let tz = DEFAULT_TIME_ZONE;
    let slots = generate_day_slots(monday, tz);

    assert_eq!(slots.len(), 6);
    let starts: Vec<String> = slots
        .iter()
        .map(|s| s.start.with_timezone(&tz).format("%H:%M").to_string())
        .collect();
    assert_eq!(
        starts,
        vec!["09:00", "10:15", "11:30", "12:45", "14:00", "15:15"]
    );

    for slot in &slots {
        assert_eq!(
            slot.end - slot.start,
            Duration::minutes(SLOT_DURATION_MINUTES)
        );
    }
    for pair in slots.windows(2) {
        assert_eq!(
            pair[1].start - pair[0].start,
            Duration::minutes(SLOT_DURATION_MINUTES + SLOT_BUFFER_MINUTES)
        );
    }
}

#[test]
fn test_saturday_grid_is_shorter() {
    // 2026-09-12 is a Saturday; 10:00-14:00 fits three slots, since the
    // 13:45 start would run past closing.
    let saturday = NaiveDate::from_ymd_opt(2026, 9, 12).unwrap();
    let tz = DEFAULT_TIME_ZONE;
    let slots = generate_day_slots(saturday, tz);

    assert_eq!(slots.len(), 3);
    let last_end = slots.last().unwrap().end.with_timezone(&tz);
    assert_eq!(last_end.format("%H:%M").to_string(), "13:30");
}

#[test]
fn test_grid_respects_the_configured_timezone() {
    let monday = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
    let zurich = resolve_time_zone(Some("Europe/Zurich"));
    let slots = generate_day_slots(monday, zurich);

    let first_local = slots[0].start.with_timezone(&zurich);
    assert_eq!(first_local.format("%H:%M").to_string(), "09:00");
    // 09:00 Zurich in September is 07:00 UTC.
    assert_eq!(slots[0].start, utc("2026-09-14T07:00:00Z"));
}

#[test]
fn test_unknown_timezone_falls_back_to_default() {
    assert_eq!(resolve_time_zone(Some("Mars/Olympus")), DEFAULT_TIME_ZONE);
    assert_eq!(resolve_time_zone(None), DEFAULT_TIME_ZONE);
    assert_eq!(
        resolve_time_zone(Some("Europe/Zurich")),
        Tz::Europe__Zurich
    );
}

// --- Overlap predicate ---

#[test]
fn test_overlap_truth_table() {
    let slot = Slot {
        start: utc("2026-09-14T14:00:00Z"),
        end: utc("2026-09-14T15:00:00Z"),
    };

    // Slot start inside the busy interval.
    assert!(slot_overlaps_busy(
        &slot,
        &(utc("2026-09-14T13:30:00Z"), utc("2026-09-14T14:30:00Z"))
    ));
    // Slot end inside the busy interval.
    assert!(slot_overlaps_busy(
        &slot,
        &(utc("2026-09-14T14:30:00Z"), utc("2026-09-14T15:30:00Z"))
    ));
    // Slot fully containing the busy interval.
    assert!(slot_overlaps_busy(
        &slot,
        &(utc("2026-09-14T14:15:00Z"), utc("2026-09-14T14:45:00Z"))
    ));
    // Busy interval fully containing the slot.
    assert!(slot_overlaps_busy(
        &slot,
        &(utc("2026-09-14T13:00:00Z"), utc("2026-09-14T16:00:00Z"))
    ));

    // Touching boundaries do not conflict.
    assert!(!slot_overlaps_busy(
        &slot,
        &(utc("2026-09-14T13:00:00Z"), utc("2026-09-14T14:00:00Z"))
    ));
    assert!(!slot_overlaps_busy(
        &slot,
        &(utc("2026-09-14T15:00:00Z"), utc("2026-09-14T16:00:00Z"))
    ));
    // Disjoint intervals do not conflict.
    assert!(!slot_overlaps_busy(
        &slot,
        &(utc("2026-09-14T10:00:00Z"), utc("2026-09-14T11:00:00Z"))
    ));
}

#[test]
fn test_mark_slots_flags_only_conflicting_slots() {
    let monday = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
    let tz = DEFAULT_TIME_ZONE;
    let slots = generate_day_slots(monday, tz);

    // Busy over the 10:15 slot only (local time).
    let busy_start = tz
        .with_ymd_and_hms(2026, 9, 14, 10, 30, 0)
        .unwrap()
        .with_timezone(&Utc);
    let busy = vec![(busy_start, busy_start + Duration::minutes(30))];

    let marked = mark_slots(&slots, &busy, tz);
    let available: Vec<bool> = marked.iter().map(|s| s.available).collect();
    assert_eq!(available, vec![true, false, true, true, true, true]);
}

#[test]
fn test_mark_slots_without_busy_intervals_keeps_everything_available() {
    let monday = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
    let marked = mark_slots(
        &generate_day_slots(monday, DEFAULT_TIME_ZONE),
        &[],
        DEFAULT_TIME_ZONE,
    );
    assert!(marked.iter().all(|s| s.available));
}

// --- Input validation ---

#[test]
fn test_date_and_time_shapes() {
    assert!(parse_date("2026-09-14").is_ok());
    assert!(parse_date("2026-9-14").is_err());
    assert!(parse_date("14.09.2026").is_err());
    assert!(parse_date("2026-13-01").is_err());

    assert!(parse_time("10:15").is_ok());
    assert!(parse_time("9:15").is_err());
    assert!(parse_time("25:00").is_err());
    assert!(parse_time("10:15:00").is_err());
}

#[test]
fn test_booking_request_window() {
    let tz = DEFAULT_TIME_ZONE;
    let (start, end) =
        validate_booking_request(&booking_request(), tz).expect("valid request");

    let local = start.with_timezone(&tz);
    assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2026-09-14 10:15");
    assert_eq!(end - start, Duration::minutes(SLOT_DURATION_MINUTES));
}

#[test]
fn test_booking_request_field_checks() {
    let tz = DEFAULT_TIME_ZONE;

    let mut request = booking_request();
    request.name = "  ".to_string();
    assert!(validate_booking_request(&request, tz).is_err());

    let mut request = booking_request();
    request.email = "not-an-email".to_string();
    assert!(validate_booking_request(&request, tz).is_err());

    let mut request = booking_request();
    request.phone = "12345".to_string();
    assert!(validate_booking_request(&request, tz).is_err());

    let mut request = booking_request();
    request.date = "next tuesday".to_string();
    assert!(validate_booking_request(&request, tz).is_err());

    let mut request = booking_request();
    request.time = "noon".to_string();
    assert!(validate_booking_request(&request, tz).is_err());
}

#[test]
fn test_event_text_carries_contact_details() {
    let request = booking_request();
    assert_eq!(
        event_summary(request.service_type, &request.name),
        "Solar Consultation: Jamie Example"
    );

    let description = event_description(&request);
    assert!(description.contains("jamie@example.com"));
    assert!(description.contains("+1 555 012 3456"));
    assert!(!description.contains("Notes:"));

    let mut with_notes = booking_request();
    with_notes.notes = Some("south-facing roof".to_string());
    assert!(event_description(&with_notes).contains("Notes: south-facing roof"));
}
