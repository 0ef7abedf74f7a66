// --- File: crates/solarify_gcal/src/logic_proptest.rs ---
//! Property tests for the slot grid and conflict marking.

use crate::logic::{
    business_hours, generate_day_slots, mark_slots, slot_overlaps_busy, Slot, DEFAULT_TIME_ZONE,
    SLOT_DURATION_MINUTES,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use proptest::prelude::*;

fn arbitrary_date() -> impl Strategy<Value = NaiveDate> {
    // A few years around the present, covering DST transitions.
    (2024i32..2028, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

proptest! {
    #[test]
    fn slots_stay_within_business_hours(date in arbitrary_date()) {
        let tz = DEFAULT_TIME_ZONE;
        let slots = generate_day_slots(date, tz);

        match business_hours(date.weekday()) {
            None => prop_assert!(slots.is_empty()),
            Some((open, close)) => {
                for slot in &slots {
                    let local_start = slot.start.with_timezone(&tz);
                    let local_end = slot.end.with_timezone(&tz);
                    prop_assert_eq!(local_start.date_naive(), date);
                    prop_assert!(local_start.time() >= open);
                    prop_assert!(local_end.time() <= close);
                    prop_assert_eq!(
                        slot.end - slot.start,
                        Duration::minutes(SLOT_DURATION_MINUTES)
                    );
                }
            }
        }
    }

    #[test]
    fn slots_are_ordered_and_disjoint(date in arbitrary_date()) {
        let slots = generate_day_slots(date, DEFAULT_TIME_ZONE);
        for pair in slots.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn available_slots_never_overlap_busy_intervals(
        date in arbitrary_date(),
        offsets in prop::collection::vec((0i64..24 * 60, 1i64..240), 0..8),
    ) {
        let tz = DEFAULT_TIME_ZONE;
        let slots = generate_day_slots(date, tz);
        prop_assume!(!slots.is_empty());

        let base = slots[0].start - Duration::hours(9);
        let busy: Vec<(DateTime<Utc>, DateTime<Utc>)> = offsets
            .into_iter()
            .map(|(offset, length)| {
                let start = base + Duration::minutes(offset);
                (start, start + Duration::minutes(length))
            })
            .collect();

        let marked = mark_slots(&slots, &busy, tz);
        prop_assert_eq!(marked.len(), slots.len());

        for (slot, view) in slots.iter().zip(&marked) {
            let conflicts = busy.iter().any(|interval| slot_overlaps_busy(slot, interval));
            prop_assert_eq!(view.available, !conflicts);
            if view.available {
                for &(busy_start, busy_end) in &busy {
                    // An available slot shares no time with any busy interval.
                    prop_assert!(slot.end <= busy_start || slot.start >= busy_end);
                }
            }
        }
    }

    #[test]
    fn overlap_is_symmetric_with_interval_intersection(
        slot_start in 0i64..1_000,
        busy_start in 0i64..1_000,
        busy_len in 1i64..300,
    ) {
        let base = DateTime::parse_from_rfc3339("2026-09-14T00:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        let slot = Slot {
            start: base + Duration::minutes(slot_start),
            end: base + Duration::minutes(slot_start + SLOT_DURATION_MINUTES),
        };
        let busy = (
            base + Duration::minutes(busy_start),
            base + Duration::minutes(busy_start + busy_len),
        );

        let intersects = slot.start < busy.1 && busy.0 < slot.end;
        prop_assert_eq!(slot_overlaps_busy(&slot, &busy), intersects);
    }
}
