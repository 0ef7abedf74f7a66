use chrono::{DateTime, Duration, NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use solarify_gcal::logic::{generate_day_slots, mark_slots, DEFAULT_TIME_ZONE};

fn busy_intervals(base: DateTime<Utc>, count: usize) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut intervals = Vec::with_capacity(count);
    let mut cursor = base;
    for _ in 0..count {
        let start = cursor + Duration::minutes(20);
        let end = start + Duration::minutes(30);
        intervals.push((start, end));
        cursor = end + Duration::minutes(10);
    }
    intervals
}

fn benchmark_day_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("day_slots");

    // A Monday, so the full weekday grid is generated.
    let monday = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
    let tz = DEFAULT_TIME_ZONE;

    group.bench_function("generate_weekday_grid", |b| {
        b.iter(|| generate_day_slots(black_box(monday), black_box(tz)))
    });

    let slots = generate_day_slots(monday, tz);
    let base = slots[0].start;

    group.bench_function("mark_with_no_busy_intervals", |b| {
        b.iter(|| mark_slots(black_box(&slots), black_box(&[]), black_box(tz)))
    });

    let few = busy_intervals(base, 3);
    group.bench_function("mark_with_few_busy_intervals", |b| {
        b.iter(|| mark_slots(black_box(&slots), black_box(&few), black_box(tz)))
    });

    let many = busy_intervals(base - Duration::hours(2), 50);
    group.bench_function("mark_with_many_busy_intervals", |b| {
        b.iter(|| mark_slots(black_box(&slots), black_box(&many), black_box(tz)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_day_slots);
criterion_main!(benches);
