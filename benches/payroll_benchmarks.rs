//! Performance benchmarks for the roster and payroll engine.
//!
//! This benchmark suite verifies that the payroll pipeline meets performance targets:
//! - Weekly reconciliation of one staff member: < 50μs mean
//! - Weekly overtime classification: < 10μs mean
//! - Tax and superannuation assessment: < 5μs mean
//! - Full weekly summary over the in-memory store: < 1ms mean
//! - Batch of 100 weekly summaries: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;
use std::sync::Arc;

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use farmtime_engine::calculation::{WeekWindow, assess, classify_week, reconcile_week};
use farmtime_engine::config::EngineRules;
use farmtime_engine::models::{
    ClockEvent, ContractType, DayHours, EventKind, NewClockEvent, NewStaff, Role,
};
use farmtime_engine::service::PayrollService;
use farmtime_engine::store::{EventStore, MemoryAuditLog, MemoryStore, StaffStore};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Builds clock events for a week, `pairs_per_day` in/out pairs on each
/// of the five weekdays.
fn week_of_events(staff_id: i64, pairs_per_day: u32) -> Vec<ClockEvent> {
    let mut events = Vec::new();
    let mut event_id = 1;
    for day_offset in 0..5 {
        let day = monday() + Duration::days(day_offset);
        for pair in 0..pairs_per_day {
            let start = day
                .and_hms_opt(6 + pair * 4, 0, 0)
                .unwrap();
            let end = start + Duration::minutes(90);
            for (kind, timestamp) in [(EventKind::ClockIn, start), (EventKind::ClockOut, end)] {
                events.push(ClockEvent {
                    event_id,
                    staff_id,
                    device_id: Some(1),
                    timestamp,
                    kind,
                    reason: None,
                    admin_id: None,
                });
                event_id += 1;
            }
        }
    }
    events
}

/// Seeds one staff member with a standard five-day punched week.
fn seed_worked_week(store: &MemoryStore, rate: &str) -> i64 {
    let staff = store
        .insert_staff(NewStaff {
            first_name: "Bench".to_string(),
            last_name: "Worker".to_string(),
            role: Role::Worker,
            contract_type: ContractType::FullTime,
            is_active: true,
            standard_pay_rate: dec(rate),
        })
        .unwrap();

    for day_offset in 0..5 {
        let day = monday() + Duration::days(day_offset);
        for (kind, hour, minute) in [(EventKind::ClockIn, 9, 0), (EventKind::ClockOut, 17, 30)] {
            store
                .insert_event(NewClockEvent {
                    staff_id: staff.staff_id,
                    device_id: Some(1),
                    timestamp: day.and_hms_opt(hour, minute, 0).unwrap(),
                    kind,
                    reason: None,
                    admin_id: None,
                })
                .unwrap();
        }
    }
    staff.staff_id
}

fn payroll_service(store: Arc<MemoryStore>) -> PayrollService {
    PayrollService::new(
        store.clone(),
        store.clone(),
        store,
        Arc::new(MemoryAuditLog::new()),
        Arc::new(EngineRules::default()),
    )
}

/// Benchmark: reconcile one staff member's week of clock events.
///
/// Target: < 50μs mean
fn bench_reconcile_week(c: &mut Criterion) {
    let rules = EngineRules::default();
    let events = week_of_events(7, 1);
    let week = WeekWindow::containing(monday());

    c.bench_function("reconcile_week", |b| {
        b.iter(|| black_box(reconcile_week(week, black_box(&events), &rules.reconciliation)))
    });
}

/// Benchmark: classify a week of day hours into pay categories.
///
/// Target: < 10μs mean
fn bench_classify_week(c: &mut Criterion) {
    let rules = EngineRules::default();
    let days: Vec<DayHours> = (0..7)
        .map(|offset| DayHours {
            date: monday() + Duration::days(offset),
            hours_worked: if offset < 5 { dec("8.5") } else { dec("4") },
        })
        .collect();

    c.bench_function("classify_week", |b| {
        b.iter(|| black_box(classify_week(black_box(&days), dec("25.00"), &rules.overtime)))
    });
}

/// Benchmark: PAYG withholding and superannuation for one gross pay.
///
/// Target: < 5μs mean
fn bench_tax_assessment(c: &mut Criterion) {
    let rules = EngineRules::default();
    let gross = dec("1025.00");

    c.bench_function("tax_assessment", |b| {
        b.iter(|| black_box(assess(black_box(gross), &rules.tax, &rules.superannuation)))
    });
}

/// Benchmark: a full weekly summary through the service and store.
///
/// Target: < 1ms mean
fn bench_weekly_summary(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::new());
    let staff_id = seed_worked_week(&store, "25.00");
    let payroll = payroll_service(store);

    c.bench_function("weekly_summary", |b| {
        b.iter(|| black_box(payroll.weekly_summary(black_box(staff_id), monday()).unwrap()))
    });
}

/// Benchmark: payslip creation including persistence.
///
/// Creation is idempotent per week, so each iteration runs against a
/// freshly seeded store.
fn bench_create_payslip(c: &mut Criterion) {
    c.bench_function("create_payslip", |b| {
        b.iter_batched(
            || {
                let store = Arc::new(MemoryStore::new());
                let staff_id = seed_worked_week(&store, "25.00");
                (payroll_service(store), staff_id)
            },
            |(payroll, staff_id)| black_box(payroll.create_payslip(staff_id, monday()).unwrap()),
            BatchSize::SmallInput,
        )
    });
}

/// Benchmark: batch of 100 weekly summaries over a shared store.
///
/// Target: < 100ms mean
fn bench_batch_100_summaries(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::new());
    let staff_ids: Vec<i64> = (0..100).map(|_| seed_worked_week(&store, "25.00")).collect();
    let payroll = payroll_service(store);

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100_summaries", |b| {
        b.iter(|| {
            let mut results = Vec::with_capacity(staff_ids.len());
            for staff_id in &staff_ids {
                results.push(payroll.weekly_summary(*staff_id, monday()).unwrap());
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: reconciliation across event volumes to understand scaling.
fn bench_scaling(c: &mut Criterion) {
    let rules = EngineRules::default();
    let week = WeekWindow::containing(monday());

    let mut group = c.benchmark_group("scaling");

    for pairs_per_day in [1u32, 2, 4].iter() {
        let events = week_of_events(7, *pairs_per_day);

        group.throughput(Throughput::Elements(u64::from(*pairs_per_day) * 5));
        group.bench_with_input(
            BenchmarkId::new("pairs_per_day", pairs_per_day),
            pairs_per_day,
            |b, _| {
                b.iter(|| {
                    black_box(reconcile_week(week, black_box(&events), &rules.reconciliation))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_reconcile_week,
    bench_classify_week,
    bench_tax_assessment,
    bench_weekly_summary,
    bench_create_payslip,
    bench_batch_100_summaries,
    bench_scaling,
);
criterion_main!(benches);
