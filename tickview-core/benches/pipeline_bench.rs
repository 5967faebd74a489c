//! Criterion benchmarks for the selection → dashboard path.
//!
//! Benchmarks:
//! 1. Filter stage alone over a multi-instrument dataset
//! 2. Full dashboard evaluation (filter + metrics + chart + snapshot)
//! 3. SMA overlay computation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tickview_core::domain::{Dataset, Selection};
use tickview_core::data::synthetic_dataset;
use tickview_core::indicators::{Indicator, Sma};
use tickview_core::pipeline::filter;
use tickview_core::view::Dashboard;

// ── Helpers ──────────────────────────────────────────────────────────

const INSTRUMENTS: [&str; 10] = [
    "SYM0", "SYM1", "SYM2", "SYM3", "SYM4", "SYM5", "SYM6", "SYM7", "SYM8", "SYM9",
];

fn make_dataset(years: i32) -> Dataset {
    let start = chrono::NaiveDate::from_ymd_opt(2024 - years, 1, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    synthetic_dataset(&INSTRUMENTS, start, end).unwrap()
}

fn full_range(dataset: &Dataset) -> Selection {
    let (start, end) = dataset.date_bounds().unwrap();
    Selection::new("SYM3", start, end)
}

// ── 1. Filter ────────────────────────────────────────────────────────

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for &years in &[1, 5, 10] {
        let dataset = make_dataset(years);
        let default = Selection::default_for(&dataset).unwrap().with_instrument("SYM3");
        let full = full_range(&dataset);

        group.bench_with_input(BenchmarkId::new("12_weeks", years), &years, |b, _| {
            b.iter(|| filter(black_box(&dataset), black_box(&default)).len());
        });
        group.bench_with_input(BenchmarkId::new("full_history", years), &years, |b, _| {
            b.iter(|| filter(black_box(&dataset), black_box(&full)).len());
        });
    }

    group.finish();
}

// ── 2. Dashboard ─────────────────────────────────────────────────────

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");

    for &years in &[1, 10] {
        let dataset = make_dataset(years);
        let full = full_range(&dataset);

        group.bench_with_input(BenchmarkId::new("full_history", years), &years, |b, _| {
            b.iter(|| Dashboard::evaluate(black_box(&dataset), black_box(&full)));
        });
    }

    group.finish();
}

// ── 3. Overlay ───────────────────────────────────────────────────────

fn bench_sma(c: &mut Criterion) {
    let closes: Vec<f64> = (0..2520)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect();
    let sma = Sma::new(7);

    c.bench_function("sma_7_2520_rows", |b| {
        b.iter(|| sma.compute(black_box(&closes)));
    });
}

criterion_group!(benches, bench_filter, bench_dashboard, bench_sma);
criterion_main!(benches);
