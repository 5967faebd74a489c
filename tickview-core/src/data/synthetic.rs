//! Deterministic synthetic prices for demos and tests.
//!
//! A random walk from 100.0 on weekdays only, seeded from the instrument
//! name, so the same instrument and range always produce the same rows.
//! Rows carry a `volume` extra column.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Dataset, DatasetError, Observation, RowLayout};

/// Synthetic dataset with an instrument column and one row per weekday per instrument.
pub fn synthetic_dataset(
    instruments: &[&str],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Dataset, DatasetError> {
    let layout = RowLayout::standard(true).with_extra("volume");
    let rows = instruments
        .iter()
        .flat_map(|instrument| synthetic_rows(instrument, start, end))
        .collect();
    Dataset::new(layout, rows)
}

fn synthetic_rows(instrument: &str, start: NaiveDate, end: NaiveDate) -> Vec<Observation> {
    let seed: [u8; 32] = *blake3::hash(instrument.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut rows = Vec::new();
    let mut price = 100.0_f64;
    let mut current = start;

    while current <= end {
        if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            current += Duration::days(1);
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + daily_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000..5_000_000u64);

        rows.push(
            Observation::new(current, close)
                .with_instrument(instrument)
                .with_ohl(open, high, low)
                .with_extra(volume as f64),
        );

        price = close;
        current += Duration::days(1);
    }

    rows
}
