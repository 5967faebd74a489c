//! Dataset: the read-only table of observations.
//!
//! Built once at startup and never mutated. Viewers share it behind an
//! `Arc<Dataset>` and derive everything else from it.

use chrono::NaiveDate;
use thiserror::Error;

use super::layout::RowLayout;
use super::observation::{FieldValue, Observation};

/// Instrument name reported for datasets without an instrument column.
pub const IMPLICIT_INSTRUMENT: &str = "LOCAL";

/// Errors from building a dataset or its row layout.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("column appears more than once: {0}")]
    DuplicateColumn(&'static str),

    #[error("row {row} has {actual} extra fields, layout declares {expected}")]
    ExtraArity {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    layout: RowLayout,
    rows: Vec<Observation>,
}

impl Dataset {
    /// Validate `rows` against `layout`. Rows are kept in load order.
    pub fn new(layout: RowLayout, rows: Vec<Observation>) -> Result<Self, DatasetError> {
        let expected = layout.extra_count();
        if let Some((row, obs)) = rows
            .iter()
            .enumerate()
            .find(|(_, obs)| obs.extras.len() != expected)
        {
            return Err(DatasetError::ExtraArity {
                row,
                expected,
                actual: obs.extras.len(),
            });
        }
        Ok(Self { layout, rows })
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_instrument(&self) -> bool {
        self.layout.has_instrument()
    }

    /// Distinct instrument identifiers in first-appearance order.
    ///
    /// A dataset without an instrument column has the single implicit
    /// instrument [`IMPLICIT_INSTRUMENT`].
    pub fn instruments(&self) -> Vec<&str> {
        if !self.has_instrument() {
            return vec![IMPLICIT_INSTRUMENT];
        }
        let mut seen: Vec<&str> = Vec::new();
        for id in self.rows.iter().filter_map(|r| r.instrument.as_deref()) {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }

    /// Number of rows belonging to `instrument`.
    pub fn row_count(&self, instrument: &str) -> usize {
        if !self.has_instrument() {
            return self.rows.len();
        }
        self.rows
            .iter()
            .filter(|r| r.instrument.as_deref() == Some(instrument))
            .count()
    }

    /// Earliest and latest timestamp across all rows.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Earliest and latest timestamp among `instrument`'s rows.
    pub fn instrument_bounds(&self, instrument: &str) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self
            .rows
            .iter()
            .filter(|r| !self.has_instrument() || r.instrument.as_deref() == Some(instrument))
            .map(|r| r.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Deterministic BLAKE3 hex digest over the layout and every row.
    ///
    /// Strings are length-prefixed and optional or variant fields carry a tag
    /// byte, so adjacent fields cannot shift into one another.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();

        for column in self.layout.columns() {
            hash_str(&mut hasher, &column.name);
            hash_str(&mut hasher, &format!("{:?}", column.kind));
        }

        for row in &self.rows {
            match row.instrument.as_deref() {
                Some(id) => {
                    hasher.update(&[1]);
                    hash_str(&mut hasher, id);
                }
                None => {
                    hasher.update(&[0]);
                }
            }
            hash_str(&mut hasher, &row.date.to_string());
            for v in [row.open, row.high, row.low] {
                match v {
                    Some(v) => {
                        hasher.update(&[1]);
                        hasher.update(&v.to_le_bytes());
                    }
                    None => {
                        hasher.update(&[0]);
                    }
                }
            }
            hasher.update(&row.close.to_le_bytes());
            for extra in &row.extras {
                match extra {
                    FieldValue::Missing => {
                        hasher.update(&[0]);
                    }
                    FieldValue::Number(v) => {
                        hasher.update(&[1]);
                        hasher.update(&v.to_le_bytes());
                    }
                    FieldValue::Text(s) => {
                        hasher.update(&[2]);
                        hash_str(&mut hasher, s);
                    }
                }
            }
        }

        hasher.finalize().to_hex().to_string()
    }
}

fn hash_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}
