//! CSV ingestion into a [`Dataset`].
//!
//! Header names are matched case-insensitively against [`ColumnNames`].
//! The date and close columns are required; instrument and OHL are optional;
//! every other column is carried through as an extra field.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::{
    Column, ColumnKind, Dataset, DatasetError, FieldValue, Observation, RowLayout,
};

/// Errors from reading a CSV dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid layout: {0}")]
    Layout(#[from] DatasetError),

    #[error("line {line}: cannot parse date '{value}' with format '{format}'")]
    InvalidDate {
        line: u64,
        value: String,
        format: String,
    },

    #[error("line {line}: column '{column}' is not a number: '{value}'")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },
}

/// Header names of the standard columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub date: String,
    pub instrument: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "Date".into(),
            instrument: "Ticker".into(),
            open: "Open".into(),
            high: "High".into(),
            low: "Low".into(),
            close: "Close".into(),
        }
    }
}

impl ColumnNames {
    fn classify(&self, header: &str) -> ColumnKind {
        let is = |name: &str| header.eq_ignore_ascii_case(name);
        if is(&self.date) {
            ColumnKind::Timestamp
        } else if is(&self.instrument) {
            ColumnKind::Instrument
        } else if is(&self.open) {
            ColumnKind::Open
        } else if is(&self.high) {
            ColumnKind::High
        } else if is(&self.low) {
            ColumnKind::Low
        } else if is(&self.close) {
            ColumnKind::Close
        } else {
            ColumnKind::Extra
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// `chrono` format of the date column.
    pub date_format: String,
    pub columns: ColumnNames,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            date_format: "%d/%m/%Y".into(),
            columns: ColumnNames::default(),
        }
    }
}

/// Load a dataset from a CSV file.
pub fn load_csv(path: &Path, opts: &CsvOptions) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = read_csv(file, opts)?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        instruments = dataset.instruments().len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Read a dataset from any CSV source with a header row.
pub fn read_csv<R: io::Read>(reader: R, opts: &CsvOptions) -> Result<Dataset, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<Column> = rdr
        .headers()?
        .iter()
        .map(|h| Column::new(h, opts.columns.classify(h)))
        .collect();
    let layout = RowLayout::new(columns)?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        rows.push(parse_row(&layout, &record, line, opts)?);
    }

    Ok(Dataset::new(layout, rows)?)
}

fn parse_row(
    layout: &RowLayout,
    record: &csv::StringRecord,
    line: u64,
    opts: &CsvOptions,
) -> Result<Observation, LoadError> {
    let mut instrument = None;
    let mut date = None;
    let mut close = None;
    let (mut open, mut high, mut low) = (None, None, None);
    let mut extras = Vec::with_capacity(layout.extra_count());

    for (column, raw) in layout.columns().iter().zip(record.iter()) {
        match column.kind {
            ColumnKind::Instrument => {
                instrument = (!raw.is_empty()).then(|| raw.to_string());
            }
            ColumnKind::Timestamp => {
                let parsed = NaiveDate::parse_from_str(raw, &opts.date_format).map_err(|_| {
                    LoadError::InvalidDate {
                        line,
                        value: raw.to_string(),
                        format: opts.date_format.clone(),
                    }
                })?;
                date = Some(parsed);
            }
            ColumnKind::Open => open = parse_optional(raw, &column.name, line)?,
            ColumnKind::High => high = parse_optional(raw, &column.name, line)?,
            ColumnKind::Low => low = parse_optional(raw, &column.name, line)?,
            ColumnKind::Close => close = parse_optional(raw, &column.name, line)?,
            ColumnKind::Extra => extras.push(FieldValue::parse(raw)),
        }
    }

    let invalid = |column: ColumnKind, value: &str| LoadError::InvalidNumber {
        line,
        column: layout
            .columns()
            .iter()
            .find(|c| c.kind == column)
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        value: value.to_string(),
    };
    let date = date.ok_or_else(|| LoadError::InvalidDate {
        line,
        value: String::new(),
        format: opts.date_format.clone(),
    })?;
    let close = close.ok_or_else(|| invalid(ColumnKind::Close, ""))?;

    Ok(Observation {
        instrument,
        date,
        open,
        high,
        low,
        close,
        extras,
    })
}

fn parse_optional(raw: &str, column: &str, line: u64) -> Result<Option<f64>, LoadError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| LoadError::InvalidNumber {
            line,
            column: column.to_string(),
            value: raw.to_string(),
        })
}
