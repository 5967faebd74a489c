//! Row layout: the ordered column shape of a dataset.

use serde::{Deserialize, Serialize};

use super::dataset::DatasetError;

/// Role of a column in the row shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Instrument,
    Timestamp,
    Open,
    High,
    Low,
    Close,
    /// Pass-through column. The k-th `Extra` column maps to `Observation::extras[k]`.
    Extra,
}

impl ColumnKind {
    fn label(self) -> &'static str {
        match self {
            ColumnKind::Instrument => "instrument",
            ColumnKind::Timestamp => "timestamp",
            ColumnKind::Open => "open",
            ColumnKind::High => "high",
            ColumnKind::Low => "low",
            ColumnKind::Close => "close",
            ColumnKind::Extra => "extra",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered columns of a dataset row.
///
/// Exactly one `Timestamp` and one `Close` column; at most one of each other
/// standard column; any number of `Extra` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowLayout {
    columns: Vec<Column>,
}

impl RowLayout {
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        for kind in [
            ColumnKind::Instrument,
            ColumnKind::Timestamp,
            ColumnKind::Open,
            ColumnKind::High,
            ColumnKind::Low,
            ColumnKind::Close,
        ] {
            let count = columns.iter().filter(|c| c.kind == kind).count();
            if count > 1 {
                return Err(DatasetError::DuplicateColumn(kind.label()));
            }
            if count == 0 && matches!(kind, ColumnKind::Timestamp | ColumnKind::Close) {
                return Err(DatasetError::MissingColumn(kind.label()));
            }
        }
        Ok(Self { columns })
    }

    /// `instrument, timestamp, open, high, low, close` (instrument optional).
    pub fn standard(with_instrument: bool) -> Self {
        let mut columns = Vec::with_capacity(6);
        if with_instrument {
            columns.push(Column::new("instrument", ColumnKind::Instrument));
        }
        columns.extend([
            Column::new("timestamp", ColumnKind::Timestamp),
            Column::new("open", ColumnKind::Open),
            Column::new("high", ColumnKind::High),
            Column::new("low", ColumnKind::Low),
            Column::new("close", ColumnKind::Close),
        ]);
        Self { columns }
    }

    /// Append a pass-through column.
    pub fn with_extra(mut self, name: impl Into<String>) -> Self {
        self.columns.push(Column::new(name, ColumnKind::Extra));
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn has_instrument(&self) -> bool {
        self.columns.iter().any(|c| c.kind == ColumnKind::Instrument)
    }

    pub fn extra_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Extra)
            .count()
    }
}
