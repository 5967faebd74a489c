//! Dataset sources: CSV files and deterministic synthetic data.

pub mod csv_loader;
pub mod synthetic;

pub use csv_loader::{load_csv, read_csv, ColumnNames, CsvOptions, LoadError};
pub use synthetic::synthetic_dataset;
