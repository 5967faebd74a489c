//! Domain types for tickview

pub mod dataset;
pub mod layout;
pub mod observation;
pub mod selection;

pub use dataset::{Dataset, DatasetError, IMPLICIT_INSTRUMENT};
pub use layout::{Column, ColumnKind, RowLayout};
pub use observation::{FieldValue, Observation};
pub use selection::{window_start, Selection, DEFAULT_WINDOW_WEEKS};
