//! tickview core: price history derivation for a single instrument view.
//!
//! Given a read-only [`domain::Dataset`] and a viewer's [`domain::Selection`],
//! the pipeline derives:
//! - the filtered, date-sorted series
//! - latest close, change and percent change versus the prior row
//! - candlestick points with a 7-row moving-average overlay
//! - a formatted snapshot of the most recent row
//!
//! [`view::ExplorerView`] wraps the pipeline in a per-viewer recomputation
//! scope. Loading (CSV, synthetic) and configuration live in [`data`] and
//! [`config`].

pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod pipeline;
pub mod view;
