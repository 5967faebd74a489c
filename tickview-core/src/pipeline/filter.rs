//! Filter stage: the working subset of the dataset for one selection.

use tracing::debug;

use crate::domain::{Dataset, Observation, RowLayout, Selection};

/// Rows matching a selection, ascending by date.
///
/// Borrows from the dataset; rebuilt on every selection change, never
/// edited in place. Rows with equal dates keep their load order.
#[derive(Debug, Clone)]
pub struct FilteredSeries<'a> {
    layout: &'a RowLayout,
    rows: Vec<&'a Observation>,
}

/// Keep rows of `selection.instrument` (when the dataset has an instrument
/// column) dated within `[selection.start, selection.end]`, sorted by date.
///
/// Unknown instruments and inverted ranges produce an empty series.
pub fn filter<'a>(dataset: &'a Dataset, selection: &Selection) -> FilteredSeries<'a> {
    let series = select_rows(dataset.layout(), dataset.rows().iter(), selection);
    debug!(
        instrument = %selection.instrument,
        start = %selection.start,
        end = %selection.end,
        rows = series.len(),
        "filtered dataset"
    );
    series
}

fn select_rows<'a>(
    layout: &'a RowLayout,
    rows: impl Iterator<Item = &'a Observation>,
    selection: &Selection,
) -> FilteredSeries<'a> {
    let by_instrument = layout.has_instrument();
    let mut rows: Vec<&Observation> = rows
        .filter(|obs| {
            !by_instrument || obs.instrument.as_deref() == Some(selection.instrument.as_str())
        })
        .filter(|obs| selection.contains(obs.date))
        .collect();
    // sort_by_key is stable
    rows.sort_by_key(|obs| obs.date);
    FilteredSeries { layout, rows }
}

impl<'a> FilteredSeries<'a> {
    /// Apply `selection` to this series' own rows.
    pub fn refilter(&self, selection: &Selection) -> FilteredSeries<'a> {
        select_rows(self.layout, self.rows.iter().copied(), selection)
    }

    pub fn layout(&self) -> &'a RowLayout {
        self.layout
    }

    pub fn rows(&self) -> &[&'a Observation] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Most recent observation.
    pub fn last(&self) -> Option<&'a Observation> {
        self.rows.last().copied()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|obs| obs.close).collect()
    }
}
