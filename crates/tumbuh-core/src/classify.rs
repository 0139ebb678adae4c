//! Ordered-boundary classification.
//!
//! A measurement is placed into a band by counting how many ascending
//! boundaries it has reached. A boundary equal to the value counts as
//! reached, so `band_index(&[1.0, 2.0], 2.0) == 2`.

use crate::error::CoreError;

/// Number of boundaries that are `<= value`.
///
/// Returns an index in `0..=boundaries.len()`. Boundaries are assumed
/// ascending; use [`check_ascending`] when they come from outside data.
pub fn band_index(boundaries: &[f64], value: f64) -> Result<usize, CoreError> {
    if boundaries.is_empty() {
        return Err(CoreError::EmptyBoundaries);
    }
    if !value.is_finite() {
        return Err(CoreError::invalid_input(
            "value",
            format!("{value} is not a finite number"),
        ));
    }
    Ok(boundaries.partition_point(|b| *b <= value))
}

/// Verify that boundaries are non-empty, finite, and strictly ascending.
pub fn check_ascending(boundaries: &[f64]) -> Result<(), CoreError> {
    if boundaries.is_empty() {
        return Err(CoreError::EmptyBoundaries);
    }
    if let Some(bad) = boundaries.iter().find(|b| !b.is_finite()) {
        return Err(CoreError::UnorderedBoundaries(format!(
            "non-finite boundary {bad}"
        )));
    }
    if let Some(pair) = boundaries.windows(2).find(|w| w[0] >= w[1]) {
        return Err(CoreError::UnorderedBoundaries(format!(
            "{} is not below {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// Boundaries paired with one payload per band.
///
/// `bands[i]` describes values with `boundaries[i - 1] <= value < boundaries[i]`,
/// open at both ends.
#[derive(Debug, Clone)]
pub struct BandTable<T> {
    boundaries: Vec<f64>,
    bands: Vec<T>,
}

impl<T> BandTable<T> {
    pub fn new(boundaries: Vec<f64>, bands: Vec<T>) -> Result<Self, CoreError> {
        check_ascending(&boundaries)?;
        if bands.len() != boundaries.len() + 1 {
            return Err(CoreError::BandArity {
                boundaries: boundaries.len(),
                bands: bands.len(),
            });
        }
        Ok(Self { boundaries, bands })
    }

    pub fn classify(&self, value: f64) -> Result<(usize, &T), CoreError> {
        let index = band_index(&self.boundaries, value)?;
        Ok((index, &self.bands[index]))
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }
}
