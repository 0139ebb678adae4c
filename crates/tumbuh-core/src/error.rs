use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no boundaries to classify against")]
    EmptyBoundaries,

    #[error("boundaries must be finite and ascending: {0}")]
    UnorderedBoundaries(String),

    #[error("band table has {bands} bands for {boundaries} boundaries (expected boundaries + 1)")]
    BandArity { boundaries: usize, bands: usize },

    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("invalid tier table: {0}")]
    InvalidTiers(String),

    #[error("unknown tier: {0}")]
    UnknownTier(String),

    #[error("date error: {0}")]
    Date(#[from] jiff::Error),
}

impl CoreError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Reject non-finite and non-positive measurements.
pub fn require_positive(field: &str, value: f64) -> Result<f64, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::invalid_input(field, format!("{value} is not a finite number")));
    }
    if value <= 0.0 {
        return Err(CoreError::invalid_input(field, format!("{value} must be greater than zero")));
    }
    Ok(value)
}
