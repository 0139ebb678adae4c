use thiserror::Error;
use tumbuh_calc::error::CalcError;
use tumbuh_core::error::CoreError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("incomplete assessment: no selection for {}", missing.join(", "))]
    IncompleteAssessment { missing: Vec<String> },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("not found: {0}")]
    Lookup(String),

    #[error("selection {index} for '{group}' is out of range ({options} options)")]
    SelectionOutOfRange {
        group: String,
        index: usize,
        options: usize,
    },

    #[error("unknown screening: {0}")]
    UnknownScreening(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
