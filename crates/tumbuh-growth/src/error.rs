use thiserror::Error;
use tumbuh_core::error::CoreError;
use tumbuh_core::models::patient::Sex;

use crate::labels::IndexFamily;

#[derive(Debug, Error)]
pub enum GrowthError {
    #[error("no {family} reference data for {sex} at key {key}")]
    Lookup {
        sex: Sex,
        family: IndexFamily,
        key: String,
    },

    #[error("invalid reference data: {0}")]
    InvalidReference(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
