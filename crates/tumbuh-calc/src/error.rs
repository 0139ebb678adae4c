use thiserror::Error;
use tumbuh_core::error::CoreError;

use crate::dosing::MedicationId;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{medication:?} is not given below {min_age_months} months (patient is {age_months} months)")]
    BelowMinimumAge {
        medication: MedicationId,
        min_age_months: u32,
        age_months: u32,
    },

    #[error("{medication:?} has no dosing band for {age_months} months")]
    NoDosingBand {
        medication: MedicationId,
        age_months: u32,
    },

    #[error("{0:?} is dosed by age; the patient's age is required")]
    AgeRequired(MedicationId),
}
