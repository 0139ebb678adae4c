use std::fmt;

use jiff::Unit;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Sex as used to key the growth reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sex {
    Boy,
    Girl,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Boy => "boy",
            Sex::Girl => "girl",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age of a patient in completed months and in days.
///
/// Screenings key on different units: growth tables and KPSP use months,
/// fever thresholds use days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientAge {
    pub months: u32,
    pub days: u32,
}

impl PatientAge {
    /// Month length used when only a month count is known.
    pub const DAYS_PER_MONTH: u32 = 30;

    pub fn from_months(months: u32) -> Result<Self, CoreError> {
        let days = months.checked_mul(Self::DAYS_PER_MONTH).ok_or_else(|| {
            CoreError::invalid_input("age_months", format!("{months} months is out of range"))
        })?;
        Ok(Self { months, days })
    }

    pub fn from_days(days: u32) -> Self {
        Self {
            months: days / Self::DAYS_PER_MONTH,
            days,
        }
    }

    /// Calendar age on `on` for a child born on `birth`.
    pub fn between(birth: Date, on: Date) -> Result<Self, CoreError> {
        if on < birth {
            return Err(CoreError::invalid_input(
                "birth_date",
                format!("{birth} is after the assessment date {on}"),
            ));
        }
        let months = birth.until((Unit::Month, on))?.get_months();
        let days = birth.until((Unit::Day, on))?.get_days();
        Ok(Self {
            months: months.max(0) as u32,
            days: days.max(0) as u32,
        })
    }
}
