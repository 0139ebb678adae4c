use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_core::error::require_positive;
use tumbuh_core::round::to_tenth;

use crate::error::CalcError;

/// Elemental iron ceiling, mg/day.
pub const MAX_DAILY_IRON_MG: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IronIndication {
    Prevention,
    Treatment,
}

impl IronIndication {
    pub fn mg_per_kg(&self) -> f64 {
        match self {
            IronIndication::Prevention => 1.0,
            IronIndication::Treatment => 3.0,
        }
    }

    pub fn duration(&self) -> &'static str {
        match self {
            IronIndication::Prevention => "1-2 bulan",
            IronIndication::Treatment => "3 bulan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IronPlan {
    pub indication: IronIndication,
    pub mg_per_kg: f64,
    pub daily_dose_mg: f64,
    pub capped: bool,
    pub frequency: String,
    pub duration: String,
    pub advice: String,
}

/// Daily elemental iron for a weight, limited to [`MAX_DAILY_IRON_MG`].
pub fn iron_plan(weight_kg: f64, indication: IronIndication) -> Result<IronPlan, CalcError> {
    require_positive("weight_kg", weight_kg)?;
    let dose = weight_kg * indication.mg_per_kg();
    let capped = dose > MAX_DAILY_IRON_MG;
    if capped {
        tracing::warn!(weight_kg, ?indication, "iron dose limited to daily maximum");
    }
    Ok(IronPlan {
        indication,
        mg_per_kg: indication.mg_per_kg(),
        daily_dose_mg: to_tenth(dose.min(MAX_DAILY_IRON_MG)),
        capped,
        frequency: "1x sehari".into(),
        duration: indication.duration().into(),
        advice: "Minum zat besi saat perut kosong atau dengan sedikit makanan. \
                 Tinja dapat berwarna hitam, hal ini normal."
            .into(),
    })
}
