//! Maintenance fluids (Holliday-Segar), rate adjustment, rehydration plans
//! and the bedside safety notes that go with them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_core::error::{CoreError, require_positive};
use tumbuh_core::round::to_whole;

use crate::error::CalcError;

pub const FEVER_FACTOR: f64 = 1.2;
pub const NPO_FACTOR: f64 = 0.75;

/// Daily maintenance requirement in ml, before any adjustment.
pub fn holliday_segar(weight_kg: f64) -> f64 {
    100.0 * weight_kg.min(10.0)
        + 50.0 * (weight_kg.min(20.0) - 10.0).max(0.0)
        + 20.0 * (weight_kg - 20.0).max(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaintenanceFluids {
    pub base_ml_per_day: u32,
    pub ml_per_day: u32,
    /// Derived from the rounded daily volume.
    pub ml_per_hour: u32,
    pub fever_adjusted: bool,
    pub npo_adjusted: bool,
}

/// Holliday-Segar with the fever and nil-by-mouth factors applied to the base.
pub fn maintenance(weight_kg: f64, fever: bool, npo: bool) -> Result<MaintenanceFluids, CalcError> {
    require_positive("weight_kg", weight_kg)?;

    let base = holliday_segar(weight_kg);
    let mut adjusted = base;
    if fever {
        adjusted *= FEVER_FACTOR;
    }
    if npo {
        adjusted *= NPO_FACTOR;
    }

    let ml_per_day = to_whole(adjusted);
    let result = MaintenanceFluids {
        base_ml_per_day: to_whole(base),
        ml_per_day,
        ml_per_hour: to_whole(f64::from(ml_per_day) / 24.0),
        fever_adjusted: fever,
        npo_adjusted: npo,
    };
    tracing::debug!(weight_kg, fever, npo, ml_per_day, "calculated maintenance fluids");
    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AdjustmentKind {
    Reduce,
    Increase,
    Maintain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateAdjustment {
    pub kind: AdjustmentKind,
    pub amount_ml_per_hour: u32,
    pub new_rate_ml_per_hour: u32,
    pub reason: String,
}

/// Largest change applied to the hourly rate, as a fraction of it.
const MAX_RATE_CHANGE: f64 = 0.25;
/// Deficits smaller than this are tolerated.
const DEFICIT_TOLERANCE_ML: f64 = -500.0;

/// Correct an hourly rate for a 24-hour fluid balance.
///
/// A positive balance is overload and reduces the rate; a deficit beyond
/// 500 ml increases it. Either change spreads the balance over 24 hours and
/// is limited to a quarter of the current rate.
pub fn rate_adjustment(hourly_rate_ml: u32, balance_ml: f64) -> Result<RateAdjustment, CalcError> {
    if !balance_ml.is_finite() {
        return Err(CoreError::invalid_input(
            "balance_ml",
            format!("{balance_ml} is not a finite number"),
        )
        .into());
    }
    let rate = f64::from(hourly_rate_ml);
    let limit = rate * MAX_RATE_CHANGE;

    let adjustment = if balance_ml > 0.0 {
        let change = (balance_ml / 24.0).min(limit);
        RateAdjustment {
            kind: AdjustmentKind::Reduce,
            amount_ml_per_hour: to_whole(change),
            new_rate_ml_per_hour: to_whole(rate - change),
            reason: "Kelebihan volume cairan".into(),
        }
    } else if balance_ml < DEFICIT_TOLERANCE_ML {
        let change = (balance_ml.abs() / 24.0).min(limit);
        RateAdjustment {
            kind: AdjustmentKind::Increase,
            amount_ml_per_hour: to_whole(change),
            new_rate_ml_per_hour: to_whole(rate + change),
            reason: "Defisit volume cairan".into(),
        }
    } else {
        RateAdjustment {
            kind: AdjustmentKind::Maintain,
            amount_ml_per_hour: 0,
            new_rate_ml_per_hour: hourly_rate_ml,
            reason: "Status volume sesuai".into(),
        }
    };
    Ok(adjustment)
}

/// Oral rehydration for some dehydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrsPlan {
    pub total_ml: u32,
    /// Volume for each of the four hours of the plan.
    pub per_hour_ml: u32,
    pub time_frame: String,
    pub interval: String,
}

pub fn ors_plan_b(weight_kg: f64) -> Result<OrsPlan, CalcError> {
    require_positive("weight_kg", weight_kg)?;
    let total = weight_kg * 75.0;
    Ok(OrsPlan {
        total_ml: to_whole(total),
        per_hour_ml: to_whole(total / 4.0),
        time_frame: "4 jam".into(),
        interval: "Sedikit-sedikit setiap 1-2 menit dengan sendok atau gelas".into(),
    })
}

/// Intravenous rehydration for severe dehydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IvPlan {
    pub bolus_ml: u32,
    pub bolus_minutes: u32,
    pub deficit_ml: u32,
    pub maintenance_ml_per_day: u32,
    pub total_first_day_ml: u32,
}

pub fn iv_plan_c(weight_kg: f64) -> Result<IvPlan, CalcError> {
    let maintenance = maintenance(weight_kg, false, false)?;
    let deficit = weight_kg * 100.0;
    Ok(IvPlan {
        bolus_ml: to_whole(weight_kg * 20.0),
        bolus_minutes: 30,
        deficit_ml: to_whole(deficit),
        maintenance_ml_per_day: maintenance.ml_per_day,
        total_first_day_ml: to_whole(deficit + f64::from(maintenance.ml_per_day)),
    })
}

pub fn clinical_notes(age_months: u32, fluids: &MaintenanceFluids) -> Vec<String> {
    let mut notes = Vec::new();
    if age_months < 12 {
        notes.push(
            "Monitor ketat untuk neonatus dan bayi - risiko hipoglikemia dan gangguan elektrolit"
                .to_string(),
        );
    }
    if age_months < 60 {
        notes.push("Hindari pemberian cairan berlebihan - risiko intoksikasi air".to_string());
    }
    if fluids.ml_per_hour < 10 {
        notes.push("Kebutuhan sangat rendah - periksa apakah ada kontraindikasi".to_string());
    }
    if fluids.ml_per_hour > 200 {
        notes.push("Kebutuhan tinggi - evaluasi kembali faktor demam/NPO".to_string());
    }
    notes.push("Pantau balance input-output setiap 8 jam".to_string());
    notes.push("Monitor berat jenis urine (target: 1.010-1.025)".to_string());
    notes.push("Sesuaikan berdasarkan klinis dan laboratorium".to_string());
    notes
}

/// Warnings about the current intake relative to maintenance. Intake
/// checks are skipped when intake is unknown.
pub fn fluid_red_flags(
    fluids: &MaintenanceFluids,
    intake_ml_per_day: Option<f64>,
    edema: bool,
) -> Vec<String> {
    let mut flags = Vec::new();
    let per_day = f64::from(fluids.ml_per_day);
    if let Some(intake) = intake_ml_per_day {
        if intake > per_day * 1.5 {
            flags.push("Intake berlebihan (>150% maintenance) - risiko overload".to_string());
        }
        if intake < per_day * 0.5 {
            flags.push("Intake kurang (<50% maintenance) - risiko dehidrasi".to_string());
        }
    }
    if edema {
        flags.push("Edema - evaluasi status volume dan fungsi jantung".to_string());
    }
    flags
}

pub fn contraindications(
    age_months: u32,
    fluids: &MaintenanceFluids,
    heart_failure: bool,
    renal_failure: bool,
) -> Vec<String> {
    let mut items = Vec::new();
    if heart_failure {
        items.push("Gagal jantung - batasi cairan dan monitor ketat".to_string());
    }
    if renal_failure {
        items.push("Gagal ginjal - risiko kelebihan volume".to_string());
    }
    if age_months < 7 && fluids.ml_per_day > 1000 {
        items.push("Kebutuhan tinggi pada bayi - evaluasi kebutuhan kalori".to_string());
    }
    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IvFluid {
    D5w,
    NormalSaline,
    D5Ns,
    D5HalfNs,
    RingerLactate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FluidInfo {
    pub fluid: IvFluid,
    pub name: String,
    pub composition: String,
    pub calories: String,
    pub indication: String,
    pub warnings: Vec<String>,
}

impl IvFluid {
    pub fn info(self) -> FluidInfo {
        let (name, composition, calories, indication, warnings): (_, _, _, _, &[&str]) =
            match self {
                IvFluid::D5w => (
                    "Dextrose 5% in Water",
                    "5% dextrose",
                    "170 cal/L",
                    "Kebutuhan cairan dasar tanpa elektrolit spesifik",
                    &[],
                ),
                IvFluid::NormalSaline => (
                    "Normal Saline (0.9% NaCl)",
                    "154 mEq/L Na+, 154 mEq/L Cl-",
                    "0 cal/L",
                    "Rehidrasi, defisit elektrolit",
                    &["Risiko hipernatremia", "Hindari pada gagal jantung"],
                ),
                IvFluid::D5Ns => (
                    "Dextrose 5% in Normal Saline",
                    "5% dextrose + 154 mEq/L NaCl",
                    "170 cal/L",
                    "Kebutuhan cairan dengan natrium",
                    &["Pantau fungsi jantung dan ginjal"],
                ),
                IvFluid::D5HalfNs => (
                    "Dextrose 5% in 1/2 Normal Saline",
                    "5% dextrose + 77 mEq/L NaCl",
                    "170 cal/L",
                    "Kebutuhan cairan dengan natrium moderat",
                    &["Monitor elektrolit serum"],
                ),
                IvFluid::RingerLactate => (
                    "Ringer's Lactate",
                    "130 mEq/L Na+, 4 mEq/L K+, 3 mEq/L Ca2+, 109 mEq/L Cl-, 28 mEq/L lactate",
                    "9 cal/L",
                    "Rehidrasi, asidosis metabolik",
                    &["Hindari pada hiperkalemia", "Monitor fungsi jantung"],
                ),
            };
        FluidInfo {
            fluid: self,
            name: name.to_string(),
            composition: composition.to_string(),
            calories: calories.to_string(),
            indication: indication.to_string(),
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Inputs for a full maintenance-fluid review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FluidInput {
    pub weight_kg: f64,
    pub age_months: u32,
    #[serde(default)]
    pub fever: bool,
    #[serde(default)]
    pub npo: bool,
    /// Current intake in ml per hour, if measured.
    #[serde(default)]
    pub intake_ml_per_hour: Option<f64>,
    #[serde(default)]
    pub fluid: Option<IvFluid>,
    #[serde(default)]
    pub heart_failure: bool,
    #[serde(default)]
    pub renal_failure: bool,
    #[serde(default)]
    pub edema: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FluidAssessment {
    pub maintenance: MaintenanceFluids,
    pub adjustment: Option<RateAdjustment>,
    pub clinical_notes: Vec<String>,
    pub contraindications: Vec<String>,
    pub red_flags: Vec<String>,
    pub fluid: Option<FluidInfo>,
}

pub fn assess(input: &FluidInput) -> Result<FluidAssessment, CalcError> {
    let fluids = maintenance(input.weight_kg, input.fever, input.npo)?;

    let intake_per_day = match input.intake_ml_per_hour {
        Some(hourly) if !hourly.is_finite() || hourly < 0.0 => {
            return Err(CoreError::invalid_input(
                "intake_ml_per_hour",
                format!("{hourly} must be a non-negative number"),
            )
            .into());
        }
        Some(hourly) => Some(hourly * 24.0),
        None => None,
    };

    let adjustment = intake_per_day
        .map(|intake| rate_adjustment(fluids.ml_per_hour, intake - f64::from(fluids.ml_per_day)))
        .transpose()?;

    Ok(FluidAssessment {
        adjustment,
        clinical_notes: clinical_notes(input.age_months, &fluids),
        contraindications: contraindications(
            input.age_months,
            &fluids,
            input.heart_failure,
            input.renal_failure,
        ),
        red_flags: fluid_red_flags(&fluids, intake_per_day, input.edema),
        fluid: input.fluid.map(IvFluid::info),
        maintenance: fluids,
    })
}
