//! Pediatric medication dosing.
//!
//! Each medication carries one closed [`DosingRule`]: either mg/kg with
//! optional absolute ceilings, or a fixed amount per age band.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_core::error::require_positive;
use tumbuh_core::round::to_tenth;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MedicationId {
    Paracetamol,
    Ibuprofen,
    Amoxicillin,
    Ors,
    Zinc,
}

impl MedicationId {
    pub const ALL: [MedicationId; 5] = [
        MedicationId::Paracetamol,
        MedicationId::Ibuprofen,
        MedicationId::Amoxicillin,
        MedicationId::Ors,
        MedicationId::Zinc,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DoseUnit {
    Mg,
    Ml,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgeBand {
    pub min_age_months: u32,
    pub max_age_months: u32,
    pub amount: f64,
    pub frequency: String,
}

impl AgeBand {
    pub fn contains(&self, age_months: u32) -> bool {
        (self.min_age_months..=self.max_age_months).contains(&age_months)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum DosingRule {
    WeightBased {
        per_dose_mg_per_kg: f64,
        per_day_mg_per_kg: f64,
        per_dose_cap_mg: Option<f64>,
        per_day_cap_mg: Option<f64>,
    },
    AgeBanded {
        bands: Vec<AgeBand>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FormulationKind {
    /// Strength is mg per ml.
    Liquid,
    /// Strength is mg per tablet or capsule.
    Solid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Formulation {
    pub name: String,
    pub kind: FormulationKind,
    pub strength_mg: f64,
}

impl Formulation {
    fn liquid(name: &str, mg_per_ml: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: FormulationKind::Liquid,
            strength_mg: mg_per_ml,
        }
    }

    fn solid(name: &str, mg_per_unit: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: FormulationKind::Solid,
            strength_mg: mg_per_unit,
        }
    }

    /// Millilitres (or tablets) that deliver `dose_mg`, to one decimal.
    pub fn amount_for(&self, dose_mg: f64) -> FormulationAmount {
        FormulationAmount {
            formulation: self.name.clone(),
            kind: self.kind,
            amount: volume_ml(dose_mg, self.strength_mg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormulationAmount {
    pub formulation: String,
    pub kind: FormulationKind,
    pub amount: f64,
}

/// Liquid volume for a dose at a given concentration, to 0.1 ml.
pub fn volume_ml(dose_mg: f64, mg_per_ml: f64) -> f64 {
    to_tenth(dose_mg / mg_per_ml)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
    pub unit: DoseUnit,
    pub rule: DosingRule,
    pub min_age_months: Option<u32>,
    pub frequency: String,
    /// Absolute daily ceiling for age-banded medications.
    pub max_daily_amount: Option<f64>,
    pub contraindications: Vec<String>,
    pub notes: String,
    pub formulations: Vec<Formulation>,
}

static FORMULARY: LazyLock<Vec<Medication>> =
    LazyLock::new(|| MedicationId::ALL.iter().map(|id| definition(*id)).collect());

/// Every medication, in [`MedicationId::ALL`] order.
pub fn formulary() -> &'static [Medication] {
    &FORMULARY
}

pub fn medication(id: MedicationId) -> &'static Medication {
    &FORMULARY[id as usize]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn definition(id: MedicationId) -> Medication {
    match id {
        MedicationId::Paracetamol => Medication {
            id,
            name: "Parasetamol".into(),
            unit: DoseUnit::Mg,
            rule: DosingRule::WeightBased {
                per_dose_mg_per_kg: 15.0,
                per_day_mg_per_kg: 75.0,
                per_dose_cap_mg: Some(500.0),
                per_day_cap_mg: Some(4000.0),
            },
            min_age_months: None,
            frequency: "Setiap 4-6 jam jika perlu".into(),
            max_daily_amount: None,
            contraindications: strings(&["Alergi parasetamol", "Gangguan hati berat"]),
            notes: "Jangan melebihi 5 dosis per hari.".into(),
            formulations: vec![
                Formulation::liquid("Sirup 120mg/5ml", 24.0),
                Formulation::liquid("Sirup 250mg/5ml", 50.0),
                Formulation::solid("Tablet 500mg", 500.0),
            ],
        },
        MedicationId::Ibuprofen => Medication {
            id,
            name: "Ibuprofen".into(),
            unit: DoseUnit::Mg,
            rule: DosingRule::WeightBased {
                per_dose_mg_per_kg: 10.0,
                per_day_mg_per_kg: 40.0,
                per_dose_cap_mg: Some(400.0),
                per_day_cap_mg: Some(2400.0),
            },
            min_age_months: Some(6),
            frequency: "Setiap 6-8 jam jika perlu".into(),
            max_daily_amount: None,
            contraindications: strings(&[
                "Usia < 6 bulan",
                "Alergi NSAID",
                "Dehidrasi",
                "Gangguan ginjal",
            ]),
            notes: "Jangan berikan pada bayi < 6 bulan tanpa anjuran dokter.".into(),
            formulations: vec![
                Formulation::liquid("Sirup 100mg/5ml", 20.0),
                Formulation::solid("Tablet 200mg", 200.0),
            ],
        },
        MedicationId::Amoxicillin => Medication {
            id,
            name: "Amoksisilin".into(),
            unit: DoseUnit::Mg,
            rule: DosingRule::WeightBased {
                per_dose_mg_per_kg: 25.0,
                per_day_mg_per_kg: 90.0,
                per_dose_cap_mg: None,
                per_day_cap_mg: None,
            },
            min_age_months: None,
            frequency: "Setiap 12 jam".into(),
            max_daily_amount: None,
            contraindications: strings(&["Alergi penisilin"]),
            notes: "Untuk infeksi bakteri. Selalu habiskan antibiotik sesuai anjuran.".into(),
            formulations: vec![
                Formulation::liquid("Sirup 125mg/5ml", 25.0),
                Formulation::liquid("Sirup 250mg/5ml", 50.0),
                Formulation::solid("Kapsul 250mg", 250.0),
            ],
        },
        MedicationId::Ors => Medication {
            id,
            name: "Oralit (ORS)".into(),
            unit: DoseUnit::Ml,
            rule: DosingRule::AgeBanded {
                bands: vec![
                    age_band(0, 2, 50.0, "Setiap kali buang air besar cair"),
                    age_band(3, 11, 100.0, "Setiap kali buang air besar cair"),
                    age_band(12, 71, 100.0, "Setiap kali buang air besar cair"),
                ],
            },
            min_age_months: None,
            frequency: "Setiap kali buang air besar cair".into(),
            max_daily_amount: None,
            contraindications: strings(&["Muntah terus-menerus", "Usia < 1 bulan (konsultasi)"]),
            notes: "Untuk menggantikan cairan yang hilang karena diare atau muntah.".into(),
            formulations: Vec::new(),
        },
        MedicationId::Zinc => Medication {
            id,
            name: "Zinc".into(),
            unit: DoseUnit::Mg,
            rule: DosingRule::AgeBanded {
                bands: vec![age_band(6, 71, 10.0, "1x sehari selama 10-14 hari")],
            },
            min_age_months: None,
            frequency: "1x sehari selama 10-14 hari".into(),
            max_daily_amount: Some(20.0),
            contraindications: Vec::new(),
            notes: "Untuk diare akut. Berikan 10-14 hari meskipun diare sudah berhenti.".into(),
            formulations: vec![
                Formulation::liquid("Sirup 10mg/5ml", 2.0),
                Formulation::solid("Tablet kunyah 10mg", 10.0),
            ],
        },
    }
}

fn age_band(min: u32, max: u32, amount: f64, frequency: &str) -> AgeBand {
    AgeBand {
        min_age_months: min,
        max_age_months: max,
        amount,
        frequency: frequency.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeightBasedDose {
    pub medication: MedicationId,
    pub name: String,
    pub weight_kg: f64,
    pub single_dose_mg: f64,
    pub single_dose_capped: bool,
    pub daily_dose_mg: f64,
    pub daily_dose_capped: bool,
    pub frequency: String,
    /// Amount of each formulation that delivers one single dose.
    pub formulations: Vec<FormulationAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AgeBandedDose {
    pub medication: MedicationId,
    pub name: String,
    pub age_months: u32,
    pub amount: f64,
    pub unit: DoseUnit,
    pub frequency: String,
    pub max_daily_amount: Option<f64>,
    pub formulations: Vec<FormulationAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum DoseCalculation {
    WeightBased(WeightBasedDose),
    AgeBanded(AgeBandedDose),
}

/// Dose for one medication.
///
/// The minimum-age check applies whenever an age is supplied; age-banded
/// medications require one.
pub fn calculate_dose(
    id: MedicationId,
    weight_kg: f64,
    age_months: Option<u32>,
) -> Result<DoseCalculation, CalcError> {
    require_positive("weight_kg", weight_kg)?;
    let med = medication(id);

    if let (Some(min_age_months), Some(age_months)) = (med.min_age_months, age_months)
        && age_months < min_age_months
    {
        return Err(CalcError::BelowMinimumAge {
            medication: id,
            min_age_months,
            age_months,
        });
    }

    let dose = match &med.rule {
        DosingRule::WeightBased {
            per_dose_mg_per_kg,
            per_day_mg_per_kg,
            per_dose_cap_mg,
            per_day_cap_mg,
        } => {
            let (single, single_capped) = capped(weight_kg * per_dose_mg_per_kg, *per_dose_cap_mg);
            let (daily, daily_capped) = capped(weight_kg * per_day_mg_per_kg, *per_day_cap_mg);
            if single_capped || daily_capped {
                tracing::warn!(
                    medication = ?id,
                    weight_kg,
                    single_capped,
                    daily_capped,
                    "dose limited by absolute ceiling"
                );
            }
            let single_dose_mg = to_tenth(single);
            DoseCalculation::WeightBased(WeightBasedDose {
                medication: id,
                name: med.name.clone(),
                weight_kg,
                single_dose_mg,
                single_dose_capped: single_capped,
                daily_dose_mg: to_tenth(daily),
                daily_dose_capped: daily_capped,
                frequency: med.frequency.clone(),
                formulations: med
                    .formulations
                    .iter()
                    .map(|f| f.amount_for(single_dose_mg))
                    .collect(),
            })
        }
        DosingRule::AgeBanded { bands } => {
            let age_months = age_months.ok_or(CalcError::AgeRequired(id))?;
            let band = bands
                .iter()
                .find(|b| b.contains(age_months))
                .ok_or(CalcError::NoDosingBand {
                    medication: id,
                    age_months,
                })?;
            let formulations = match med.unit {
                DoseUnit::Mg => med
                    .formulations
                    .iter()
                    .map(|f| f.amount_for(band.amount))
                    .collect(),
                DoseUnit::Ml => Vec::new(),
            };
            DoseCalculation::AgeBanded(AgeBandedDose {
                medication: id,
                name: med.name.clone(),
                age_months,
                amount: band.amount,
                unit: med.unit,
                frequency: band.frequency.clone(),
                max_daily_amount: med.max_daily_amount,
                formulations,
            })
        }
    };

    tracing::debug!(medication = ?id, weight_kg, ?age_months, "calculated dose");
    Ok(dose)
}

fn capped(value: f64, cap: Option<f64>) -> (f64, bool) {
    match cap {
        Some(cap) if value > cap => (cap, true),
        _ => (value, false),
    }
}
