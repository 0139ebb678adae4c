//! Dehydration screening for children with diarrhea.
//!
//! Seven clinical sign groups are scored 0-2 each. Heart rate is optional;
//! the other six are required. The total selects management plan A, B or C
//! and the matching fluid plan.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_calc::dosing::{AgeBandedDose, DoseCalculation, MedicationId, calculate_dose};
use tumbuh_calc::error::CalcError;
use tumbuh_calc::fluids::{IvPlan, OrsPlan, iv_plan_c, ors_plan_b};
use tumbuh_core::error::require_positive;
use tumbuh_core::models::tier::{ColorTag, SeverityTier, TierResolution, TierTable};

use crate::Screening;
use crate::error::ScoringError;
use crate::groups::{GroupScore, SignCatalog, SignGroup};
use crate::screenings::TierText;

/// Temperature at or above which fever is listed as a danger sign.
pub const HIGH_FEVER_C: f64 = 38.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ManagementPlan {
    A,
    B,
    C,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DehydrationInput {
    pub age_months: u32,
    pub weight_kg: f64,
    #[serde(default)]
    pub temperature_c: Option<f64>,
    /// Loose stools so far today.
    #[serde(default)]
    pub stools_today: Option<u32>,
    /// Selected option index per sign group key.
    pub signs: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "plan", rename_all = "snake_case")]
#[ts(export)]
pub enum FluidPlan {
    /// Home fluids plus ORS after each loose stool.
    Home {
        ors_per_stool_ml: Option<f64>,
        ors_today_ml: Option<f64>,
    },
    Oral(OrsPlan),
    Intravenous(IvPlan),
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct OrsInfo {
    pub composition: Vec<(String, String)>,
    pub preparation: String,
    pub storage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct DehydrationReport {
    pub score: GroupScore,
    pub tier: TierResolution,
    pub plan: ManagementPlan,
    pub fluid_requirement: String,
    pub fluid_plan: FluidPlan,
    pub zinc: Option<AgeBandedDose>,
    pub danger_signs: Vec<String>,
    pub ors_info: OrsInfo,
}

#[derive(Debug, Clone)]
pub struct Dehydration {
    signs: SignCatalog,
    tiers: TierTable,
    /// Clinical danger signs listed for each tier key.
    tier_danger_signs: BTreeMap<String, Vec<String>>,
}

impl Dehydration {
    pub fn new() -> Result<Self, ScoringError> {
        let tiers = tier_table()?;
        let mut tier_danger_signs = BTreeMap::new();
        for (key, signs) in TIER_DANGER_SIGNS {
            if tiers.get(key).is_none() {
                return Err(ScoringError::InvalidCatalog(format!(
                    "danger signs for unknown tier '{key}'"
                )));
            }
            tier_danger_signs.insert(key.to_string(), signs.iter().map(|s| s.to_string()).collect());
        }
        Ok(Self {
            signs: SignCatalog::new(sign_groups())?,
            tiers,
            tier_danger_signs,
        })
    }

    pub fn signs(&self) -> &SignCatalog {
        &self.signs
    }

    /// Danger signs that come with a tier; empty for tiers without any.
    pub fn danger_signs_for(&self, tier_key: &str) -> &[String] {
        self.tier_danger_signs
            .get(tier_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn assess(&self, input: &DehydrationInput) -> Result<DehydrationReport, ScoringError> {
        require_positive("weight_kg", input.weight_kg)?;
        if let Some(t) = input.temperature_c {
            require_positive("temperature_c", t)?;
        }

        let score = self.signs.score(&input.signs)?;
        let tier = self.tiers.resolve_with(score.total_points, std::iter::empty())?;
        let plan = plan_for(&tier.tier);

        let (fluid_requirement, fluid_plan) = match plan {
            ManagementPlan::A => {
                let per_stool = ors_per_stool(input)?;
                (
                    "Lanjutkan makan dan tingkatkan asupan cairan",
                    FluidPlan::Home {
                        ors_per_stool_ml: per_stool,
                        ors_today_ml: per_stool
                            .zip(input.stools_today)
                            .map(|(ml, stools)| ml * f64::from(stools)),
                    },
                )
            }
            ManagementPlan::B => (
                "Oralit 75 ml/kg dalam 4 jam, lalu evaluasi ulang",
                FluidPlan::Oral(ors_plan_b(input.weight_kg)?),
            ),
            ManagementPlan::C => (
                "Cairan intravena segera, lalu evaluasi ulang",
                FluidPlan::Intravenous(iv_plan_c(input.weight_kg)?),
            ),
        };

        let mut danger_signs = Vec::new();
        if input.age_months < 3 {
            danger_signs.push("Usia < 3 bulan".to_string());
        }
        if input.temperature_c.is_some_and(|t| t >= HIGH_FEVER_C) {
            danger_signs.push("Demam tinggi (≥38.5°C)".to_string());
        }
        if plan == ManagementPlan::C {
            danger_signs.push("Dehidrasi berat".to_string());
        }
        danger_signs.extend(self.danger_signs_for(&tier.tier.key).iter().cloned());

        tracing::debug!(
            points = score.total_points,
            ?plan,
            danger_signs = danger_signs.len(),
            "assessed dehydration"
        );

        Ok(DehydrationReport {
            score,
            plan,
            fluid_requirement: fluid_requirement.to_string(),
            fluid_plan,
            zinc: zinc_for(input.weight_kg, input.age_months)?,
            danger_signs,
            ors_info: ors_info(),
            tier,
        })
    }
}

impl Screening for Dehydration {
    fn id(&self) -> &str {
        "dehydration"
    }

    fn name(&self) -> &str {
        "Skrining Dehidrasi & Diare"
    }

    fn tiers(&self) -> &TierTable {
        &self.tiers
    }
}

fn plan_for(tier: &SeverityTier) -> ManagementPlan {
    match tier.key.as_str() {
        "none" => ManagementPlan::A,
        "some" => ManagementPlan::B,
        _ => ManagementPlan::C,
    }
}

fn ors_per_stool(input: &DehydrationInput) -> Result<Option<f64>, ScoringError> {
    match calculate_dose(MedicationId::Ors, input.weight_kg, Some(input.age_months)) {
        Ok(DoseCalculation::AgeBanded(dose)) => Ok(Some(dose.amount)),
        Ok(DoseCalculation::WeightBased(_)) | Err(CalcError::NoDosingBand { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn zinc_for(weight_kg: f64, age_months: u32) -> Result<Option<AgeBandedDose>, ScoringError> {
    match calculate_dose(MedicationId::Zinc, weight_kg, Some(age_months)) {
        Ok(DoseCalculation::AgeBanded(dose)) => Ok(Some(dose)),
        Ok(DoseCalculation::WeightBased(_)) | Err(CalcError::NoDosingBand { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn sign_groups() -> Vec<SignGroup> {
    vec![
        SignGroup::ordinal(
            "general_condition",
            "Kondisi umum",
            true,
            &["Normal/Siap", "Haus/Gelisah", "Letargis/Tidak sadar"],
        ),
        SignGroup::ordinal("eyes", "Mata", true, &["Normal", "Cekung", "Sangat cekung"]),
        SignGroup::ordinal("tears", "Air mata", true, &["Ada", "Berkurang", "Tidak ada"]),
        SignGroup::ordinal("mouth_tongue", "Mulut & lidah", true, &["Lembab", "Lengket", "Kering"]),
        SignGroup::ordinal(
            "skin_turgor",
            "Turgor kulit",
            true,
            &["Normal", "Lambat", "Sangat lambat"],
        ),
        SignGroup::ordinal("breathing", "Pernapasan", true, &["Normal", "Cepat", "Cepat & dalam"]),
        SignGroup::ordinal(
            "heart_rate",
            "Denyut jantung",
            false,
            &["Normal", "Meningkat", "Sangat meningkat"],
        ),
    ]
}

const TIER_DANGER_SIGNS: [(&str, &[&str]); 1] =
    [("severe", &["Letargis", "Tidak bisa minum", "Kejang"])];

fn tier_table() -> Result<TierTable, ScoringError> {
    let tiers: Vec<SeverityTier> = vec![
        TierText {
            key: "none",
            label: "Tanpa Dehidrasi",
            color: ColorTag::Good,
            min: 0,
            max: Some(4),
            action: "Rencana A: terapi di rumah",
            timeline: "Kontrol bila tidak membaik dalam 3 hari",
            description: "Anak terlihat aktif dan memiliki tanda dehidrasi minimal.",
            advice: &[],
        }
        .into(),
        TierText {
            key: "some",
            label: "Dehidrasi Ringan-Sedang",
            color: ColorTag::Warn,
            min: 5,
            max: Some(8),
            action: "Rencana B: rehidrasi oral di fasilitas kesehatan",
            timeline: "Evaluasi ulang setelah 4 jam",
            description: "Anak memiliki beberapa tanda dehidrasi dan perlu penanganan dengan oralit.",
            advice: &[],
        }
        .into(),
        TierText {
            key: "severe",
            label: "Dehidrasi Berat",
            color: ColorTag::Bad,
            min: 9,
            max: None,
            action: "Rencana C: cairan intravena dan rujuk",
            timeline: "Segera",
            description: "Anak memiliki tanda dehidrasi berat dan memerlukan penanganan segera.",
            advice: &["Berikan cairan intravena segera", "Rujuk ke fasilitas kesehatan"],
        }
        .into(),
    ];
    Ok(TierTable::new(tiers)?)
}

fn ors_info() -> OrsInfo {
    let composition = [
        ("Natrium", "75 mEq/L"),
        ("Glukosa", "75 mmol/L"),
        ("Kalium", "20 mEq/L"),
        ("Klorida", "65 mEq/L"),
        ("Sitrat", "10 mmol/L"),
    ];
    OrsInfo {
        composition: composition
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        preparation: "Larutkan satu bungkus dalam 200 ml air minum matang (tidak lebih, tidak kurang)"
            .into(),
        storage: "Habiskan dalam 24 jam bila disimpan dingin, dalam 6 jam bila di suhu panas".into(),
    }
}
