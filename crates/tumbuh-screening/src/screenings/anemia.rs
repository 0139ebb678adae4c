//! Hemoglobin-based anemia classification.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_calc::iron::{IronIndication, IronPlan, iron_plan};
use tumbuh_core::classify::BandTable;
use tumbuh_core::error::require_positive;
use tumbuh_core::models::tier::ColorTag;

use crate::error::ScoringError;

/// Ascending Hb cut-offs in g/dL: severe below the first, normal from the last.
pub fn hb_boundaries(age_months: u32) -> [f64; 3] {
    if age_months <= 24 {
        [7.0, 10.0, 11.0]
    } else {
        [7.0, 10.5, 11.5]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnemiaSeverity {
    Severe,
    Moderate,
    Mild,
    Normal,
}

impl AnemiaSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            AnemiaSeverity::Normal => "Normal",
            AnemiaSeverity::Mild => "Anemia Ringan",
            AnemiaSeverity::Moderate => "Anemia Sedang",
            AnemiaSeverity::Severe => "Anemia Berat",
        }
    }

    pub fn color(&self) -> ColorTag {
        match self {
            AnemiaSeverity::Normal => ColorTag::Good,
            AnemiaSeverity::Mild | AnemiaSeverity::Moderate => ColorTag::Warn,
            AnemiaSeverity::Severe => ColorTag::Bad,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnemiaSeverity::Normal => "Kadar Hb normal untuk usia",
            AnemiaSeverity::Mild => "Anemia ringan - perlu peningkatan makanan tinggi zat besi",
            AnemiaSeverity::Moderate => "Anemia sedang - memerlukan suplementasi zat besi",
            AnemiaSeverity::Severe => "Anemia berat - memerlukan penanganan segera",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            AnemiaSeverity::Normal => {
                "Lanjutkan pola makan seimbang dengan zat besi cukup (daging, hati, sayuran hijau)."
            }
            AnemiaSeverity::Mild => {
                "Tingkatkan konsumsi makanan kaya zat besi, pertimbangkan suplementasi zat besi sesuai anjuran dokter."
            }
            AnemiaSeverity::Moderate => {
                "Konsultasi ke dokter untuk suplementasi zat besi dan evaluasi penyebab anemia."
            }
            AnemiaSeverity::Severe => {
                "Segera ke fasilitas kesehatan untuk penanganan dan transfusi bila diperlukan."
            }
        }
    }

    pub fn follow_up(&self) -> FollowUp {
        let (timeframe, action) = match self {
            AnemiaSeverity::Normal => ("6-12 bulan", "Pemeriksaan rutin"),
            AnemiaSeverity::Mild => ("1-2 bulan", "Kontrol Hb dan evaluasi pola makan"),
            AnemiaSeverity::Moderate => ("2-4 minggu", "Kontrol ketat selama suplementasi"),
            AnemiaSeverity::Severe => ("Segera", "Rujuk ke spesialis anak"),
        };
        FollowUp {
            timeframe: timeframe.to_string(),
            action: action.to_string(),
        }
    }

    pub fn iron_indication(&self) -> IronIndication {
        match self {
            AnemiaSeverity::Moderate | AnemiaSeverity::Severe => IronIndication::Treatment,
            AnemiaSeverity::Normal | AnemiaSeverity::Mild => IronIndication::Prevention,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FollowUp {
    pub timeframe: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnemiaInput {
    pub age_months: u32,
    pub hb_g_dl: f64,
    /// Enables the iron plan when present.
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct AnemiaReport {
    pub hb_g_dl: f64,
    pub severity: AnemiaSeverity,
    pub label: String,
    pub color: ColorTag,
    pub description: String,
    pub advice: String,
    pub boundaries: Vec<f64>,
    pub follow_up: FollowUp,
    pub iron: Option<IronPlan>,
}

/// Severity bands for an age, lowest Hb first.
fn hb_table(age_months: u32) -> Result<BandTable<AnemiaSeverity>, ScoringError> {
    Ok(BandTable::new(
        hb_boundaries(age_months).to_vec(),
        vec![
            AnemiaSeverity::Severe,
            AnemiaSeverity::Moderate,
            AnemiaSeverity::Mild,
            AnemiaSeverity::Normal,
        ],
    )?)
}

pub fn classify_hb(age_months: u32, hb_g_dl: f64) -> Result<AnemiaSeverity, ScoringError> {
    require_positive("hb_g_dl", hb_g_dl)?;
    let table = hb_table(age_months)?;
    let (_, severity) = table.classify(hb_g_dl)?;
    Ok(*severity)
}

pub fn assess(input: &AnemiaInput) -> Result<AnemiaReport, ScoringError> {
    require_positive("hb_g_dl", input.hb_g_dl)?;
    let table = hb_table(input.age_months)?;
    let severity = *table.classify(input.hb_g_dl)?.1;
    let iron = input
        .weight_kg
        .map(|w| iron_plan(w, severity.iron_indication()))
        .transpose()?;

    tracing::debug!(age_months = input.age_months, hb = input.hb_g_dl, ?severity, "assessed anemia");

    Ok(AnemiaReport {
        hb_g_dl: input.hb_g_dl,
        severity,
        label: severity.label().to_string(),
        color: severity.color(),
        description: severity.description().to_string(),
        advice: severity.advice().to_string(),
        boundaries: table.boundaries().to_vec(),
        follow_up: severity.follow_up(),
        iron,
    })
}
