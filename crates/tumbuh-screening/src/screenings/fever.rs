//! Fever status and action.
//!
//! Urgency is decided by rules checked in priority order: an immediate red
//! flag or a neonate, then high temperature or a high red flag, then a long
//! fever. Red flags are reported but carry no score-based tier.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_calc::dosing::{DoseCalculation, MedicationId, calculate_dose};
use tumbuh_calc::error::CalcError;
use tumbuh_core::classify::BandTable;
use tumbuh_core::error::require_positive;
use tumbuh_core::models::patient::PatientAge;
use tumbuh_core::models::tier::ColorTag;

use crate::error::ScoringError;
use crate::scoring::{FactorCatalog, FactorGroup, MatchedFactor, RiskFactor};

pub const NEONATE_MAX_DAYS: u32 = 28;
pub const LONG_FEVER_HOURS: u32 = 72;
/// Children older than this are past exclusive breastfeeding advice.
const BREASTFEEDING_MAX_DAYS: u32 = 6 * PatientAge::DAYS_PER_MONTH;
/// Temperature from which the antipyretic advice becomes a firm schedule.
const ANTIPYRETIC_C: f64 = 38.5;

/// Fever and high-fever thresholds for an age range, in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeverThreshold {
    pub max_age_days: Option<u32>,
    pub fever_c: f64,
    pub high_fever_c: f64,
}

pub const THRESHOLDS: [FeverThreshold; 3] = [
    FeverThreshold {
        max_age_days: Some(28),
        fever_c: 38.0,
        high_fever_c: 39.0,
    },
    FeverThreshold {
        max_age_days: Some(90),
        fever_c: 38.0,
        high_fever_c: 39.0,
    },
    FeverThreshold {
        max_age_days: None,
        fever_c: 38.0,
        high_fever_c: 39.5,
    },
];

pub fn threshold_for(age_days: u32) -> FeverThreshold {
    THRESHOLDS
        .into_iter()
        .find(|t| t.max_age_days.is_none_or(|max| age_days <= max))
        .unwrap_or(THRESHOLDS[2])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TemperatureLevel {
    Normal,
    Fever,
    HighFever,
}

impl TemperatureLevel {
    pub fn label(&self) -> &'static str {
        match self {
            TemperatureLevel::Normal => "Normal",
            TemperatureLevel::Fever => "Demam",
            TemperatureLevel::HighFever => "Demam Tinggi",
        }
    }

    pub fn color(&self) -> ColorTag {
        match self {
            TemperatureLevel::Normal => ColorTag::Good,
            TemperatureLevel::Fever => ColorTag::Warn,
            TemperatureLevel::HighFever => ColorTag::Bad,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemperatureLevel::Normal => "Suhu tubuh normal untuk usia ini.",
            TemperatureLevel::Fever => {
                "Demam ringan-sedang, pantau kondisi anak dan berikan antipiretik jika perlu."
            }
            TemperatureLevel::HighFever => {
                "Demam tinggi memerlukan perhatian khusus dan kemungkinan penanganan segera."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct TemperatureClassification {
    pub temperature_c: f64,
    pub level: TemperatureLevel,
    pub label: String,
    pub color: ColorTag,
    pub description: String,
    pub threshold: FeverThreshold,
}

pub fn classify_temperature(
    age_days: u32,
    temperature_c: f64,
) -> Result<TemperatureClassification, ScoringError> {
    require_positive("temperature_c", temperature_c)?;
    let threshold = threshold_for(age_days);
    let table = BandTable::new(
        vec![threshold.fever_c, threshold.high_fever_c],
        vec![
            TemperatureLevel::Normal,
            TemperatureLevel::Fever,
            TemperatureLevel::HighFever,
        ],
    )?;
    let (_, level) = table.classify(temperature_c)?;
    Ok(TemperatureClassification {
        temperature_c,
        level: *level,
        label: level.label().to_string(),
        color: level.color(),
        description: level.description().to_string(),
        threshold,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeverInput {
    pub age_days: u32,
    pub temperature_c: f64,
    pub duration_hours: u32,
    #[serde(default)]
    pub red_flags: Vec<String>,
    /// Enables antipyretic dosing when present.
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct HomeCareAdvice {
    pub title: String,
    pub text: String,
}

/// Where and how soon the child should be seen, least urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FeverUrgency {
    Low,
    Medium,
    High,
    Immediate,
}

impl FeverUrgency {
    pub fn label(&self) -> &'static str {
        match self {
            FeverUrgency::Low => "Observasi di Rumah",
            FeverUrgency::Medium => "Kontrol ke Faskes",
            FeverUrgency::High => "Segera ke Faskes",
            FeverUrgency::Immediate => "Segera ke Faskes (IGD)",
        }
    }

    pub fn color(&self) -> ColorTag {
        match self {
            FeverUrgency::Low => ColorTag::Good,
            FeverUrgency::Medium => ColorTag::Warn,
            FeverUrgency::High | FeverUrgency::Immediate => ColorTag::Bad,
        }
    }

    pub fn timeline(&self) -> &'static str {
        match self {
            FeverUrgency::Low => "Pantau 48 jam",
            FeverUrgency::Medium => "Dalam 24 jam",
            FeverUrgency::High => "Hari ini",
            FeverUrgency::Immediate => "Segera",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FeverUrgency::Low => {
                "Pantau suhu, berikan cairan cukup, dan antipiretik jika diperlukan."
            }
            FeverUrgency::Medium => "Perlu evaluasi untuk menentukan penyebab demam.",
            FeverUrgency::High => {
                "Segera bawa ke fasilitas kesehatan untuk evaluasi lebih lanjut."
            }
            FeverUrgency::Immediate => "Anak memerlukan evaluasi segera oleh tenaga medis.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FeverAction {
    pub urgency: FeverUrgency,
    pub label: String,
    pub color: ColorTag,
    pub timeline: String,
    pub description: String,
    /// The rule that decided the urgency.
    pub reason: String,
}

impl FeverAction {
    fn new(urgency: FeverUrgency, reason: &str) -> Self {
        Self {
            urgency,
            label: urgency.label().to_string(),
            color: urgency.color(),
            timeline: urgency.timeline().to_string(),
            description: urgency.description().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct FeverReport {
    pub temperature: TemperatureClassification,
    pub action: FeverAction,
    /// In catalog order.
    pub red_flags: Vec<MatchedFactor>,
    pub home_care: Vec<HomeCareAdvice>,
    pub antipyretics: Vec<DoseCalculation>,
}

/// Red flag severity groups.
const IMMEDIATE: &str = "immediate";
const HIGH: &str = "high";
const MEDIUM: &str = "medium";

#[derive(Debug, Clone)]
pub struct Fever {
    flags: FactorCatalog,
}

impl Fever {
    pub fn new() -> Result<Self, ScoringError> {
        Ok(Self {
            flags: FactorCatalog::new(red_flag_groups())?,
        })
    }

    pub fn red_flags(&self) -> &FactorCatalog {
        &self.flags
    }

    pub fn assess(&self, input: &FeverInput) -> Result<FeverReport, ScoringError> {
        let temperature = classify_temperature(input.age_days, input.temperature_c)?;

        let red_flags = self.flags.matched(&input.red_flags);
        let has = |severity: &str| red_flags.iter().any(|f| f.category == severity);

        // First matching rule wins.
        let rules = [
            (has(IMMEDIATE), FeverUrgency::Immediate, "Tanda bahaya segera teridentifikasi"),
            (input.age_days <= NEONATE_MAX_DAYS, FeverUrgency::Immediate, "Usia ≤ 28 hari"),
            (
                input.temperature_c >= temperature.threshold.high_fever_c,
                FeverUrgency::High,
                "Demam tinggi untuk usia",
            ),
            (has(HIGH), FeverUrgency::High, "Tanda bahaya tinggi teridentifikasi"),
            (
                input.duration_hours >= LONG_FEVER_HOURS,
                FeverUrgency::Medium,
                "Demam lebih dari 3 hari",
            ),
        ];
        let action = rules
            .into_iter()
            .find(|(applies, _, _)| *applies)
            .map(|(_, urgency, reason)| FeverAction::new(urgency, reason))
            .unwrap_or_else(|| FeverAction::new(FeverUrgency::Low, "Demam tanpa tanda bahaya"));

        tracing::debug!(
            age_days = input.age_days,
            temperature_c = input.temperature_c,
            urgency = ?action.urgency,
            reason = %action.reason,
            "assessed fever"
        );

        Ok(FeverReport {
            home_care: home_care(input.age_days, input.temperature_c),
            antipyretics: match input.weight_kg {
                Some(weight) => antipyretics(weight, input.age_days)?,
                None => Vec::new(),
            },
            temperature,
            action,
            red_flags,
        })
    }
}

pub fn home_care(age_days: u32, temperature_c: f64) -> Vec<HomeCareAdvice> {
    let advice = |title: &str, text: &str| HomeCareAdvice {
        title: title.to_string(),
        text: text.to_string(),
    };
    vec![
        advice(
            "Cairan",
            if age_days > BREASTFEEDING_MAX_DAYS {
                "Berikan cairan lebih sering (air putih, sup, oralit)"
            } else {
                "Tingkatkan frekuensi menyusui atau berikan ASI lebih sering"
            },
        ),
        advice(
            "Pakaian",
            "Pakai pakaian tipis, jangan membungkus anak terlalu ketat. Hindari ruangan terlalu panas.",
        ),
        advice(
            "Mandi",
            "Mandi dengan air hangat (suhu ruang), bukan air dingin. Kompres dahi dengan kain basah hangat.",
        ),
        advice(
            "Obat Antipiretik",
            if temperature_c >= ANTIPYRETIC_C {
                "Parasetamol 15mg/kg/kali setiap 4-6 jam jika perlu. Tidak boleh lebih dari 4 dosis/hari."
            } else {
                "Parasetamol dapat diberikan jika anak tidak nyaman. Ikuti dosis sesuai berat badan."
            },
        ),
        advice(
            "Pemantauan",
            "Catat suhu setiap 4 jam. Segera ke dokter jika demam tidak turun setelah 48 jam atau ada tanda bahaya.",
        ),
    ]
}

/// Paracetamol always; ibuprofen only from its minimum age.
fn antipyretics(weight_kg: f64, age_days: u32) -> Result<Vec<DoseCalculation>, ScoringError> {
    let age_months = PatientAge::from_days(age_days).months;
    let mut doses = vec![calculate_dose(MedicationId::Paracetamol, weight_kg, Some(age_months))?];
    match calculate_dose(MedicationId::Ibuprofen, weight_kg, Some(age_months)) {
        Ok(dose) => doses.push(dose),
        Err(CalcError::BelowMinimumAge { .. }) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(doses)
}

fn red_flag_groups() -> Vec<FactorGroup> {
    vec![
        FactorGroup::new(
            IMMEDIATE,
            "Segera",
            vec![
                RiskFactor::new("lethargy", "Letargis/kesulitan bangun", 3),
                RiskFactor::new("seizure", "Kejang", 3),
                RiskFactor::new("not_drinking", "Tidak bisa minum/menyusu", 3),
                RiskFactor::new("vomiting", "Muntah terus-menerus", 3),
                RiskFactor::new("bulging_fontanelle", "Ubun-ubun mencembung", 3),
                RiskFactor::new("neck_stiffness", "Leher kaku", 3),
                RiskFactor::new("persistent_crying", "Menangis terus (tidak berhenti)", 3),
                RiskFactor::new("difficulty_breathing", "Kesulitan bernapas", 3),
                RiskFactor::new("blue_lips", "Bibir kebiruan", 3),
            ],
        ),
        FactorGroup::new(
            HIGH,
            "Tinggi",
            vec![
                RiskFactor::new("skin_rash", "Ruam kulit yang tidak hilang", 2),
                RiskFactor::new("fever_3_days", "Demam > 3 hari", 2),
                RiskFactor::new("fever_return", "Demam kembali setelah membaik", 2),
            ],
        ),
        FactorGroup::new(
            MEDIUM,
            "Sedang",
            vec![
                RiskFactor::new("urine_decreased", "Urine berkurang", 1),
                RiskFactor::new("cold_extremities", "Tangan/kaki dingin", 1),
            ],
        ),
    ]
}
