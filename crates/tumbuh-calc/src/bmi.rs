//! Body mass index with a simplified pediatric category scale.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_core::classify::BandTable;
use tumbuh_core::error::{CoreError, require_positive};
use tumbuh_core::models::tier::ColorTag;
use tumbuh_core::round::to_tenth;

use crate::error::CalcError;

/// Category lower bounds, in kg/m².
pub const CATEGORY_BOUNDARIES: [f64; 5] = [12.0, 15.0, 22.0, 25.0, 30.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BmiCategory {
    SeverelyThin,
    Thin,
    Normal,
    Overweight,
    Obese,
    SeverelyObese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 6] = [
        BmiCategory::SeverelyThin,
        BmiCategory::Thin,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
        BmiCategory::SeverelyObese,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::SeverelyThin => "Sangat Kurus",
            BmiCategory::Thin => "Kurus",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Berat Berlebih",
            BmiCategory::Obese => "Obesitas",
            BmiCategory::SeverelyObese => "Obesitas Berat",
        }
    }

    pub fn risk(&self) -> &'static str {
        match self {
            BmiCategory::SeverelyThin | BmiCategory::Obese => "Tinggi",
            BmiCategory::Thin | BmiCategory::Overweight => "Sedang",
            BmiCategory::Normal => "Rendah",
            BmiCategory::SeverelyObese => "Sangat Tinggi",
        }
    }

    pub fn color(&self) -> ColorTag {
        match self {
            BmiCategory::Normal => ColorTag::Good,
            BmiCategory::Thin | BmiCategory::Overweight => ColorTag::Warn,
            BmiCategory::SeverelyThin | BmiCategory::Obese | BmiCategory::SeverelyObese => {
                ColorTag::Bad
            }
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::SeverelyThin => "BMI sangat rendah, kemungkinan underweight berat.",
            BmiCategory::Thin => "BMI di bawah normal, kemungkinan underweight.",
            BmiCategory::Normal => "BMI dalam rentang normal.",
            BmiCategory::Overweight => "BMI di atas normal, risiko overweight.",
            BmiCategory::Obese => "BMI menunjukkan obesitas.",
            BmiCategory::SeverelyObese => "BMI menunjukkan obesitas berat.",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            BmiCategory::SeverelyThin => {
                "Konsultasi dengan dokter untuk evaluasi pertumbuhan dan nutrisi."
            }
            BmiCategory::Thin => "Perbanyak makanan bergizi tinggi kalori dan protein.",
            BmiCategory::Normal => "Pertahankan pola makan seimbang dan aktivitas fisik teratur.",
            BmiCategory::Overweight => {
                "Kurangi makanan tinggi gula dan lemak, tingkatkan aktivitas fisik."
            }
            BmiCategory::Obese => "Konsultasi untuk program penurunan berat badan terstruktur.",
            BmiCategory::SeverelyObese => {
                "Perlu penanganan medis untuk menurunkan risiko komorbiditas."
            }
        }
    }

    fn is_under(&self) -> bool {
        matches!(self, BmiCategory::SeverelyThin | BmiCategory::Thin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BmiResult {
    /// kg/m², rounded to one decimal.
    pub value: f64,
    pub category: BmiCategory,
    pub label: String,
    pub risk: String,
    pub color: ColorTag,
    pub description: String,
    pub advice: String,
}

/// BMI from weight and height. The category is taken from the unrounded value.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<BmiResult, CalcError> {
    require_positive("weight_kg", weight_kg)?;
    require_positive("height_cm", height_cm)?;

    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    let table = category_table()?;
    let (_, category) = table.classify(raw)?;
    let category = *category;

    tracing::debug!(weight_kg, height_cm, bmi = raw, ?category, "calculated bmi");

    Ok(BmiResult {
        value: to_tenth(raw),
        category,
        label: category.label().to_string(),
        risk: category.risk().to_string(),
        color: category.color(),
        description: category.description().to_string(),
        advice: category.advice().to_string(),
    })
}

fn category_table() -> Result<BandTable<BmiCategory>, CoreError> {
    BandTable::new(CATEGORY_BOUNDARIES.to_vec(), BmiCategory::ALL.to_vec())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MetabolicRisk {
    pub indicator: String,
    pub risk: String,
    pub description: String,
}

/// Metabolic risk indicators for a (rounded) BMI value.
pub fn metabolic_risks(bmi: f64, age_months: u32) -> Vec<MetabolicRisk> {
    let mut risks = Vec::new();
    if bmi >= 25.0 {
        risks.push(MetabolicRisk {
            indicator: "BMI Elevated".into(),
            risk: "Tinggi".into(),
            description: "BMI di atas normal meningkatkan risiko metabolik".into(),
        });
    }
    if age_months < 60 && bmi > 20.0 {
        risks.push(MetabolicRisk {
            indicator: "Early Adiposity".into(),
            risk: "Sedang".into(),
            description: "Penumpukan lemak dini dapat berlanjut ke obesitas dewasa".into(),
        });
    }
    risks
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecommendationGroup {
    pub category: String,
    pub items: Vec<String>,
}

impl RecommendationGroup {
    fn new(category: &str, items: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn lifestyle_recommendations(category: BmiCategory, age_months: u32) -> Vec<RecommendationGroup> {
    let mut groups = if category.is_under() {
        vec![
            RecommendationGroup::new(
                "Nutrisi",
                &[
                    "Tingkatkan frekuensi makan (3 makanan utama + 2 camilan)",
                    "Pilih makanan tinggi kalori dan protein (daging, ikan, telur, kacang)",
                    "Tambahkan lemak sehat (minyak zaitun, alpukat, kacang-kacangan)",
                    "Pertimbangkan suplementasi jika diperlukan",
                ],
            ),
            RecommendationGroup::new(
                "Aktivitas",
                &[
                    "Aktivitas fisik moderat untuk membangun otot",
                    "Hindari aktivitas yang terlalu menguras energi",
                ],
            ),
        ]
    } else if category == BmiCategory::Normal {
        vec![
            RecommendationGroup::new(
                "Nutrisi",
                &[
                    "Pola makan seimbang dengan variasi sayuran dan protein",
                    "Batasi makanan tinggi gula dan lemak jenuh",
                    "Minum air putih yang cukup",
                ],
            ),
            RecommendationGroup::new(
                "Aktivitas",
                &[
                    "Aktivitas fisik minimal 60 menit per hari",
                    "Batasi screen time maksimal 2 jam per hari",
                ],
            ),
        ]
    } else {
        vec![
            RecommendationGroup::new(
                "Nutrisi",
                &[
                    "Kurangi makanan tinggi gula dan lemak",
                    "Perbanyak sayuran dan buah-buahan",
                    "Kurangi ukuran porsi makan",
                    "Hindari makanan cepat saji dan minuman bersoda",
                ],
            ),
            RecommendationGroup::new(
                "Aktivitas",
                &[
                    "Aktivitas fisik minimal 60 menit per hari",
                    "Batasi screen time maksimal 1 jam per hari",
                    "Libatkan seluruh keluarga dalam aktivitas fisik",
                ],
            ),
        ]
    };

    if age_months < 24 {
        groups.push(RecommendationGroup::new(
            "Umur Spesifik",
            &[
                "ASI eksklusif jika memungkinkan",
                "MPASI sesuai usia dengan tekstur yang tepat",
                "Pantau pertumbuhan secara berkala",
            ],
        ));
    }

    groups
}
