use serde::Serialize;
use ts_rs::TS;
use tumbuh_core::models::tier::{ColorTag, SeverityTier, TierTable};

use crate::Screening;
use crate::error::ScoringError;
use crate::scoring::{CategoryRecommendations, FactorGroup, RiskAssessment, RiskFactor, RuleCatalog};
use crate::screenings::TierText;

/// Rule-based nutritional and developmental risk score.
/// 24 weighted findings in six categories. Low 0-3, medium 4-6, high 7+.
#[derive(Debug, Clone)]
pub struct NutritionRisk {
    catalog: RuleCatalog,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct NutritionRiskReport {
    pub assessment: RiskAssessment,
    pub recommendations: Vec<CategoryRecommendations>,
}

impl NutritionRisk {
    pub fn new() -> Result<Self, ScoringError> {
        let catalog = RuleCatalog::new(factor_groups(), tier_table()?)?;
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn assess<S: AsRef<str>>(&self, selected: &[S]) -> NutritionRiskReport {
        let assessment = self.catalog.score(selected);
        tracing::debug!(
            score = assessment.total_score,
            tier = %assessment.tier.tier.key,
            matched = assessment.matched_factors.len(),
            "assessed nutrition risk"
        );
        NutritionRiskReport {
            recommendations: self
                .catalog
                .recommendations_by_category(&assessment.matched_factors),
            assessment,
        }
    }
}

impl Screening for NutritionRisk {
    fn id(&self) -> &str {
        "nutrition_risk"
    }

    fn name(&self) -> &str {
        "Skor Risiko Gizi & Tumbuh Kembang"
    }

    fn tiers(&self) -> &TierTable {
        self.catalog.tiers()
    }
}

fn factor_groups() -> Vec<FactorGroup> {
    vec![
        FactorGroup::new(
            "growth",
            "Pertumbuhan",
            vec![
                RiskFactor::new("weight_loss", "Tren BB turun ≥2 SD dalam 2 bulan", 3),
                RiskFactor::new("low_weight", "BB/U < -3 SD (gizi buruk)", 3),
                RiskFactor::new("stunting", "PB/U < -3 SD (stunting berat)", 2),
                RiskFactor::new("wasting", "BB/PB < -2 SD (wasting)", 2),
                RiskFactor::new("no_weight_gain", "Tidak naik BB selama 2 bulan", 2),
            ],
        ),
        FactorGroup::new(
            "intake",
            "Asupan Makan",
            vec![
                RiskFactor::new("decreased_intake", "Asupan menurun >50% dari biasa", 2),
                RiskFactor::new("poor_appetite", "Nafsu makan buruk 3 hari berturut-turut", 2),
                RiskFactor::new("breastfeeding_issue", "Masalah menyusui (ibu/anak)", 2),
                RiskFactor::new("feeding_difficulty", "Kesulitan makan (menelan, mengunyah)", 2),
            ],
        ),
        FactorGroup::new(
            "diarrhea",
            "Diare & Dehidrasi",
            vec![
                RiskFactor::new("persistent_diarrhea", "Diare persisten (>14 hari)", 3),
                RiskFactor::new("bloody_diarrhea", "Diare berdarah", 3),
                RiskFactor::new("severe_dehydration", "Dehidrasi berat", 3),
                RiskFactor::new("recurrent_diarrhea", "Diare berulang (>3x/bulan)", 2),
            ],
        ),
        FactorGroup::new(
            "fever",
            "Demam & Infeksi",
            vec![
                RiskFactor::new("high_fever", "Demam tinggi (>39°C) 2 hari berturut-turut", 2),
                RiskFactor::new("prolonged_fever", "Demam >7 hari", 2),
                RiskFactor::new("recurrent_infection", "Infeksi berulang (>3x/bulan)", 2),
            ],
        ),
        FactorGroup::new(
            "development",
            "Perkembangan",
            vec![
                RiskFactor::new("developmental_delay", "Keterlambatan perkembangan", 2),
                RiskFactor::new("regression", "Regresi perkembangan", 3),
                RiskFactor::new("no_social_smile", "Belum tersenyum sosial (3 bulan)", 2),
                RiskFactor::new("no_head_control", "Belum kontrol kepala (4 bulan)", 2),
            ],
        ),
        FactorGroup::new(
            "social",
            "Sosial & Lingkungan",
            vec![
                RiskFactor::new("low_birth_weight", "BB lahir <2500g", 2),
                RiskFactor::new("premature", "Prematur (<37 minggu)", 2),
                RiskFactor::new("poor_socioeconomic", "Kondisi sosial ekonomi buruk", 1),
                RiskFactor::new("lack_support", "Kurangnya dukungan keluarga", 1),
            ],
        ),
    ]
}

fn tier_table() -> Result<TierTable, ScoringError> {
    let tiers: Vec<SeverityTier> = vec![
        TierText {
            key: "low",
            label: "Risiko Rendah",
            color: ColorTag::Good,
            min: 0,
            max: Some(3),
            action: "Pemantauan rutin dan edukasi orang tua",
            timeline: "Sesuai jadwal kontrol reguler",
            description: "Anak dalam kondisi baik, lanjutkan pemantauan tumbuh kembang.",
            advice: &[
                "Lanjutkan pemantauan tumbuh kembang rutin",
                "Berikan edukasi tentang nutrisi dan stimulasi sesuai usia",
                "Jadwalkan kontrol sesuai protokol balita sehat",
            ],
        }
        .into(),
        TierText {
            key: "medium",
            label: "Risiko Sedang",
            color: ColorTag::Warn,
            min: 4,
            max: Some(6),
            action: "Kontrol lebih ketat dan pemantauan intensif",
            timeline: "Dalam 1 minggu",
            description: "Anak memerlukan pemantauan lebih sering dan evaluasi ulang.",
            advice: &[
                "Jadwalkan kontrol lebih sering (mingguan)",
                "Lakukan evaluasi pertumbuhan dengan plotting di KMS",
                "Edukasi orang tua tentang tanda bahaya",
                "Pertimbangkan rujukan jika tidak ada perbaikan dalam 2 minggu",
            ],
        }
        .into(),
        TierText {
            key: "high",
            label: "Risiko Tinggi",
            color: ColorTag::Bad,
            min: 7,
            max: None,
            action: "Rujuk ke fasilitas kesehatan lebih tinggi",
            timeline: "Segera (dalam 24 jam)",
            description: "Anak memerlukan evaluasi dan intervensi segera oleh tenaga kesehatan spesialis.",
            advice: &[
                "Rujuk segera ke dokter spesialis anak",
                "Evaluasi laboratorium lengkap (darah lengkap, kimia darah, urinalisis)",
                "Pertimbangkan rawat inap jika diperlukan",
                "Konsultasi dengan ahli gizi untuk intervensi nutrisi",
            ],
        }
        .into(),
    ];
    Ok(TierTable::new(tiers)?)
}
