use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_core::models::tier::ColorTag;

/// The three anthropometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IndexFamily {
    /// Length-for-age, keyed by age in months.
    Lfa,
    /// Weight-for-age, keyed by age in months.
    Wfa,
    /// Weight-for-length, keyed by length in cm.
    Wfl,
}

impl IndexFamily {
    pub const ALL: [IndexFamily; 3] = [IndexFamily::Lfa, IndexFamily::Wfa, IndexFamily::Wfl];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexFamily::Lfa => "lfa",
            IndexFamily::Wfa => "wfa",
            IndexFamily::Wfl => "wfl",
        }
    }

    pub fn is_age_indexed(&self) -> bool {
        !matches!(self, IndexFamily::Wfl)
    }

    /// Band index → status, one slot per band.
    pub fn statuses(&self) -> &'static [GrowthStatus; 8] {
        use GrowthStatus::*;
        match self {
            IndexFamily::Lfa => &[
                SeverelyStunted,
                Stunted,
                Normal,
                Normal,
                Normal,
                Normal,
                Normal,
                Normal,
            ],
            IndexFamily::Wfa => &[
                SeverelyUnderweight,
                Underweight,
                Normal,
                Normal,
                Normal,
                Normal,
                Normal,
                Normal,
            ],
            IndexFamily::Wfl => &[
                SeverelyWasted,
                Wasted,
                Normal,
                Normal,
                Normal,
                RiskOfOverweight,
                Overweight,
                Obese,
            ],
        }
    }

    /// Status for a band. Bands past the last slot (tables with eight
    /// boundaries) take the last status.
    pub fn status_for_band(&self, band: usize) -> GrowthStatus {
        let statuses = self.statuses();
        statuses[band.min(statuses.len() - 1)]
    }

    /// Distinct statuses this family can produce, in band order.
    pub fn declared_statuses(&self) -> Vec<GrowthStatus> {
        let mut out: Vec<GrowthStatus> = Vec::new();
        for status in self.statuses() {
            if !out.contains(status) {
                out.push(*status);
            }
        }
        out
    }
}

impl fmt::Display for IndexFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutritional status label produced by a growth comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GrowthStatus {
    SeverelyStunted,
    Stunted,
    SeverelyUnderweight,
    Underweight,
    SeverelyWasted,
    Wasted,
    Normal,
    RiskOfOverweight,
    Overweight,
    Obese,
}

impl GrowthStatus {
    /// Canonical label rendered to the user.
    pub fn label(&self) -> &'static str {
        match self {
            GrowthStatus::SeverelyStunted => "Severely Stunted",
            GrowthStatus::Stunted => "Stunted",
            GrowthStatus::SeverelyUnderweight => "Severely Underweight",
            GrowthStatus::Underweight => "Underweight",
            GrowthStatus::SeverelyWasted => "Gizi kurang",
            GrowthStatus::Wasted => "Gizi rendah",
            GrowthStatus::Normal => "Normal",
            GrowthStatus::RiskOfOverweight => "Resiko Overweight",
            GrowthStatus::Overweight => "Overweight",
            GrowthStatus::Obese => "Obese",
        }
    }

    pub fn color(&self) -> ColorTag {
        match self {
            GrowthStatus::Normal => ColorTag::Good,
            GrowthStatus::SeverelyStunted
            | GrowthStatus::SeverelyUnderweight
            | GrowthStatus::SeverelyWasted
            | GrowthStatus::Obese => ColorTag::Bad,
            _ => ColorTag::Warn,
        }
    }
}

/// SD code for each band slot. Band 3 is code 0, not "exactly the median".
pub const SD_CODES: [i8; 8] = [-3, -2, -1, 0, 1, 2, 3, 4];

pub fn sd_code(band: usize) -> Option<i8> {
    SD_CODES.get(band).copied()
}
