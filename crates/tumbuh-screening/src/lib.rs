//! tumbuh-screening
//!
//! Clinical screenings built on two scoring modes: independent weighted
//! findings ([`scoring`]) and one selection per sign group ([`groups`]).
//! Every catalog and tier table is validated when its screening is
//! constructed.

pub mod error;
pub mod groups;
pub mod scoring;
pub mod screenings;

use serde::Serialize;
use ts_rs::TS;
use tumbuh_core::models::tier::{SeverityTier, TierTable};

use error::ScoringError;

/// Trait implemented by each screening that ends in a severity tier.
pub trait Screening: Send + Sync {
    /// Unique identifier (e.g., "dehydration").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    fn tiers(&self) -> &TierTable;

    /// Tier ranges and actions as plain text.
    fn describe_tiers(&self) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for tier in self.tiers().tiers() {
            let range = match tier.max_score {
                Some(max) if max == tier.min_score => format!("{max}"),
                Some(max) => format!("{}-{max}", tier.min_score),
                None => format!("{}+", tier.min_score),
            };
            output.push_str(&format!("- {} ({range}): {}\n", tier.label, tier.action));
        }
        output
    }

    fn summary(&self) -> ScreeningSummary {
        ScreeningSummary {
            id: self.id().to_string(),
            name: self.name().to_string(),
            tiers: self.tiers().tiers().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ScreeningSummary {
    pub id: String,
    pub name: String,
    pub tiers: Vec<SeverityTier>,
}

/// Construct every tiered screening.
pub fn all_screenings() -> Result<Vec<Box<dyn Screening>>, ScoringError> {
    Ok(vec![
        Box::new(screenings::risk::NutritionRisk::new()?),
        Box::new(screenings::dehydration::Dehydration::new()?),
        Box::new(screenings::kpsp::Kpsp::embedded()?),
    ])
}

/// Look up a screening by ID.
pub fn get_screening(id: &str) -> Result<Box<dyn Screening>, ScoringError> {
    all_screenings()?
        .into_iter()
        .find(|s| s.id() == id)
        .ok_or_else(|| ScoringError::UnknownScreening(id.to_string()))
}
