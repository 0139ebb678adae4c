pub mod anemia;
pub mod dehydration;
pub mod fever;
pub mod immunization;
pub mod kpsp;
pub mod risk;

use tumbuh_core::models::tier::{ColorTag, SeverityTier};

/// Literal form of a tier, for catalogs written in code.
pub(crate) struct TierText<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub color: ColorTag,
    pub min: u32,
    pub max: Option<u32>,
    pub action: &'a str,
    pub timeline: &'a str,
    pub description: &'a str,
    pub advice: &'a [&'a str],
}

impl From<TierText<'_>> for SeverityTier {
    fn from(t: TierText<'_>) -> Self {
        SeverityTier {
            key: t.key.to_string(),
            label: t.label.to_string(),
            color: t.color,
            min_score: t.min,
            max_score: t.max,
            action: t.action.to_string(),
            timeline: t.timeline.to_string(),
            description: t.description.to_string(),
            advice: t.advice.iter().map(|a| a.to_string()).collect(),
        }
    }
}
