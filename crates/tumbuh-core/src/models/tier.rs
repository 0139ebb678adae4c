use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Presentation color of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ColorTag {
    Good,
    Warn,
    Bad,
}

/// An ordinal severity band over an inclusive score range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeverityTier {
    /// Machine-readable key, e.g. "high".
    pub key: String,
    pub label: String,
    pub color: ColorTag,
    pub min_score: u32,
    /// `None` only for the top tier, which is unbounded above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u32>,
    pub action: String,
    pub timeline: String,
    pub description: String,
    /// General advice attached to the tier.
    #[serde(default)]
    pub advice: Vec<String>,
}

impl SeverityTier {
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min_score && self.max_score.is_none_or(|max| score <= max)
    }
}

/// Tiers partitioning the non-negative integers.
///
/// Construction checks that the first tier starts at 0, that adjacent
/// tiers neither gap nor overlap, and that only the top tier is unbounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<SeverityTier>", into = "Vec<SeverityTier>")]
pub struct TierTable {
    tiers: Vec<SeverityTier>,
}

impl TierTable {
    pub fn new(mut tiers: Vec<SeverityTier>) -> Result<Self, CoreError> {
        if tiers.is_empty() {
            return Err(CoreError::InvalidTiers("no tiers defined".into()));
        }
        tiers.sort_by_key(|t| t.min_score);

        let mut keys = HashSet::new();
        for tier in &tiers {
            if !keys.insert(tier.key.as_str()) {
                return Err(CoreError::InvalidTiers(format!(
                    "duplicate tier key '{}'",
                    tier.key
                )));
            }
            if let Some(max) = tier.max_score
                && max < tier.min_score
            {
                return Err(CoreError::InvalidTiers(format!(
                    "tier '{}' ends ({max}) before it starts ({})",
                    tier.key, tier.min_score
                )));
            }
        }

        if tiers[0].min_score != 0 {
            return Err(CoreError::InvalidTiers(format!(
                "lowest tier '{}' starts at {} instead of 0",
                tiers[0].key, tiers[0].min_score
            )));
        }

        for pair in tiers.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            let Some(max) = lower.max_score else {
                return Err(CoreError::InvalidTiers(format!(
                    "tier '{}' is unbounded but '{}' lies above it",
                    lower.key, upper.key
                )));
            };
            if upper.min_score != max + 1 {
                let kind = if upper.min_score <= max { "overlaps" } else { "leaves a gap after" };
                return Err(CoreError::InvalidTiers(format!(
                    "tier '{}' (from {}) {kind} '{}' (to {max})",
                    upper.key, upper.min_score, lower.key
                )));
            }
        }

        let top = &tiers[tiers.len() - 1];
        if top.max_score.is_some() {
            return Err(CoreError::InvalidTiers(format!(
                "top tier '{}' must be unbounded",
                top.key
            )));
        }

        Ok(Self { tiers })
    }

    /// The highest tier whose minimum the score reaches.
    pub fn resolve(&self, score: u32) -> &SeverityTier {
        self.tiers
            .iter()
            .rev()
            .find(|t| t.min_score <= score)
            .unwrap_or(&self.tiers[0])
    }

    /// Resolve a score after giving precondition overrides the first word.
    ///
    /// Overrides are checked in the order given; the first one wins and the
    /// score is not consulted.
    pub fn resolve_with<I>(&self, score: u32, overrides: I) -> Result<TierResolution, CoreError>
    where
        I: IntoIterator<Item = TierOverride>,
    {
        if let Some(o) = overrides.into_iter().next() {
            let tier = match &o.target {
                TierTarget::Top => self.top(),
                TierTarget::Key(key) => self
                    .get(key)
                    .ok_or_else(|| CoreError::UnknownTier(key.clone()))?,
            };
            return Ok(TierResolution {
                score,
                tier: tier.clone(),
                forced_by: Some(o.reason),
            });
        }
        Ok(TierResolution {
            score,
            tier: self.resolve(score).clone(),
            forced_by: None,
        })
    }

    pub fn top(&self) -> &SeverityTier {
        &self.tiers[self.tiers.len() - 1]
    }

    pub fn get(&self, key: &str) -> Option<&SeverityTier> {
        self.tiers.iter().find(|t| t.key == key)
    }

    /// Tiers in ascending score order.
    pub fn tiers(&self) -> &[SeverityTier] {
        &self.tiers
    }
}

impl TryFrom<Vec<SeverityTier>> for TierTable {
    type Error = CoreError;

    fn try_from(tiers: Vec<SeverityTier>) -> Result<Self, Self::Error> {
        TierTable::new(tiers)
    }
}

impl From<TierTable> for Vec<SeverityTier> {
    fn from(table: TierTable) -> Self {
        table.tiers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierTarget {
    Top,
    Key(String),
}

/// A fired precondition that forces a tier regardless of score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierOverride {
    pub target: TierTarget,
    pub reason: String,
}

impl TierOverride {
    pub fn top(reason: impl Into<String>) -> Self {
        Self {
            target: TierTarget::Top,
            reason: reason.into(),
        }
    }

    pub fn to(key: &str, reason: impl Into<String>) -> Self {
        Self {
            target: TierTarget::Key(key.to_string()),
            reason: reason.into(),
        }
    }
}

/// The tier a score landed in, and the override that put it there if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TierResolution {
    pub score: u32,
    pub tier: SeverityTier,
    pub forced_by: Option<String>,
}
