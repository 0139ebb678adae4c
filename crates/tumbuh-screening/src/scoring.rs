//! Rule-weighted scoring.
//!
//! A catalog of independent boolean findings, each with a positive weight.
//! The weights of the findings observed for a patient are summed and the
//! total is placed into a severity tier.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_core::models::tier::{TierOverride, TierResolution, TierTable};

use crate::error::ScoringError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskFactor {
    pub id: String,
    pub text: String,
    pub weight: u32,
}

impl RiskFactor {
    pub fn new(id: &str, text: &str, weight: u32) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            weight,
        }
    }
}

/// A named category of factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FactorGroup {
    pub key: String,
    pub name: String,
    pub factors: Vec<RiskFactor>,
}

impl FactorGroup {
    pub fn new(key: &str, name: &str, factors: Vec<RiskFactor>) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            factors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchedFactor {
    pub id: String,
    pub text: String,
    pub weight: u32,
    pub category: String,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskAssessment {
    pub total_score: u32,
    /// In catalog order, not selection order.
    pub matched_factors: Vec<MatchedFactor>,
    pub tier: TierResolution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryRecommendations {
    pub category: String,
    pub name: String,
    pub items: Vec<String>,
}

/// Validated set of factor groups, without tiers.
#[derive(Debug, Clone)]
pub struct FactorCatalog {
    groups: Vec<FactorGroup>,
}

impl FactorCatalog {
    /// Checks that group keys and factor ids are unique and every weight is
    /// positive.
    pub fn new(groups: Vec<FactorGroup>) -> Result<Self, ScoringError> {
        let mut keys = HashSet::new();
        let mut ids = HashSet::new();
        for group in &groups {
            if !keys.insert(group.key.as_str()) {
                return Err(ScoringError::InvalidCatalog(format!(
                    "duplicate category '{}'",
                    group.key
                )));
            }
            for factor in &group.factors {
                if !ids.insert(factor.id.as_str()) {
                    return Err(ScoringError::InvalidCatalog(format!(
                        "duplicate factor id '{}'",
                        factor.id
                    )));
                }
                if factor.weight == 0 {
                    return Err(ScoringError::InvalidCatalog(format!(
                        "factor '{}' has zero weight",
                        factor.id
                    )));
                }
            }
        }

        tracing::debug!(categories = groups.len(), factors = ids.len(), "factor catalog ready");
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[FactorGroup] {
        &self.groups
    }

    /// Selected factors in catalog order. Unknown ids are ignored and a
    /// repeated id counts once.
    pub fn matched<S: AsRef<str>>(&self, selected: &[S]) -> Vec<MatchedFactor> {
        let selected: HashSet<&str> = selected.iter().map(|s| s.as_ref()).collect();

        let mut matched = Vec::new();
        for group in &self.groups {
            for factor in group.factors.iter().filter(|f| selected.contains(f.id.as_str())) {
                matched.push(MatchedFactor {
                    id: factor.id.clone(),
                    text: factor.text.clone(),
                    weight: factor.weight,
                    category: group.key.clone(),
                    category_name: group.name.clone(),
                });
            }
        }

        let unknown = selected.len() - matched.len();
        if unknown > 0 {
            tracing::debug!(unknown, "ignored unknown factor ids");
        }
        matched
    }

    /// Texts of the matched factors grouped by category, in catalog order.
    /// Every category appears, matched or not.
    pub fn recommendations_by_category(
        &self,
        matched: &[MatchedFactor],
    ) -> Vec<CategoryRecommendations> {
        self.groups
            .iter()
            .map(|group| CategoryRecommendations {
                category: group.key.clone(),
                name: group.name.clone(),
                items: group
                    .factors
                    .iter()
                    .filter(|f| matched.iter().any(|m| m.id == f.id))
                    .map(|f| f.text.clone())
                    .collect(),
            })
            .collect()
    }
}

/// Factor catalog with the tier table its totals are placed in.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    factors: FactorCatalog,
    tiers: TierTable,
}

impl RuleCatalog {
    pub fn new(groups: Vec<FactorGroup>, tiers: TierTable) -> Result<Self, ScoringError> {
        Ok(Self {
            factors: FactorCatalog::new(groups)?,
            tiers,
        })
    }

    pub fn groups(&self) -> &[FactorGroup] {
        self.factors.groups()
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Sum the weights of the selected factors. Unknown ids are ignored and
    /// a repeated id counts once.
    pub fn score<S: AsRef<str>>(&self, selected: &[S]) -> RiskAssessment {
        let (total_score, matched_factors) = self.matched(selected);
        let tier = self.tiers.resolve(total_score).clone();
        RiskAssessment {
            total_score,
            matched_factors,
            tier: TierResolution {
                score: total_score,
                tier,
                forced_by: None,
            },
        }
    }

    /// Like [`RuleCatalog::score`], but precondition overrides are checked
    /// before the total is tiered.
    pub fn score_with<S, I>(&self, selected: &[S], overrides: I) -> Result<RiskAssessment, ScoringError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = TierOverride>,
    {
        let (total_score, matched_factors) = self.matched(selected);
        let tier = self.tiers.resolve_with(total_score, overrides)?;
        Ok(RiskAssessment {
            total_score,
            matched_factors,
            tier,
        })
    }

    pub fn recommendations_by_category(
        &self,
        matched: &[MatchedFactor],
    ) -> Vec<CategoryRecommendations> {
        self.factors.recommendations_by_category(matched)
    }

    fn matched<S: AsRef<str>>(&self, selected: &[S]) -> (u32, Vec<MatchedFactor>) {
        let matched = self.factors.matched(selected);
        (matched.iter().map(|f| f.weight).sum(), matched)
    }
}
