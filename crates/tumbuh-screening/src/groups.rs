//! Single-selection group scoring: exactly one option per sign group
//! contributes its points.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ScoringError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SignOption {
    pub label: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SignGroup {
    pub key: String,
    pub name: String,
    /// Required groups must have a selection for the total to be complete.
    pub required: bool,
    pub options: Vec<SignOption>,
}

impl SignGroup {
    /// A group whose option points are their positions, 0, 1, 2, ...
    pub fn ordinal(key: &str, name: &str, required: bool, labels: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            required,
            options: labels
                .iter()
                .zip(0..)
                .map(|(label, points)| SignOption {
                    label: label.to_string(),
                    points,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedSign {
    pub group: String,
    pub group_name: String,
    pub label: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupScore {
    pub total_points: u32,
    /// In catalog order.
    pub selections: Vec<SelectedSign>,
}

#[derive(Debug, Clone)]
pub struct SignCatalog {
    groups: Vec<SignGroup>,
}

impl SignCatalog {
    pub fn new(groups: Vec<SignGroup>) -> Result<Self, ScoringError> {
        let mut keys = HashSet::new();
        for group in &groups {
            if !keys.insert(group.key.as_str()) {
                return Err(ScoringError::InvalidCatalog(format!(
                    "duplicate sign group '{}'",
                    group.key
                )));
            }
            if group.options.is_empty() {
                return Err(ScoringError::InvalidCatalog(format!(
                    "sign group '{}' has no options",
                    group.key
                )));
            }
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[SignGroup] {
        &self.groups
    }

    /// Largest total the catalog can produce.
    pub fn max_points(&self) -> u32 {
        self.groups
            .iter()
            .filter_map(|g| g.options.iter().map(|o| o.points).max())
            .sum()
    }

    /// Sum the points of the selected option in each group.
    ///
    /// Selections are option indices keyed by group key. Keys that name no
    /// group are ignored. Every missing required group is reported together.
    pub fn score(&self, selections: &BTreeMap<String, usize>) -> Result<GroupScore, ScoringError> {
        let missing: Vec<String> = self
            .groups
            .iter()
            .filter(|g| g.required && !selections.contains_key(&g.key))
            .map(|g| g.key.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ScoringError::IncompleteAssessment { missing });
        }

        let mut total_points = 0;
        let mut chosen = Vec::new();
        for group in &self.groups {
            let Some(&index) = selections.get(&group.key) else {
                continue;
            };
            let option = group
                .options
                .get(index)
                .ok_or_else(|| ScoringError::SelectionOutOfRange {
                    group: group.key.clone(),
                    index,
                    options: group.options.len(),
                })?;
            total_points += option.points;
            chosen.push(SelectedSign {
                group: group.key.clone(),
                group_name: group.name.clone(),
                label: option.label.clone(),
                points: option.points,
            });
        }

        Ok(GroupScore {
            total_points,
            selections: chosen,
        })
    }
}
