//! Growth reference tables.
//!
//! Reference data is keyed by sex → index family → bucket key → ascending
//! SD boundaries. Age-indexed families use integer month keys; the
//! length-indexed family uses decimal cm keys that are matched by closest
//! distance.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tumbuh_core::classify::check_ascending;
use tumbuh_core::models::patient::Sex;

use crate::error::GrowthError;
use crate::labels::IndexFamily;

const EMBEDDED: &str = include_str!("../data/who_growth_0_24.json");

#[derive(Debug, Deserialize)]
struct RawReference {
    #[serde(default)]
    description: String,
    tables: BTreeMap<Sex, BTreeMap<IndexFamily, BTreeMap<String, Vec<f64>>>>,
}

/// One bucket of a reference table.
#[derive(Debug, Clone)]
pub struct ReferenceRow {
    /// Numeric value of the bucket key (months or cm).
    pub key: f64,
    /// The key as written in the source data, e.g. "12" or "85.5".
    pub label: String,
    pub boundaries: Vec<f64>,
}

/// All rows for one sex and index family, ascending by key.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    family: IndexFamily,
    rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    fn build(
        sex: Sex,
        family: IndexFamily,
        raw: BTreeMap<String, Vec<f64>>,
    ) -> Result<Self, GrowthError> {
        if raw.is_empty() {
            return Err(GrowthError::InvalidReference(format!(
                "{sex}/{family} has no rows"
            )));
        }

        // Every row of a table classifies into the same set of bands.
        let width = raw.values().next().map_or(0, Vec::len);
        let mut rows = Vec::with_capacity(raw.len());
        for (label, boundaries) in raw {
            let key = parse_key(family, &label).ok_or_else(|| {
                GrowthError::InvalidReference(format!("{sex}/{family}: bad bucket key '{label}'"))
            })?;
            check_ascending(&boundaries).map_err(|e| {
                GrowthError::InvalidReference(format!("{sex}/{family}/{label}: {e}"))
            })?;
            if boundaries.len() != width {
                return Err(GrowthError::InvalidReference(format!(
                    "{sex}/{family}/{label}: {} boundaries, other rows have {width}",
                    boundaries.len()
                )));
            }
            rows.push(ReferenceRow {
                key,
                label,
                boundaries,
            });
        }

        rows.sort_by(|a, b| a.key.total_cmp(&b.key));
        if let Some(pair) = rows.windows(2).find(|w| w[0].key == w[1].key) {
            return Err(GrowthError::InvalidReference(format!(
                "{sex}/{family}: keys '{}' and '{}' collide",
                pair[0].label, pair[1].label
            )));
        }

        Ok(Self { family, rows })
    }

    pub fn family(&self) -> IndexFamily {
        self.family
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    /// Exact row for an integer key (age in months).
    pub fn row_at(&self, key: u32) -> Option<&ReferenceRow> {
        let key = f64::from(key);
        self.rows.iter().find(|r| r.key == key)
    }

    /// Row whose key is nearest to `value`; ties go to the lower key.
    pub fn closest_row(&self, value: f64) -> &ReferenceRow {
        let mut best = &self.rows[0];
        for row in &self.rows[1..] {
            if (row.key - value).abs() < (best.key - value).abs() {
                best = row;
            }
        }
        best
    }

    /// Whether `value` lies within the key span, widened by the widest gap
    /// between adjacent keys.
    pub fn covers(&self, value: f64) -> bool {
        let gap = self
            .rows
            .windows(2)
            .map(|w| w[1].key - w[0].key)
            .fold(0.0, f64::max);
        let first = self.rows[0].key;
        let last = self.rows[self.rows.len() - 1].key;
        value >= first - gap && value <= last + gap
    }
}

fn parse_key(family: IndexFamily, label: &str) -> Option<f64> {
    if family.is_age_indexed() {
        label.parse::<u32>().ok().map(f64::from)
    } else {
        label
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
    }
}

/// Immutable reference dataset, loaded once and shared by classifiers.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    description: String,
    tables: HashMap<(Sex, IndexFamily), ReferenceTable>,
}

impl ReferenceData {
    /// The dataset compiled into the crate.
    pub fn embedded() -> Result<Self, GrowthError> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_path(path: &Path) -> Result<Self, GrowthError> {
        let contents = std::fs::read_to_string(path)?;
        let data = Self::from_json(&contents)?;
        tracing::info!(path = %path.display(), "loaded growth reference data from file");
        Ok(data)
    }

    pub fn from_json(json: &str) -> Result<Self, GrowthError> {
        let raw: RawReference = serde_json::from_str(json)?;

        let mut tables = HashMap::new();
        for (sex, families) in raw.tables {
            for (family, rows) in families {
                let table = ReferenceTable::build(sex, family, rows)?;
                tables.insert((sex, family), table);
            }
        }

        tracing::info!(
            tables = tables.len(),
            rows = tables.values().map(|t| t.rows.len()).sum::<usize>(),
            "growth reference data ready"
        );

        Ok(Self {
            description: raw.description,
            tables,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn table(&self, sex: Sex, family: IndexFamily) -> Result<&ReferenceTable, GrowthError> {
        self.tables
            .get(&(sex, family))
            .ok_or_else(|| GrowthError::Lookup {
                sex,
                family,
                key: "*".to_string(),
            })
    }
}
