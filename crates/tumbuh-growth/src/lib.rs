//! tumbuh-growth
//!
//! Growth reference classification. A measurement is compared against the
//! SD boundaries of the nearest reference row and mapped to a nutritional
//! status for its index family.

pub mod error;
pub mod labels;
pub mod reference;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_core::classify::band_index;
use tumbuh_core::error::require_positive;
use tumbuh_core::models::patient::Sex;
use tumbuh_core::models::tier::ColorTag;

use error::GrowthError;
use labels::{GrowthStatus, IndexFamily, sd_code};
use reference::{ReferenceData, ReferenceRow};

/// Result of one growth comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GrowthClassification {
    pub family: IndexFamily,
    pub sex: Sex,
    /// The reference bucket the measurement was compared against.
    pub bucket_key: String,
    pub measurement: f64,
    /// Number of SD boundaries the measurement reached.
    pub band: usize,
    pub sd_code: Option<i8>,
    pub status: GrowthStatus,
    pub label: String,
    pub color: ColorTag,
}

/// All three comparisons for one visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GrowthReport {
    pub length_for_age: GrowthClassification,
    pub weight_for_age: GrowthClassification,
    pub weight_for_length: GrowthClassification,
}

/// Classifies anthropometric measurements against injected reference data.
#[derive(Debug, Clone)]
pub struct GrowthClassifier {
    reference: Arc<ReferenceData>,
}

impl GrowthClassifier {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn classify_length_for_age(
        &self,
        sex: Sex,
        age_months: u32,
        length_cm: f64,
    ) -> Result<GrowthClassification, GrowthError> {
        require_positive("length_cm", length_cm)?;
        let row = self.age_row(sex, IndexFamily::Lfa, age_months)?;
        classify_row(sex, IndexFamily::Lfa, row, length_cm)
    }

    pub fn classify_weight_for_age(
        &self,
        sex: Sex,
        age_months: u32,
        weight_kg: f64,
    ) -> Result<GrowthClassification, GrowthError> {
        require_positive("weight_kg", weight_kg)?;
        let row = self.age_row(sex, IndexFamily::Wfa, age_months)?;
        classify_row(sex, IndexFamily::Wfa, row, weight_kg)
    }

    /// Weight against the length bucket closest to `length_cm`.
    pub fn classify_weight_for_length(
        &self,
        sex: Sex,
        length_cm: f64,
        weight_kg: f64,
    ) -> Result<GrowthClassification, GrowthError> {
        require_positive("length_cm", length_cm)?;
        require_positive("weight_kg", weight_kg)?;
        let row = self.length_row(sex, length_cm)?;
        classify_row(sex, IndexFamily::Wfl, row, weight_kg)
    }

    pub fn classify_all(
        &self,
        sex: Sex,
        age_months: u32,
        length_cm: f64,
        weight_kg: f64,
    ) -> Result<GrowthReport, GrowthError> {
        Ok(GrowthReport {
            length_for_age: self.classify_length_for_age(sex, age_months, length_cm)?,
            weight_for_age: self.classify_weight_for_age(sex, age_months, weight_kg)?,
            weight_for_length: self.classify_weight_for_length(sex, length_cm, weight_kg)?,
        })
    }

    /// The weight-for-length bucket key a length resolves to.
    pub fn closest_length_key(&self, sex: Sex, length_cm: f64) -> Result<&str, GrowthError> {
        Ok(self.length_row(sex, length_cm)?.label.as_str())
    }

    fn age_row(
        &self,
        sex: Sex,
        family: IndexFamily,
        age_months: u32,
    ) -> Result<&ReferenceRow, GrowthError> {
        self.reference
            .table(sex, family)?
            .row_at(age_months)
            .ok_or_else(|| GrowthError::Lookup {
                sex,
                family,
                key: age_months.to_string(),
            })
    }

    fn length_row(&self, sex: Sex, length_cm: f64) -> Result<&ReferenceRow, GrowthError> {
        let table = self.reference.table(sex, IndexFamily::Wfl)?;
        if !table.covers(length_cm) {
            tracing::warn!(%sex, length_cm, "length outside weight-for-length reference span");
            return Err(GrowthError::Lookup {
                sex,
                family: IndexFamily::Wfl,
                key: format!("{length_cm}"),
            });
        }
        Ok(table.closest_row(length_cm))
    }
}

fn classify_row(
    sex: Sex,
    family: IndexFamily,
    row: &ReferenceRow,
    value: f64,
) -> Result<GrowthClassification, GrowthError> {
    let band = band_index(&row.boundaries, value)?;
    let status = family.status_for_band(band);

    tracing::debug!(%sex, %family, bucket = %row.label, value, band, ?status, "classified measurement");

    Ok(GrowthClassification {
        family,
        sex,
        bucket_key: row.label.clone(),
        measurement: value,
        band,
        sd_code: sd_code(band),
        status,
        label: status.label().to_string(),
        color: status.color(),
    })
}
