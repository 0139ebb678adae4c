//! Every reference table and rule catalog, built and validated once.

use std::sync::Arc;

use tumbuh_growth::GrowthClassifier;
use tumbuh_growth::reference::ReferenceData;
use tumbuh_screening::screenings::dehydration::Dehydration;
use tumbuh_screening::screenings::fever::Fever;
use tumbuh_screening::screenings::kpsp::Kpsp;
use tumbuh_screening::screenings::risk::NutritionRisk;
use tumbuh_screening::{Screening, ScreeningSummary};

use crate::config::TumbuhConfig;

pub struct Engine {
    pub(crate) growth: GrowthClassifier,
    pub(crate) nutrition_risk: NutritionRisk,
    pub(crate) dehydration: Dehydration,
    pub(crate) fever: Fever,
    pub(crate) kpsp: Kpsp,
}

impl Engine {
    pub fn new(config: &TumbuhConfig) -> eyre::Result<Self> {
        let reference = match &config.reference_data_path {
            Some(path) => ReferenceData::from_path(path)
                .map_err(|e| eyre::eyre!("failed to load {}: {e}", path.display()))?,
            None => ReferenceData::embedded()?,
        };

        let engine = Self {
            growth: GrowthClassifier::new(Arc::new(reference)),
            nutrition_risk: NutritionRisk::new()?,
            dehydration: Dehydration::new()?,
            fever: Fever::new()?,
            kpsp: Kpsp::embedded()?,
        };
        tracing::info!(screenings = engine.screenings().len(), "engine ready");
        Ok(engine)
    }

    pub fn growth(&self) -> &GrowthClassifier {
        &self.growth
    }

    pub fn screenings(&self) -> Vec<&dyn Screening> {
        vec![
            &self.nutrition_risk as &dyn Screening,
            &self.dehydration as &dyn Screening,
            &self.kpsp as &dyn Screening,
        ]
    }

    pub fn summaries(&self) -> Vec<ScreeningSummary> {
        self.screenings().iter().map(|s| s.summary()).collect()
    }
}
