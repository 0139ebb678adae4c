//! JSON request/response dispatch.

use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use tumbuh_calc::bmi::{
    BmiResult, MetabolicRisk, RecommendationGroup, calculate_bmi, lifestyle_recommendations,
    metabolic_risks,
};
use tumbuh_calc::dosing::{DoseCalculation, MedicationId, calculate_dose};
use tumbuh_calc::fluids::{self, FluidAssessment, FluidInput};
use tumbuh_calc::iron::{IronIndication, IronPlan, iron_plan};
use tumbuh_core::models::patient::{PatientAge, Sex};
use tumbuh_growth::GrowthReport;
use tumbuh_screening::screenings::anemia::{self, AnemiaInput, AnemiaReport};
use tumbuh_screening::screenings::dehydration::{DehydrationInput, DehydrationReport};
use tumbuh_screening::screenings::fever::{FeverInput, FeverReport};
use tumbuh_screening::screenings::immunization::{self, ImmunizationReport};
use tumbuh_screening::screenings::kpsp::KpspReport;
use tumbuh_screening::screenings::risk::NutritionRiskReport;

use crate::engine::Engine;

/// Age given directly in months or as a birth date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeInput {
    #[serde(default)]
    pub age_months: Option<u32>,
    #[serde(default)]
    pub birth_date: Option<Date>,
    /// Assessment date for `birth_date`; today when absent.
    #[serde(default)]
    pub assessed_on: Option<Date>,
}

impl AgeInput {
    pub fn resolve(&self) -> eyre::Result<PatientAge> {
        match (self.age_months, self.birth_date) {
            (Some(months), _) => Ok(PatientAge::from_months(months)?),
            (None, Some(birth)) => {
                let on = self
                    .assessed_on
                    .unwrap_or_else(|| jiff::Zoned::now().date());
                Ok(PatientAge::between(birth, on)?)
            }
            (None, None) => Err(eyre::eyre!("either age_months or birth_date is required")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Growth {
        sex: Sex,
        #[serde(flatten)]
        age: AgeInput,
        length_cm: f64,
        weight_kg: f64,
    },
    Bmi {
        weight_kg: f64,
        height_cm: f64,
        #[serde(default)]
        age_months: Option<u32>,
    },
    Fluids(FluidInput),
    Dose {
        medication: MedicationId,
        weight_kg: f64,
        #[serde(default)]
        age_months: Option<u32>,
    },
    Iron {
        weight_kg: f64,
        indication: IronIndication,
    },
    NutritionRisk {
        #[serde(default)]
        factors: Vec<String>,
    },
    Dehydration(DehydrationInput),
    Fever(FeverInput),
    Kpsp {
        age_months: u32,
        answers: Vec<bool>,
    },
    Anemia(AnemiaInput),
    Immunization {
        age_months: u32,
        #[serde(default)]
        received: Vec<String>,
    },
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Growth { .. } => "growth",
            Request::Bmi { .. } => "bmi",
            Request::Fluids(_) => "fluids",
            Request::Dose { .. } => "dose",
            Request::Iron { .. } => "iron",
            Request::NutritionRisk { .. } => "nutrition_risk",
            Request::Dehydration(_) => "dehydration",
            Request::Fever(_) => "fever",
            Request::Kpsp { .. } => "kpsp",
            Request::Anemia(_) => "anemia",
            Request::Immunization { .. } => "immunization",
        }
    }
}

/// BMI with the age-dependent extras when an age was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiReport {
    pub bmi: BmiResult,
    pub metabolic_risks: Vec<MetabolicRisk>,
    pub recommendations: Vec<RecommendationGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "result", rename_all = "snake_case")]
pub enum Response {
    Growth(GrowthReport),
    Bmi(BmiReport),
    Fluids(FluidAssessment),
    Dose(DoseCalculation),
    Iron(IronPlan),
    NutritionRisk(NutritionRiskReport),
    Dehydration(DehydrationReport),
    Fever(FeverReport),
    Kpsp(KpspReport),
    Anemia(AnemiaReport),
    Immunization(ImmunizationReport),
}

/// A response stamped with the time it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub assessed_at: Timestamp,
    #[serde(flatten)]
    pub response: Response,
}

pub fn dispatch(engine: &Engine, request: &Request) -> eyre::Result<Outcome> {
    tracing::debug!(kind = request.kind(), "dispatching request");

    let response = match request {
        Request::Growth {
            sex,
            age,
            length_cm,
            weight_kg,
        } => {
            let age = age.resolve()?;
            Response::Growth(
                engine
                    .growth
                    .classify_all(*sex, age.months, *length_cm, *weight_kg)?,
            )
        }
        Request::Bmi {
            weight_kg,
            height_cm,
            age_months,
        } => {
            let bmi = calculate_bmi(*weight_kg, *height_cm)?;
            let (metabolic_risks, recommendations) = match age_months {
                Some(age) => (
                    metabolic_risks(bmi.value, *age),
                    lifestyle_recommendations(bmi.category, *age),
                ),
                None => (Vec::new(), Vec::new()),
            };
            Response::Bmi(BmiReport {
                bmi,
                metabolic_risks,
                recommendations,
            })
        }
        Request::Fluids(input) => Response::Fluids(fluids::assess(input)?),
        Request::Dose {
            medication,
            weight_kg,
            age_months,
        } => Response::Dose(calculate_dose(*medication, *weight_kg, *age_months)?),
        Request::Iron {
            weight_kg,
            indication,
        } => Response::Iron(iron_plan(*weight_kg, *indication)?),
        Request::NutritionRisk { factors } => {
            Response::NutritionRisk(engine.nutrition_risk.assess(factors))
        }
        Request::Dehydration(input) => Response::Dehydration(engine.dehydration.assess(input)?),
        Request::Fever(input) => Response::Fever(engine.fever.assess(input)?),
        Request::Kpsp {
            age_months,
            answers,
        } => Response::Kpsp(engine.kpsp.assess(*age_months, answers)?),
        Request::Anemia(input) => Response::Anemia(anemia::assess(input)?),
        Request::Immunization {
            age_months,
            received,
        } => Response::Immunization(immunization::assess(*age_months, received)),
    };

    Ok(Outcome {
        assessed_at: Timestamp::now(),
        response,
    })
}
