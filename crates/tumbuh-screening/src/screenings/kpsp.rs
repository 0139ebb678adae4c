//! KPSP developmental pre-screening questionnaire.
//!
//! Ten yes/no questions per age group from 0 to 72 months. The number of
//! "yes" answers is the score; a higher score is a better result.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tumbuh_core::error::CoreError;
use tumbuh_core::models::tier::{ColorTag, SeverityTier, TierResolution, TierTable};

use crate::Screening;
use crate::error::ScoringError;
use crate::screenings::TierText;

const EMBEDDED: &str = include_str!("../../data/kpsp.json");

pub const QUESTIONS_PER_GROUP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DevelopmentDomain {
    #[serde(rename = "Komunikasi")]
    Communication,
    #[serde(rename = "Motorik Kasar")]
    GrossMotor,
    #[serde(rename = "Motorik Halus")]
    FineMotor,
    #[serde(rename = "Sosialisasi")]
    Social,
    #[serde(rename = "Kognitif")]
    Cognitive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KpspQuestion {
    pub number: u8,
    pub text: String,
    pub domain: DevelopmentDomain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KpspAgeGroup {
    pub min_age_months: u32,
    pub max_age_months: u32,
    pub label: String,
    pub questions: Vec<KpspQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestionnaire {
    #[serde(default)]
    description: String,
    age_groups: Vec<KpspAgeGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DomainTally {
    pub domain: DevelopmentDomain,
    pub total: u32,
    pub yes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct KpspReport {
    pub age_group: String,
    pub yes_count: u32,
    pub tier: TierResolution,
    pub domains: Vec<DomainTally>,
    /// Questions answered "no", in questionnaire order.
    pub unmet: Vec<KpspQuestion>,
}

#[derive(Debug, Clone)]
pub struct Kpsp {
    description: String,
    groups: Vec<KpspAgeGroup>,
    tiers: TierTable,
}

impl Kpsp {
    /// The questionnaire compiled into the crate.
    pub fn embedded() -> Result<Self, ScoringError> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScoringError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ScoringError> {
        let raw: RawQuestionnaire = serde_json::from_str(json)?;
        let groups = validate(raw.age_groups)?;
        tracing::info!(groups = groups.len(), "kpsp questionnaire ready");
        Ok(Self {
            description: raw.description,
            groups,
            tiers: tier_table()?,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn groups(&self) -> &[KpspAgeGroup] {
        &self.groups
    }

    pub fn age_group(&self, age_months: u32) -> Result<&KpspAgeGroup, ScoringError> {
        self.groups
            .iter()
            .find(|g| (g.min_age_months..=g.max_age_months).contains(&age_months))
            .ok_or_else(|| {
                ScoringError::Lookup(format!("no KPSP age group for {age_months} months"))
            })
    }

    /// Score one answer per question, in question order.
    pub fn assess(&self, age_months: u32, answers: &[bool]) -> Result<KpspReport, ScoringError> {
        let group = self.age_group(age_months)?;
        let questions = &group.questions;

        if answers.len() < questions.len() {
            return Err(ScoringError::IncompleteAssessment {
                missing: questions[answers.len()..]
                    .iter()
                    .map(|q| format!("question {}", q.number))
                    .collect(),
            });
        }
        if answers.len() > questions.len() {
            return Err(CoreError::invalid_input(
                "answers",
                format!("{} answers for {} questions", answers.len(), questions.len()),
            )
            .into());
        }

        let mut tallies: BTreeMap<DevelopmentDomain, DomainTally> = BTreeMap::new();
        let mut unmet = Vec::new();
        let mut yes_count = 0;
        for (question, &yes) in questions.iter().zip(answers) {
            let tally = tallies.entry(question.domain).or_insert(DomainTally {
                domain: question.domain,
                total: 0,
                yes: 0,
            });
            tally.total += 1;
            if yes {
                tally.yes += 1;
                yes_count += 1;
            } else {
                unmet.push(question.clone());
            }
        }

        let tier = self.tiers.resolve_with(yes_count, std::iter::empty())?;
        tracing::debug!(age_months, yes_count, result = %tier.tier.key, "assessed kpsp");

        Ok(KpspReport {
            age_group: group.label.clone(),
            yes_count,
            tier,
            domains: tallies.into_values().collect(),
            unmet,
        })
    }
}

impl Screening for Kpsp {
    fn id(&self) -> &str {
        "kpsp"
    }

    fn name(&self) -> &str {
        "Kuesioner Pra Skrining Perkembangan (KPSP)"
    }

    fn tiers(&self) -> &TierTable {
        &self.tiers
    }
}

/// Age groups must start at 0, be contiguous, and hold ten numbered
/// questions each.
fn validate(mut groups: Vec<KpspAgeGroup>) -> Result<Vec<KpspAgeGroup>, ScoringError> {
    if groups.is_empty() {
        return Err(ScoringError::InvalidCatalog("KPSP has no age groups".into()));
    }
    groups.sort_by_key(|g| g.min_age_months);

    let mut next_age = 0;
    for group in &groups {
        if group.min_age_months != next_age {
            return Err(ScoringError::InvalidCatalog(format!(
                "KPSP group '{}' starts at {} months, expected {next_age}",
                group.label, group.min_age_months
            )));
        }
        if group.max_age_months < group.min_age_months {
            return Err(ScoringError::InvalidCatalog(format!(
                "KPSP group '{}' ends before it starts",
                group.label
            )));
        }
        if group.questions.len() != QUESTIONS_PER_GROUP {
            return Err(ScoringError::InvalidCatalog(format!(
                "KPSP group '{}' has {} questions",
                group.label,
                group.questions.len()
            )));
        }
        let numbered = group
            .questions
            .iter()
            .zip(1..)
            .all(|(q, expected)| q.number == expected);
        if !numbered {
            return Err(ScoringError::InvalidCatalog(format!(
                "KPSP group '{}' questions are not numbered 1-{QUESTIONS_PER_GROUP}",
                group.label
            )));
        }
        next_age = group.max_age_months + 1;
    }
    Ok(groups)
}

fn tier_table() -> Result<TierTable, ScoringError> {
    let tiers: Vec<SeverityTier> = vec![
        TierText {
            key: "deviant",
            label: "Menyimpang",
            color: ColorTag::Bad,
            min: 0,
            max: Some(6),
            action: "Rujuk ke fasilitas kesehatan",
            timeline: "Segera",
            description: "Perkembangan anak menunjukkan penyimpangan. Perlu evaluasi dan intervensi segera.",
            advice: &["Segera rujuk ke fasilitas kesehatan untuk pemeriksaan dan intervensi dini."],
        }
        .into(),
        TierText {
            key: "doubtful",
            label: "Meragukan",
            color: ColorTag::Warn,
            min: 7,
            max: Some(8),
            action: "Ulangi skrining",
            timeline: "Dalam 2 minggu",
            description: "Perkembangan anak perlu diperhatikan lebih lanjut. Mungkin perlu pemeriksaan lanjutan.",
            advice: &[
                "Ulangi skrining dalam 2 minggu. Jika masih meragukan, rujuk ke fasilitas kesehatan untuk evaluasi lebih lanjut.",
            ],
        }
        .into(),
        TierText {
            key: "appropriate",
            label: "Sesuai Usia",
            color: ColorTag::Good,
            min: 9,
            max: None,
            action: "Lanjutkan stimulasi",
            timeline: "Sesuai jadwal skrining berikutnya",
            description: "Perkembangan anak sesuai dengan usianya. Lanjutkan stimulasi dan pemantauan rutin.",
            advice: &["Teruskan stimulasi sesuai usia. Pantau tumbuh kembang secara berkala."],
        }
        .into(),
    ];
    Ok(TierTable::new(tiers)?)
}
