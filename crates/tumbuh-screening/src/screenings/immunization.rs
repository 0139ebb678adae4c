//! National immunization schedule, per-dose status and catch-up advice.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScheduledDose {
    /// Dose code as recorded, e.g. "DTP-HB-Hib2".
    pub code: String,
    pub vaccine: String,
    /// Series the dose belongs to, e.g. "DTP-HB-Hib".
    pub series: String,
    pub dose_number: u8,
    pub min_age_months: u32,
    pub max_age_months: u32,
    pub notes: String,
}

fn dose(
    code: &str,
    vaccine: &str,
    series: &str,
    dose_number: u8,
    ages: (u32, u32),
    notes: &str,
) -> ScheduledDose {
    ScheduledDose {
        code: code.to_string(),
        vaccine: vaccine.to_string(),
        series: series.to_string(),
        dose_number,
        min_age_months: ages.0,
        max_age_months: ages.1,
        notes: notes.to_string(),
    }
}

static SCHEDULE: LazyLock<Vec<ScheduledDose>> = LazyLock::new(|| {
    vec![
        dose("HB0", "Hepatitis B", "HB", 1, (0, 1), "Dalam 24 jam setelah lahir"),
        dose("BCG", "BCG", "BCG", 1, (1, 2), "Satu dosis"),
        dose("Polio1", "Polio", "Polio", 1, (1, 2), "OPV1"),
        dose("DTP-HB-Hib1", "DTP-HB-Hib", "DTP-HB-Hib", 1, (1, 2), "Pentavalen 1"),
        dose("Polio2", "Polio", "Polio", 2, (2, 3), "OPV2"),
        dose("DTP-HB-Hib2", "DTP-HB-Hib", "DTP-HB-Hib", 2, (2, 3), "Pentavalen 2"),
        dose("Polio3", "Polio", "Polio", 3, (3, 4), "OPV3"),
        dose("DTP-HB-Hib3", "DTP-HB-Hib", "DTP-HB-Hib", 3, (3, 4), "Pentavalen 3"),
        dose("Polio4", "Polio", "Polio", 4, (4, 5), "OPV4"),
        dose("MR1", "Measles-Rubella", "MR", 1, (6, 11), "Campak-Rubela 1"),
        dose("JE1", "Japanese Encephalitis", "JE", 1, (9, 11), "Daerah endemis"),
        dose("MR2", "Measles-Rubella", "MR", 2, (18, 24), "Campak-Rubela 2"),
        dose("DTP-HB-Hib4", "DTP-HB-Hib", "DTP-HB-Hib", 4, (18, 24), "Pentavalen booster"),
        dose("DT", "Difteri-Tetanus", "DT", 1, (24, 71), "BIAS - kelas 1 SD"),
        dose("JE2", "Japanese Encephalitis", "JE", 2, (24, 71), "Daerah endemis"),
        dose("HPV1", "Human Papillomavirus", "HPV", 1, (108, 168), "2 dosis (0, 6-12 bulan)"),
    ]
});

/// Every scheduled dose, by age of first eligibility.
pub fn schedule() -> &'static [ScheduledDose] {
    &SCHEDULE
}

pub fn general_contraindications() -> Vec<String> {
    [
        "Reaksi alergi berat (anafilaksis) pada dosis sebelumnya",
        "Imunodefisiensi berat (untuk vaksin hidup)",
        "Kehamilan (untuk vaksin hidup)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn series_contraindications(series: &str) -> Vec<String> {
    let items: &[&str] = match series {
        "DTP-HB-Hib" | "DT" => &[
            "Ensefalopati dalam 7 hari setelah dosis sebelumnya",
            "Gangguan saraf progresif",
        ],
        "MR" => &["Imunodefisiensi", "Kehamilan", "Tuberkulosis yang belum diobati"],
        "JE" => &["Alergi terhadap protein telur", "Imunokompromais"],
        "HPV" => &["Kehamilan", "Reaksi alergi berat pada komponen vaksin"],
        _ => &[],
    };
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DoseStatus {
    NotDue,
    Due,
    Overdue,
    Complete,
}

pub fn dose_status(dose: &ScheduledDose, age_months: u32, received: &HashSet<&str>) -> DoseStatus {
    if received.contains(dose.code.as_str()) {
        DoseStatus::Complete
    } else if age_months < dose.min_age_months {
        DoseStatus::NotDue
    } else if age_months > dose.max_age_months {
        DoseStatus::Overdue
    } else {
        DoseStatus::Due
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DoseStatusEntry {
    pub dose: ScheduledDose,
    pub status: DoseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CatchUpPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatchUp {
    pub series: String,
    pub name: String,
    pub schedule: String,
    pub priority: CatchUpPriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeriesProgress {
    pub series: String,
    pub received: u32,
    pub scheduled: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImmunizationReport {
    pub age_months: u32,
    pub statuses: Vec<DoseStatusEntry>,
    pub due: Vec<DoseStatusEntry>,
    pub series: Vec<SeriesProgress>,
    pub catch_up: Vec<CatchUp>,
    pub contraindications: Vec<String>,
    /// Received codes that are not on the schedule.
    pub unrecognized: Vec<String>,
}

/// Doses of a series that are already due at this age and not received.
fn missing_in_series(series: &str, age_months: u32, received: &HashSet<&str>, limit: u8) -> usize {
    schedule()
        .iter()
        .filter(|d| d.series == series && d.dose_number <= limit)
        .filter(|d| d.min_age_months <= age_months && !received.contains(d.code.as_str()))
        .count()
}

/// Catch-up recommendations, highest priority first.
pub fn catch_up(age_months: u32, received: &HashSet<&str>) -> Vec<CatchUp> {
    let mut items = Vec::new();

    if !received.contains("HB0") {
        items.push(CatchUp {
            series: "HB".into(),
            name: "Hepatitis B".into(),
            schedule: if age_months < 12 {
                "3 dosis (0, 1, 6 bulan)".into()
            } else {
                "3 dosis sesuai jadwal dewasa".into()
            },
            priority: CatchUpPriority::High,
        });
    }

    if age_months < 12 {
        let missing = missing_in_series("DTP-HB-Hib", age_months, received, 3);
        if missing > 0 {
            items.push(CatchUp {
                series: "DTP-HB-Hib".into(),
                name: "DTP-HB-Hib".into(),
                schedule: format!("{missing} dosis tersisa (interval 4 minggu)"),
                priority: CatchUpPriority::High,
            });
        }
    }

    if age_months >= 6 && !received.contains("MR1") {
        let doses = if age_months < 18 { 1 } else { 2 };
        items.push(CatchUp {
            series: "MR".into(),
            name: "Measles-Rubella".into(),
            schedule: format!("{doses} dosis (interval minimal 4 minggu)"),
            priority: CatchUpPriority::High,
        });
    }

    if age_months < 60 {
        let missing = missing_in_series("Polio", age_months, received, 4);
        if missing > 0 {
            items.push(CatchUp {
                series: "Polio".into(),
                name: "Polio".into(),
                schedule: format!("{missing} dosis OPV/IPV"),
                priority: CatchUpPriority::Medium,
            });
        }
    }

    items.sort_by_key(|c| c.priority);
    items
}

pub fn assess<S: AsRef<str>>(age_months: u32, received: &[S]) -> ImmunizationReport {
    let received: HashSet<&str> = received.iter().map(|s| s.as_ref()).collect();

    let statuses: Vec<DoseStatusEntry> = schedule()
        .iter()
        .map(|d| DoseStatusEntry {
            dose: d.clone(),
            status: dose_status(d, age_months, &received),
        })
        .collect();
    let due = statuses
        .iter()
        .filter(|s| matches!(s.status, DoseStatus::Due | DoseStatus::Overdue))
        .cloned()
        .collect();

    let mut series: Vec<SeriesProgress> = Vec::new();
    for d in schedule() {
        let taken = u32::from(received.contains(d.code.as_str()));
        match series.iter_mut().find(|s| s.series == d.series) {
            Some(progress) => {
                progress.received += taken;
                progress.scheduled += 1;
            }
            None => series.push(SeriesProgress {
                series: d.series.clone(),
                received: taken,
                scheduled: 1,
            }),
        }
    }

    let mut unrecognized: Vec<String> = received
        .iter()
        .filter(|code| !schedule().iter().any(|d| d.code == **code))
        .map(|code| code.to_string())
        .collect();
    unrecognized.sort();

    tracing::debug!(age_months, received = received.len(), "assessed immunization");

    ImmunizationReport {
        age_months,
        due,
        series,
        catch_up: catch_up(age_months, &received),
        contraindications: general_contraindications(),
        statuses,
        unrecognized,
    }
}
