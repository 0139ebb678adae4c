use std::collections::HashSet;

use tumbuh_screening::screenings::immunization::{
    CatchUpPriority, DoseStatus, assess, catch_up, dose_status, schedule,
    series_contraindications,
};

fn dose(code: &str) -> &'static tumbuh_screening::screenings::immunization::ScheduledDose {
    schedule().iter().find(|d| d.code == code).unwrap()
}

#[test]
fn schedule_codes_are_unique() {
    let codes: HashSet<&str> = schedule().iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes.len(), schedule().len());
    assert!(schedule().iter().all(|d| d.min_age_months <= d.max_age_months));
}

#[test]
fn status_follows_age_window() {
    let none = HashSet::new();
    let mr1 = dose("MR1");
    assert_eq!(dose_status(mr1, 5, &none), DoseStatus::NotDue);
    assert_eq!(dose_status(mr1, 6, &none), DoseStatus::Due);
    assert_eq!(dose_status(mr1, 11, &none), DoseStatus::Due);
    assert_eq!(dose_status(mr1, 12, &none), DoseStatus::Overdue);

    let received: HashSet<&str> = ["MR1"].into_iter().collect();
    assert_eq!(dose_status(mr1, 12, &received), DoseStatus::Complete);
}

#[test]
fn infant_on_schedule() {
    let report = assess(2, &["HB0", "BCG", "Polio1", "DTP-HB-Hib1"]);

    let due: Vec<&str> = report.due.iter().map(|s| s.dose.code.as_str()).collect();
    assert_eq!(due, ["Polio2", "DTP-HB-Hib2"]);

    let priorities: Vec<(&str, CatchUpPriority)> = report
        .catch_up
        .iter()
        .map(|c| (c.series.as_str(), c.priority))
        .collect();
    assert_eq!(
        priorities,
        [("DTP-HB-Hib", CatchUpPriority::High), ("Polio", CatchUpPriority::Medium)]
    );
    assert!(report.unrecognized.is_empty());
}

#[test]
fn unvaccinated_toddler_catch_up() {
    let plan = catch_up(20, &HashSet::new());
    let series: Vec<&str> = plan.iter().map(|c| c.series.as_str()).collect();
    assert_eq!(series, ["HB", "MR", "Polio"]);

    assert_eq!(plan[0].schedule, "3 dosis sesuai jadwal dewasa");
    assert_eq!(plan[1].schedule, "2 dosis (interval minimal 4 minggu)");
    assert_eq!(plan[2].schedule, "4 dosis OPV/IPV");
    assert_eq!(plan[2].priority, CatchUpPriority::Medium);
}

#[test]
fn young_infant_hepatitis_b_schedule() {
    let plan = catch_up(0, &HashSet::new());
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].schedule, "3 dosis (0, 1, 6 bulan)");
}

#[test]
fn series_progress_and_unknown_codes() {
    let report = assess(30, &["HB0", "MR1", "MR2", "XYZ"]);

    let mr = report.series.iter().find(|s| s.series == "MR").unwrap();
    assert_eq!((mr.received, mr.scheduled), (2, 2));
    let polio = report.series.iter().find(|s| s.series == "Polio").unwrap();
    assert_eq!((polio.received, polio.scheduled), (0, 4));

    assert_eq!(report.unrecognized, ["XYZ"]);
    assert!(report.catch_up.iter().all(|c| c.series != "MR"));
    assert!(
        report
            .statuses
            .iter()
            .any(|s| s.dose.code == "JE2" && s.status == DoseStatus::Due)
    );
}

#[test]
fn contraindications() {
    assert!(!series_contraindications("MR").is_empty());
    assert!(series_contraindications("BCG").is_empty());
    assert_eq!(assess(12, &["HB0"]).contraindications.len(), 3);
}
