use tumbuh_screening::error::ScoringError;
use tumbuh_screening::{all_screenings, get_screening};

#[test]
fn every_screening_builds() {
    let ids: Vec<String> = all_screenings()
        .unwrap()
        .iter()
        .map(|s| s.id().to_string())
        .collect();
    assert_eq!(ids, ["nutrition_risk", "dehydration", "kpsp"]);
}

#[test]
fn lookup_by_id() {
    let dehydration = get_screening("dehydration").unwrap();
    assert_eq!(dehydration.tiers().tiers().len(), 3);

    let summary = dehydration.summary();
    assert_eq!(summary.id, "dehydration");
    assert_eq!(summary.tiers[2].key, "severe");
}

#[test]
fn fever_is_not_tiered_by_score() {
    assert!(matches!(
        get_screening("fever"),
        Err(ScoringError::UnknownScreening(id)) if id == "fever"
    ));
}

#[test]
fn unknown_id() {
    assert!(matches!(
        get_screening("scurvy"),
        Err(ScoringError::UnknownScreening(id)) if id == "scurvy"
    ));
}

#[test]
fn tier_descriptions_render() {
    for screening in all_screenings().unwrap() {
        let text = screening.describe_tiers();
        assert!(text.starts_with(&format!("## {}", screening.name())));
        assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), screening.tiers().tiers().len());
    }
}
