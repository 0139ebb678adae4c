use tumbuh_core::error::CoreError;
use tumbuh_core::models::tier::{ColorTag, SeverityTier, TierOverride, TierTable};

fn tier(key: &str, min: u32, max: Option<u32>) -> SeverityTier {
    SeverityTier {
        key: key.to_string(),
        label: key.to_uppercase(),
        color: ColorTag::Good,
        min_score: min,
        max_score: max,
        action: format!("{key} action"),
        timeline: String::new(),
        description: String::new(),
        advice: vec![],
    }
}

fn low_medium_high() -> TierTable {
    TierTable::new(vec![
        tier("high", 7, None),
        tier("low", 0, Some(3)),
        tier("medium", 4, Some(6)),
    ])
    .unwrap()
}

#[test]
fn tiers_are_sorted_on_construction() {
    let table = low_medium_high();
    let keys: Vec<_> = table.tiers().iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, ["low", "medium", "high"]);
}

#[test]
fn resolve_picks_highest_qualifying_tier() {
    let table = low_medium_high();
    assert_eq!(table.resolve(0).key, "low");
    assert_eq!(table.resolve(3).key, "low");
    assert_eq!(table.resolve(4).key, "medium");
    assert_eq!(table.resolve(6).key, "medium");
    assert_eq!(table.resolve(7).key, "high");
    assert_eq!(table.resolve(500).key, "high");
}

#[test]
fn every_score_falls_in_exactly_one_tier() {
    let table = low_medium_high();
    for score in 0..50 {
        let hits = table.tiers().iter().filter(|t| t.contains(score)).count();
        assert_eq!(hits, 1, "score {score}");
        assert!(table.resolve(score).contains(score));
    }
}

#[test]
fn gap_between_tiers_is_rejected() {
    let err = TierTable::new(vec![tier("low", 0, Some(3)), tier("high", 5, None)]).unwrap_err();
    assert!(matches!(err, CoreError::InvalidTiers(msg) if msg.contains("gap")));
}

#[test]
fn overlapping_tiers_are_rejected() {
    let err = TierTable::new(vec![tier("low", 0, Some(4)), tier("high", 4, None)]).unwrap_err();
    assert!(matches!(err, CoreError::InvalidTiers(msg) if msg.contains("overlaps")));
}

#[test]
fn bounded_top_tier_is_rejected() {
    assert!(TierTable::new(vec![tier("low", 0, Some(3)), tier("high", 4, Some(14))]).is_err());
}

#[test]
fn table_must_start_at_zero() {
    assert!(TierTable::new(vec![tier("low", 1, Some(3)), tier("high", 4, None)]).is_err());
}

#[test]
fn unbounded_tier_below_another_is_rejected() {
    assert!(TierTable::new(vec![tier("low", 0, None), tier("high", 4, None)]).is_err());
}

#[test]
fn first_override_wins_over_score() {
    let table = low_medium_high();
    let resolved = table
        .resolve_with(
            1,
            vec![
                TierOverride::top("neonate"),
                TierOverride::to("medium", "long duration"),
            ],
        )
        .unwrap();
    assert_eq!(resolved.tier.key, "high");
    assert_eq!(resolved.forced_by.as_deref(), Some("neonate"));
    assert_eq!(resolved.score, 1);
}

#[test]
fn no_override_falls_back_to_score() {
    let table = low_medium_high();
    let resolved = table.resolve_with(5, Vec::new()).unwrap();
    assert_eq!(resolved.tier.key, "medium");
    assert!(resolved.forced_by.is_none());
}

#[test]
fn override_to_unknown_tier_is_an_error() {
    let table = low_medium_high();
    let err = table
        .resolve_with(0, vec![TierOverride::to("critical", "x")])
        .unwrap_err();
    assert!(matches!(err, CoreError::UnknownTier(k) if k == "critical"));
}

#[test]
fn deserializing_validates_the_partition() {
    let ok = r#"[
        {"key":"low","label":"Low","color":"good","min_score":0,"max_score":3,"action":"","timeline":"","description":""},
        {"key":"high","label":"High","color":"bad","min_score":4,"action":"","timeline":"","description":""}
    ]"#;
    let table: TierTable = serde_json::from_str(ok).unwrap();
    assert_eq!(table.top().key, "high");

    let gap = r#"[
        {"key":"low","label":"Low","color":"good","min_score":0,"max_score":3,"action":"","timeline":"","description":""},
        {"key":"high","label":"High","color":"bad","min_score":6,"action":"","timeline":"","description":""}
    ]"#;
    assert!(serde_json::from_str::<TierTable>(gap).is_err());
}
