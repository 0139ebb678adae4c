use tumbuh_screening::Screening;
use tumbuh_screening::error::ScoringError;
use tumbuh_screening::screenings::dehydration::{
    Dehydration, DehydrationInput, FluidPlan, ManagementPlan,
};

const REQUIRED: [&str; 6] = [
    "general_condition",
    "eyes",
    "tears",
    "mouth_tongue",
    "skin_turgor",
    "breathing",
];

fn input(option: usize, age_months: u32) -> DehydrationInput {
    DehydrationInput {
        age_months,
        weight_kg: 10.0,
        temperature_c: None,
        stools_today: None,
        signs: REQUIRED.iter().map(|k| (k.to_string(), option)).collect(),
    }
}

#[test]
fn no_signs_is_plan_a_with_home_ors() {
    let mut case = input(0, 18);
    case.stools_today = Some(3);
    let report = Dehydration::new().unwrap().assess(&case).unwrap();

    assert_eq!(report.score.total_points, 0);
    assert_eq!(report.plan, ManagementPlan::A);
    assert_eq!(report.tier.tier.label, "Tanpa Dehidrasi");
    assert_eq!(
        report.fluid_plan,
        FluidPlan::Home {
            ors_per_stool_ml: Some(100.0),
            ors_today_ml: Some(300.0),
        }
    );
    assert!(report.danger_signs.is_empty());
    assert_eq!(report.zinc.map(|z| z.amount), Some(10.0));
}

#[test]
fn moderate_signs_get_oral_rehydration() {
    let report = Dehydration::new().unwrap().assess(&input(1, 18)).unwrap();

    assert_eq!(report.score.total_points, 6);
    assert_eq!(report.tier.tier.label, "Dehidrasi Ringan-Sedang");
    assert_eq!(report.plan, ManagementPlan::B);
    match report.fluid_plan {
        FluidPlan::Oral(plan) => assert_eq!(plan.total_ml, 750),
        other => panic!("expected oral plan, got {other:?}"),
    }
}

#[test]
fn severe_signs_get_intravenous_fluids() {
    let mut case = input(2, 18);
    case.signs.insert("heart_rate".into(), 2);
    case.temperature_c = Some(39.0);
    let report = Dehydration::new().unwrap().assess(&case).unwrap();

    assert_eq!(report.score.total_points, 14);
    assert_eq!(report.plan, ManagementPlan::C);
    match &report.fluid_plan {
        FluidPlan::Intravenous(plan) => {
            assert_eq!(plan.bolus_ml, 200);
            assert_eq!(plan.deficit_ml, 1000);
            assert_eq!(plan.total_first_day_ml, 2000);
        }
        other => panic!("expected intravenous plan, got {other:?}"),
    }
    assert_eq!(report.danger_signs[0], "Demam tinggi (≥38.5°C)");
    assert_eq!(report.danger_signs[1], "Dehidrasi berat");
    assert!(report.danger_signs.contains(&"Kejang".to_string()));
}

#[test]
fn severe_danger_signs_are_kept_apart_from_advice() {
    let dehydration = Dehydration::new().unwrap();
    let report = dehydration.assess(&input(2, 18)).unwrap();

    assert_eq!(
        report.danger_signs,
        ["Dehidrasi berat", "Letargis", "Tidak bisa minum", "Kejang"]
    );
    assert_eq!(dehydration.danger_signs_for("severe").len(), 3);
    assert!(dehydration.danger_signs_for("some").is_empty());

    let severe = dehydration.tiers().get("severe").unwrap();
    assert!(!severe.advice.is_empty());
    assert!(severe.advice.iter().all(|a| !report.danger_signs.contains(a)));
    assert_eq!(report.tier.tier.advice, severe.advice);
}

#[test]
fn young_infant_is_flagged_and_gets_no_zinc() {
    let report = Dehydration::new().unwrap().assess(&input(0, 2)).unwrap();
    assert_eq!(report.danger_signs, ["Usia < 3 bulan"]);
    assert!(report.zinc.is_none());
    assert!(matches!(
        report.fluid_plan,
        FluidPlan::Home { ors_per_stool_ml: Some(50.0), ors_today_ml: None }
    ));
}

#[test]
fn tier_boundaries() {
    let d = Dehydration::new().unwrap();
    let mut case = input(0, 24);
    for (key, option) in [("general_condition", 2), ("eyes", 2)] {
        case.signs.insert(key.into(), option);
    }
    assert_eq!(d.assess(&case).unwrap().plan, ManagementPlan::A);

    case.signs.insert("tears".into(), 1);
    assert_eq!(d.assess(&case).unwrap().plan, ManagementPlan::B);
}

#[test]
fn missing_required_sign_is_rejected() {
    let mut case = input(1, 18);
    case.signs.remove("eyes");
    let err = Dehydration::new().unwrap().assess(&case).unwrap_err();
    assert!(matches!(err, ScoringError::IncompleteAssessment { missing } if missing == ["eyes"]));
}

#[test]
fn selection_out_of_range_is_rejected() {
    let mut case = input(1, 18);
    case.signs.insert("tears".into(), 3);
    let err = Dehydration::new().unwrap().assess(&case).unwrap_err();
    assert!(matches!(err, ScoringError::SelectionOutOfRange { .. }));
}

#[test]
fn weight_must_be_positive() {
    let mut case = input(0, 18);
    case.weight_kg = 0.0;
    assert!(Dehydration::new().unwrap().assess(&case).is_err());
}

#[test]
fn input_deserializes_from_json() {
    let json = r#"{
        "age_months": 12,
        "weight_kg": 9.0,
        "signs": {"general_condition": 0, "eyes": 0, "tears": 0,
                  "mouth_tongue": 0, "skin_turgor": 0, "breathing": 0}
    }"#;
    let case: DehydrationInput = serde_json::from_str(json).unwrap();
    assert_eq!(case.signs, input(0, 12).signs);
    assert!(case.temperature_c.is_none());
}
