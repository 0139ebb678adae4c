use tumbuh_calc::bmi::{BmiCategory, calculate_bmi, lifestyle_recommendations, metabolic_risks};
use tumbuh_calc::error::CalcError;
use tumbuh_core::error::CoreError;
use tumbuh_core::models::tier::ColorTag;

#[test]
fn toddler_in_normal_range() {
    let result = calculate_bmi(12.5, 85.0).unwrap();
    assert_eq!(result.value, 17.3);
    assert_eq!(result.category, BmiCategory::Normal);
    assert_eq!(result.label, "Normal");
    assert_eq!(result.risk, "Rendah");
    assert_eq!(result.color, ColorTag::Good);
}

#[test]
fn category_boundaries_are_inclusive_below() {
    assert_eq!(calculate_bmi(11.9, 100.0).unwrap().category, BmiCategory::SeverelyThin);
    assert_eq!(calculate_bmi(12.0, 100.0).unwrap().category, BmiCategory::Thin);
    assert_eq!(calculate_bmi(22.0, 100.0).unwrap().category, BmiCategory::Overweight);
    assert_eq!(calculate_bmi(25.0, 100.0).unwrap().category, BmiCategory::Obese);
    assert_eq!(calculate_bmi(30.0, 100.0).unwrap().category, BmiCategory::SeverelyObese);
}

#[test]
fn category_uses_unrounded_value() {
    let result = calculate_bmi(14.96, 100.0).unwrap();
    assert_eq!(result.value, 15.0);
    assert_eq!(result.category, BmiCategory::Thin);
}

#[test]
fn rejects_non_positive_measurements() {
    let err = calculate_bmi(0.0, 85.0).unwrap_err();
    assert!(matches!(
        err,
        CalcError::Core(CoreError::InvalidInput { ref field, .. }) if field == "weight_kg"
    ));
    assert!(calculate_bmi(12.0, -1.0).is_err());
    assert!(calculate_bmi(f64::NAN, 80.0).is_err());
}

#[test]
fn metabolic_risk_indicators() {
    let both = metabolic_risks(26.0, 30);
    let indicators: Vec<_> = both.iter().map(|r| r.indicator.as_str()).collect();
    assert_eq!(indicators, ["BMI Elevated", "Early Adiposity"]);

    let early = metabolic_risks(21.0, 30);
    assert_eq!(early.len(), 1);
    assert_eq!(early[0].risk, "Sedang");

    assert!(metabolic_risks(21.0, 72).is_empty());
    assert!(metabolic_risks(20.0, 30).is_empty());
}

#[test]
fn lifestyle_groups_follow_category_family() {
    let thin = lifestyle_recommendations(BmiCategory::Thin, 30);
    assert_eq!(thin.len(), 2);
    assert_eq!(thin[0].category, "Nutrisi");
    assert_eq!(thin[0].items.len(), 4);

    let obese = lifestyle_recommendations(BmiCategory::Obese, 48);
    assert_eq!(obese[1].category, "Aktivitas");
    assert_eq!(obese[1].items.len(), 3);
}

#[test]
fn infants_get_age_specific_advice() {
    let groups = lifestyle_recommendations(BmiCategory::Normal, 12);
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[2].category, "Umur Spesifik");

    let older = lifestyle_recommendations(BmiCategory::Normal, 24);
    assert_eq!(older.len(), 2);
}
