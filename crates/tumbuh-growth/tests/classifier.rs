use std::sync::Arc;

use tumbuh_core::models::patient::Sex;
use tumbuh_core::models::tier::ColorTag;
use tumbuh_growth::GrowthClassifier;
use tumbuh_growth::error::GrowthError;
use tumbuh_growth::labels::{GrowthStatus, IndexFamily};
use tumbuh_growth::reference::ReferenceData;

fn classifier() -> GrowthClassifier {
    GrowthClassifier::new(Arc::new(ReferenceData::embedded().unwrap()))
}

#[test]
fn length_for_age_bands() {
    // boy 12 months: [68.8, 71.1, 73.4, 75.7, 78.0, 80.3, 82.6]
    let c = classifier();
    let severe = c.classify_length_for_age(Sex::Boy, 12, 68.0).unwrap();
    assert_eq!(severe.band, 0);
    assert_eq!(severe.sd_code, Some(-3));
    assert_eq!(severe.label, "Severely Stunted");
    assert_eq!(severe.color, ColorTag::Bad);

    let stunted = c.classify_length_for_age(Sex::Boy, 12, 70.0).unwrap();
    assert_eq!(stunted.band, 1);
    assert_eq!(stunted.status, GrowthStatus::Stunted);

    let normal = c.classify_length_for_age(Sex::Boy, 12, 75.7).unwrap();
    assert_eq!(normal.band, 4);
    assert_eq!(normal.status, GrowthStatus::Normal);
    assert_eq!(normal.bucket_key, "12");
}

#[test]
fn boundary_value_moves_to_the_next_band() {
    let c = classifier();
    let at_minus_two = c.classify_length_for_age(Sex::Boy, 12, 71.1).unwrap();
    assert_eq!(at_minus_two.band, 2);
    assert_eq!(at_minus_two.status, GrowthStatus::Normal);
}

#[test]
fn weight_for_age_bands() {
    // boy 12 months: [6.9, 7.8, 8.7, 9.6, 10.8, 11.9, 13.1]
    let c = classifier();
    assert_eq!(
        c.classify_weight_for_age(Sex::Boy, 12, 6.5).unwrap().status,
        GrowthStatus::SeverelyUnderweight
    );
    assert_eq!(
        c.classify_weight_for_age(Sex::Boy, 12, 7.0).unwrap().label,
        "Underweight"
    );
    assert_eq!(
        c.classify_weight_for_age(Sex::Boy, 12, 14.0).unwrap().status,
        GrowthStatus::Normal
    );
}

#[test]
fn weight_for_length_uses_the_closest_bucket() {
    // boy 75.0: [7.2, 8.0, 8.8, 9.6, 10.5, 11.4, 12.3]
    let c = classifier();
    assert_eq!(c.closest_length_key(Sex::Boy, 75.2).unwrap(), "75.0");
    assert_eq!(c.closest_length_key(Sex::Boy, 75.25).unwrap(), "75.0");
    assert_eq!(c.closest_length_key(Sex::Boy, 75.3).unwrap(), "75.5");

    let result = c.classify_weight_for_length(Sex::Boy, 75.1, 10.6).unwrap();
    assert_eq!(result.bucket_key, "75.0");
    assert_eq!(result.band, 5);
    assert_eq!(result.label, "Resiko Overweight");

    let obese = c.classify_weight_for_length(Sex::Boy, 75.0, 12.5).unwrap();
    assert_eq!(obese.band, 7);
    assert_eq!(obese.status, GrowthStatus::Obese);
    assert_eq!(obese.sd_code, Some(4));

    let wasted = c.classify_weight_for_length(Sex::Boy, 75.0, 7.5).unwrap();
    assert_eq!(wasted.label, "Gizi rendah");
}

#[test]
fn age_outside_the_table_is_a_lookup_error() {
    let err = classifier()
        .classify_length_for_age(Sex::Girl, 30, 90.0)
        .unwrap_err();
    assert!(matches!(
        err,
        GrowthError::Lookup { family: IndexFamily::Lfa, ref key, .. } if key == "30"
    ));
}

#[test]
fn length_far_outside_the_table_is_a_lookup_error() {
    let c = classifier();
    assert!(matches!(
        c.classify_weight_for_length(Sex::Girl, 130.0, 25.0),
        Err(GrowthError::Lookup { family: IndexFamily::Wfl, .. })
    ));
    // Within one key step of the edge still resolves.
    assert_eq!(c.closest_length_key(Sex::Girl, 110.4).unwrap(), "110.0");
}

#[test]
fn non_positive_measurements_are_rejected() {
    let c = classifier();
    assert!(matches!(
        c.classify_weight_for_age(Sex::Boy, 6, 0.0),
        Err(GrowthError::Core(_))
    ));
    assert!(matches!(
        c.classify_length_for_age(Sex::Boy, 6, f64::NAN),
        Err(GrowthError::Core(_))
    ));
}

#[test]
fn classify_all_reports_every_family() {
    let report = classifier().classify_all(Sex::Boy, 12, 75.7, 9.6).unwrap();
    assert_eq!(report.length_for_age.family, IndexFamily::Lfa);
    assert_eq!(report.weight_for_age.family, IndexFamily::Wfa);
    assert_eq!(report.weight_for_length.family, IndexFamily::Wfl);
    assert_eq!(report.weight_for_length.bucket_key, "75.5");
}

#[test]
fn every_band_maps_into_the_declared_label_set() {
    for family in IndexFamily::ALL {
        let declared = family.declared_statuses();
        for band in 0..=8 {
            assert!(declared.contains(&family.status_for_band(band)));
        }
    }
}

#[test]
fn eight_boundary_tables_clamp_to_the_last_label() {
    let json = r#"{"tables":{"boy":{"lfa":{"0":[-650,-400,-150,0,150,350,550,1000]}}}}"#;
    let c = GrowthClassifier::new(Arc::new(ReferenceData::from_json(json).unwrap()));
    let stunted = c.classify_length_for_age(Sex::Boy, 0, 1.0).unwrap();
    assert_eq!(stunted.band, 4);
    let top = c.classify_length_for_age(Sex::Boy, 0, 2000.0).unwrap();
    assert_eq!(top.band, 8);
    assert_eq!(top.sd_code, None);
    assert_eq!(top.status, GrowthStatus::Normal);
    assert_eq!(IndexFamily::Wfl.status_for_band(8), GrowthStatus::Obese);
}
