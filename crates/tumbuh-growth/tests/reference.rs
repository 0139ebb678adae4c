use std::io::Write;

use proptest::prelude::*;
use tumbuh_core::models::patient::Sex;
use tumbuh_growth::error::GrowthError;
use tumbuh_growth::labels::IndexFamily;
use tumbuh_growth::reference::ReferenceData;

const SMALL: &str = r#"{
  "description": "fixture",
  "tables": {
    "boy": {
      "lfa": { "0": [44.0, 46.0, 48.0, 50.0, 52.0, 54.0, 56.0] },
      "wfl": {
        "45.0": [1.9, 2.0, 2.2, 2.4, 2.7, 3.0, 3.3],
        "45.5": [1.9, 2.1, 2.3, 2.5, 2.8, 3.1, 3.4],
        "46.0": [2.0, 2.2, 2.4, 2.6, 2.9, 3.1, 3.5]
      }
    }
  }
}"#;

#[test]
fn embedded_dataset_covers_both_sexes_and_all_families() {
    let data = ReferenceData::embedded().unwrap();
    for sex in [Sex::Boy, Sex::Girl] {
        for family in IndexFamily::ALL {
            let table = data.table(sex, family).unwrap();
            assert!(!table.rows().is_empty());
            for row in table.rows() {
                assert_eq!(row.boundaries.len(), 7, "{sex}/{family}/{}", row.label);
            }
        }
        assert_eq!(data.table(sex, IndexFamily::Lfa).unwrap().rows().len(), 25);
        assert_eq!(data.table(sex, IndexFamily::Wfl).unwrap().rows().len(), 131);
    }
}

#[test]
fn missing_table_is_a_lookup_error() {
    let data = ReferenceData::from_json(SMALL).unwrap();
    assert!(matches!(
        data.table(Sex::Girl, IndexFamily::Lfa),
        Err(GrowthError::Lookup { sex: Sex::Girl, family: IndexFamily::Lfa, .. })
    ));
}

#[test]
fn exact_length_returns_its_own_key() {
    let data = ReferenceData::from_json(SMALL).unwrap();
    let table = data.table(Sex::Boy, IndexFamily::Wfl).unwrap();
    assert_eq!(table.closest_row(45.5).label, "45.5");
}

#[test]
fn closest_key_ties_resolve_to_the_lower_key() {
    let data = ReferenceData::from_json(SMALL).unwrap();
    let table = data.table(Sex::Boy, IndexFamily::Wfl).unwrap();
    assert_eq!(table.closest_row(45.25).label, "45.0");
    assert_eq!(table.closest_row(45.75).label, "45.5");
    assert_eq!(table.closest_row(45.8).label, "46.0");
}

#[test]
fn unordered_boundaries_are_rejected_at_load() {
    let json = r#"{"tables":{"girl":{"wfa":{"3":[5.0,4.0,6.0]}}}}"#;
    let err = ReferenceData::from_json(json).unwrap_err();
    assert!(matches!(err, GrowthError::InvalidReference(msg) if msg.contains("girl/wfa/3")));
}

#[test]
fn rows_of_differing_length_are_rejected_at_load() {
    let json = r#"{"tables":{"boy":{"wfl":{
        "45.0":[1.9,2.0,2.2,2.4,2.7,3.0,3.3],
        "45.5":[1.9,2.1,2.3,2.5,2.8,3.1]
    }}}}"#;
    let err = ReferenceData::from_json(json).unwrap_err();
    assert!(matches!(err, GrowthError::InvalidReference(msg) if msg.contains("boy/wfl/45.5")));
}

#[test]
fn fractional_age_keys_are_rejected() {
    let json = r#"{"tables":{"boy":{"lfa":{"1.5":[1.0,2.0]}}}}"#;
    assert!(matches!(
        ReferenceData::from_json(json),
        Err(GrowthError::InvalidReference(_))
    ));
}

#[test]
fn colliding_length_keys_are_rejected() {
    let json = r#"{"tables":{"boy":{"wfl":{"50":[1.0,2.0],"50.0":[1.0,2.0]}}}}"#;
    assert!(matches!(
        ReferenceData::from_json(json),
        Err(GrowthError::InvalidReference(msg)) if msg.contains("collide")
    ));
}

#[test]
fn unknown_family_fails_to_parse() {
    let json = r#"{"tables":{"boy":{"hcfa":{"0":[1.0,2.0]}}}}"#;
    assert!(matches!(
        ReferenceData::from_json(json),
        Err(GrowthError::Serialization(_))
    ));
}

#[test]
fn loads_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SMALL.as_bytes()).unwrap();
    let data = ReferenceData::from_path(file.path()).unwrap();
    assert_eq!(data.description(), "fixture");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReferenceData::from_path(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, GrowthError::Io(_)));
}

proptest! {
    #[test]
    fn closest_key_is_always_a_table_key(length in 30.0f64..130.0) {
        let data = ReferenceData::embedded().unwrap();
        let table = data.table(Sex::Girl, IndexFamily::Wfl).unwrap();
        let row = table.closest_row(length);
        prop_assert!(table.rows().iter().any(|r| r.label == row.label));
        for other in table.rows() {
            prop_assert!((row.key - length).abs() <= (other.key - length).abs());
        }
    }
}
