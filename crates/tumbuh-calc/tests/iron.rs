use tumbuh_calc::iron::{IronIndication, MAX_DAILY_IRON_MG, iron_plan};

#[test]
fn treatment_dose() {
    let plan = iron_plan(10.0, IronIndication::Treatment).unwrap();
    assert_eq!(plan.mg_per_kg, 3.0);
    assert_eq!(plan.daily_dose_mg, 30.0);
    assert!(!plan.capped);
    assert_eq!(plan.duration, "3 bulan");
}

#[test]
fn prevention_dose() {
    let plan = iron_plan(8.5, IronIndication::Prevention).unwrap();
    assert_eq!(plan.daily_dose_mg, 8.5);
    assert_eq!(plan.duration, "1-2 bulan");
    assert_eq!(plan.frequency, "1x sehari");
}

#[test]
fn dose_is_capped() {
    let plan = iron_plan(25.0, IronIndication::Treatment).unwrap();
    assert_eq!(plan.daily_dose_mg, MAX_DAILY_IRON_MG);
    assert!(plan.capped);
}

#[test]
fn rejects_zero_weight() {
    assert!(iron_plan(0.0, IronIndication::Prevention).is_err());
}
