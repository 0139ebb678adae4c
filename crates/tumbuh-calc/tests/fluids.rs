use tumbuh_calc::fluids::{
    AdjustmentKind, FluidInput, IvFluid, assess, clinical_notes, contraindications,
    fluid_red_flags, holliday_segar, iv_plan_c, maintenance, ors_plan_b, rate_adjustment,
};

#[test]
fn holliday_segar_segments() {
    assert_eq!(holliday_segar(8.0), 800.0);
    assert_eq!(holliday_segar(10.0), 1000.0);
    assert_eq!(holliday_segar(15.0), 1250.0);
    assert_eq!(holliday_segar(20.0), 1500.0);
    assert_eq!(holliday_segar(25.0), 1600.0);
}

#[test]
fn fever_increases_maintenance() {
    let m = maintenance(15.0, true, false).unwrap();
    assert_eq!(m.base_ml_per_day, 1250);
    assert_eq!(m.ml_per_day, 1500);
    assert_eq!(m.ml_per_hour, 63);
    assert!(m.fever_adjusted);
    assert!(!m.npo_adjusted);
}

#[test]
fn fever_and_npo_both_apply_to_base() {
    let m = maintenance(10.0, true, true).unwrap();
    assert_eq!(m.base_ml_per_day, 1000);
    assert_eq!(m.ml_per_day, 900);
    assert_eq!(m.ml_per_hour, 38);
}

#[test]
fn maintenance_rejects_zero_weight() {
    assert!(maintenance(0.0, false, false).is_err());
    assert!(ors_plan_b(-2.0).is_err());
    assert!(iv_plan_c(f64::INFINITY).is_err());
}

#[test]
fn overload_reduces_rate_up_to_a_quarter() {
    let small = rate_adjustment(40, 120.0).unwrap();
    assert_eq!(small.kind, AdjustmentKind::Reduce);
    assert_eq!(small.amount_ml_per_hour, 5);
    assert_eq!(small.new_rate_ml_per_hour, 35);

    let large = rate_adjustment(40, 480.0).unwrap();
    assert_eq!(large.amount_ml_per_hour, 10);
    assert_eq!(large.new_rate_ml_per_hour, 30);
}

#[test]
fn only_large_deficits_increase_rate() {
    let deficit = rate_adjustment(40, -600.0).unwrap();
    assert_eq!(deficit.kind, AdjustmentKind::Increase);
    assert_eq!(deficit.new_rate_ml_per_hour, 50);

    let tolerated = rate_adjustment(40, -300.0).unwrap();
    assert_eq!(tolerated.kind, AdjustmentKind::Maintain);
    assert_eq!(tolerated.new_rate_ml_per_hour, 40);

    assert_eq!(rate_adjustment(40, 0.0).unwrap().kind, AdjustmentKind::Maintain);
    assert!(rate_adjustment(40, f64::NAN).is_err());
}

#[test]
fn rehydration_plans() {
    let b = ors_plan_b(10.0).unwrap();
    assert_eq!(b.total_ml, 750);
    assert_eq!(b.per_hour_ml, 188);

    let c = iv_plan_c(10.0).unwrap();
    assert_eq!(c.bolus_ml, 200);
    assert_eq!(c.bolus_minutes, 30);
    assert_eq!(c.deficit_ml, 1000);
    assert_eq!(c.maintenance_ml_per_day, 1000);
    assert_eq!(c.total_first_day_ml, 2000);
}

#[test]
fn intake_red_flags_need_a_measured_intake() {
    let m = maintenance(10.0, false, false).unwrap();
    assert_eq!(fluid_red_flags(&m, Some(1600.0), false).len(), 1);
    assert!(fluid_red_flags(&m, Some(400.0), false)[0].starts_with("Intake kurang"));
    assert!(fluid_red_flags(&m, Some(1000.0), false).is_empty());
    assert!(fluid_red_flags(&m, None, false).is_empty());
    assert_eq!(fluid_red_flags(&m, None, true).len(), 1);
}

#[test]
fn notes_and_contraindications() {
    let infant = maintenance(8.0, false, false).unwrap();
    assert_eq!(clinical_notes(6, &infant).len(), 5);
    assert_eq!(clinical_notes(72, &infant).len(), 3);

    let heavy_infant = maintenance(12.0, false, false).unwrap();
    assert_eq!(contraindications(6, &heavy_infant, false, false).len(), 1);
    assert!(contraindications(7, &heavy_infant, false, false).is_empty());
    assert_eq!(contraindications(24, &heavy_infant, true, true).len(), 2);
}

#[test]
fn fluid_catalog() {
    let rl = IvFluid::RingerLactate.info();
    assert_eq!(rl.name, "Ringer's Lactate");
    assert!(rl.warnings.iter().any(|w| w == "Monitor fungsi jantung"));
    assert!(IvFluid::D5w.info().warnings.is_empty());
}

#[test]
fn full_assessment_with_intake() {
    let input = FluidInput {
        weight_kg: 10.0,
        age_months: 24,
        fever: false,
        npo: false,
        intake_ml_per_hour: Some(50.0),
        fluid: Some(IvFluid::D5HalfNs),
        heart_failure: false,
        renal_failure: false,
        edema: false,
    };
    let result = assess(&input).unwrap();
    assert_eq!(result.maintenance.ml_per_hour, 42);
    let adjustment = result.adjustment.unwrap();
    assert_eq!(adjustment.kind, AdjustmentKind::Reduce);
    assert_eq!(adjustment.amount_ml_per_hour, 8);
    assert_eq!(adjustment.new_rate_ml_per_hour, 34);
    assert!(result.red_flags.is_empty());
    assert_eq!(result.fluid.unwrap().fluid, IvFluid::D5HalfNs);
}

#[test]
fn assessment_input_defaults() {
    let input: FluidInput = serde_json::from_str(r#"{"weight_kg": 8.0, "age_months": 9}"#).unwrap();
    let result = assess(&input).unwrap();
    assert!(result.adjustment.is_none());
    assert!(result.fluid.is_none());
    assert_eq!(result.maintenance.ml_per_day, 800);

    let negative = FluidInput {
        intake_ml_per_hour: Some(-1.0),
        ..input
    };
    assert!(assess(&negative).is_err());
}
