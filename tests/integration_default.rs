//! Integration tests for aggregation, admission and estimates on the
//! reference household.

mod common;

use common::{CUISINE, SALON};
use home_grid::config::HouseholdConfig;
use home_grid::sim::estimate::Autonomy;

#[test]
fn reference_totals() {
    let h = common::reference_household();
    assert_eq!(h.allowed_zone_count(), 4);
    assert_eq!(h.total_consumption_w(), 370);

    let breakdown: Vec<(_, u64)> = h
        .zone_consumption()
        .into_iter()
        .map(|z| (z.zone_id, z.watts))
        .collect();
    assert_eq!(breakdown, vec![(SALON, 170), (CUISINE, 200)]);
}

#[test]
fn breakdown_sums_to_total() {
    let h = common::reference_household();
    let sum: u64 = h.zone_consumption().iter().map(|z| z.watts).sum();
    assert_eq!(sum, h.total_consumption_w());
}

#[test]
fn admission_thresholds() {
    for (level, expected) in [
        (100, 4),
        (60, 4),
        (59, 3),
        (40, 3),
        (35, 2),
        (30, 2),
        (29, 1),
        (0, 1),
    ] {
        let h = common::household_at(level);
        assert_eq!(h.allowed_zone_count(), expected, "battery {level}%");
    }
}

#[test]
fn admission_is_monotonic() {
    let mut previous = 0;
    for level in 0..=100 {
        let count = common::household_at(level).allowed_zone_count();
        assert!(count >= previous, "count dropped at {level}%");
        assert!((1..=4).contains(&count));
        previous = count;
    }
}

#[test]
fn admitted_prefix_is_capped_by_zone_count() {
    // two zones, four allowed
    let h = common::reference_household();
    assert_eq!(h.admitted_zones().len(), 2);
    let h = common::household_at(10);
    assert_eq!(h.admitted_zones().len(), 1);
    assert_eq!(h.admitted_zones()[0].name, "Salon");
}

#[test]
fn non_admitted_zone_devices_stay_controllable() {
    // at 10% only Salon is admitted; Cuisine is presented as disabled
    let mut h = common::household_at(10);
    assert!(!h.is_zone_admitted(1));
    assert_eq!(h.toggle_device(CUISINE, common::OVEN), Ok(true));
    assert_eq!(
        h.set_device_power(CUISINE, common::FRIDGE, false).map(|d| d.on),
        Ok(false)
    );
    // the draw still counts every zone, admitted or not
    assert_eq!(h.total_consumption_w(), 170 + 2000);
    assert_eq!(h.battery_level(), 10);
}

#[test]
fn report_for_reference_household() {
    let r = common::reference_household().report();
    assert!((r.daily_kwh - 8.88).abs() < 1e-9);
    assert!((r.monthly_kwh - 266.4).abs() < 1e-9);
    assert!((r.annual_cost - 3241.2 * 0.15).abs() < 1e-6);
    assert_eq!(r.panel_count, 6);
    assert!(matches!(r.autonomy, Autonomy::Hours(h) if (h - 4250.0 / 370.0).abs() < 1e-9));
}

#[test]
fn estimates_change_only_with_state() {
    let mut h = common::reference_household();
    let first = h.report();
    assert_eq!(first, h.report());
    assert!(h.toggle_device(CUISINE, common::OVEN).is_ok());
    assert!(h.report().daily_kwh > first.daily_kwh);
}

#[test]
fn all_off_gives_unbounded_autonomy() {
    let mut h = common::reference_household();
    for (zone, device) in [
        (SALON, common::TV),
        (SALON, common::LAMP),
        (CUISINE, common::FRIDGE),
    ] {
        assert_eq!(h.toggle_device(zone, device), Ok(false));
    }
    let r = h.report();
    assert_eq!(r.total_consumption_w, 0);
    assert_eq!(r.autonomy, Autonomy::Unbounded);
    assert_eq!(r.panel_count, 0);
}

#[test]
fn demo_preset_matches_reference_draw() {
    let h = HouseholdConfig::demo().build().expect("demo preset builds");
    assert_eq!(h.zones().len(), 4);
    assert_eq!(h.total_consumption_w(), 370);
    assert_eq!(h.battery_level(), 85);
}

#[test]
fn scenario_file_round_trip() {
    let toml = r#"
[battery]
initial_level = 150

[[zones]]
name = "Office"
icon = "💼"

[[zones.devices]]
name = "PC"
kind = "computer"
on = true
"#;
    let cfg = HouseholdConfig::from_toml_str(toml);
    assert!(cfg.is_ok(), "{cfg:?}");
    let cfg = cfg.unwrap_or_else(|_| HouseholdConfig::empty());
    assert!(cfg.validate().is_empty());
    assert!(cfg.battery_out_of_range());
    let h = cfg.build().expect("scenario builds");
    assert_eq!(h.battery_level(), 100);
    assert_eq!(h.total_consumption_w(), 300);
}
