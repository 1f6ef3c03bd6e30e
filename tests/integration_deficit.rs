//! Integration tests for battery decreases gated by deficit resolution.

mod common;

use common::{CUISINE, FRIDGE, LAMP, OVEN, SALON, TV};
use home_grid::devices::{DeviceId, ZoneId};
use home_grid::sim::EnergyError;
use home_grid::sim::deficit::{DecreaseOutcome, DeficitState};

#[test]
fn decrease_with_active_devices_waits_for_choice() {
    let mut h = common::reference_household();
    let outcome = h.request_battery_decrease();
    let Ok(DecreaseOutcome::PendingChoice { choices }) = outcome else {
        panic!("expected a pending choice, got {outcome:?}");
    };
    let names: Vec<&str> = choices.iter().map(|c| c.device_name.as_str()).collect();
    assert_eq!(names, ["TV", "Lamp", "Fridge"]);
    assert_eq!(h.battery_level(), 85);
    assert!(h.is_decrease_pending());
}

#[test]
fn shedding_commits_the_decrease() {
    let mut h = common::reference_household();
    assert!(h.request_battery_decrease().is_ok());
    assert_eq!(h.choose_device_to_shed(SALON, TV), Ok(75));

    let tv = h.zone(SALON).and_then(|z| z.device(TV));
    assert_eq!(tv.map(|d| d.on), Some(false));
    assert_eq!(h.battery_level(), 75);
    assert_eq!(h.total_consumption_w(), 220);
    assert_eq!(h.deficit_state(), &DeficitState::Idle);
}

#[test]
fn cancel_restores_exact_state() {
    let mut h = common::reference_household();
    let before = h.snapshot();
    assert!(h.request_battery_decrease().is_ok());
    assert!(h.cancel_deficit());

    let after = h.snapshot();
    assert_eq!(after.battery_level, before.battery_level);
    assert_eq!(after.zones, before.zones);
    assert_eq!(after.total_consumption_w, before.total_consumption_w);
    assert!(after.pending_choices.is_none());
}

#[test]
fn cancel_while_idle_is_a_no_op() {
    let mut h = common::reference_household();
    assert!(!h.cancel_deficit());
    assert_eq!(h.battery_level(), 85);
}

#[test]
fn nothing_on_commits_immediately() {
    let mut h = common::reference_household();
    for (zone, device) in [(SALON, TV), (SALON, LAMP), (CUISINE, FRIDGE)] {
        assert!(h.set_device_power(zone, device, false).is_ok());
    }
    assert_eq!(
        h.request_battery_decrease(),
        Ok(DecreaseOutcome::Committed { battery_level: 75 })
    );
    assert!(!h.is_decrease_pending());
}

#[test]
fn decrease_floors_at_zero() {
    let mut h = common::household_at(5);
    for (zone, device) in [(SALON, TV), (SALON, LAMP), (CUISINE, FRIDGE)] {
        assert!(h.set_device_power(zone, device, false).is_ok());
    }
    assert!(h.request_battery_decrease().is_ok());
    assert_eq!(h.battery_level(), 0);
    assert!(h.request_battery_decrease().is_ok());
    assert_eq!(h.battery_level(), 0);
}

#[test]
fn increase_saturates_at_full() {
    let mut h = common::household_at(95);
    assert_eq!(h.request_battery_increase(), 100);
    assert_eq!(h.request_battery_increase(), 100);
}

#[test]
fn second_decrease_while_pending_is_refused() {
    let mut h = common::reference_household();
    assert!(h.request_battery_decrease().is_ok());
    assert_eq!(
        h.request_battery_decrease(),
        Err(EnergyError::DecisionPending)
    );
    assert_eq!(h.battery_level(), 85);
}

#[test]
fn choice_without_pending_decrease_is_rejected() {
    let mut h = common::reference_household();
    assert_eq!(
        h.choose_device_to_shed(SALON, TV),
        Err(EnergyError::NoPendingDecrease)
    );
    assert_eq!(h.total_consumption_w(), 370);
}

#[test]
fn unknown_choice_keeps_decrease_pending() {
    let mut h = common::reference_household();
    assert!(h.request_battery_decrease().is_ok());
    assert_eq!(
        h.choose_device_to_shed(ZoneId(99), TV),
        Err(EnergyError::ZoneNotFound(ZoneId(99)))
    );
    assert_eq!(
        h.choose_device_to_shed(SALON, DeviceId(99)),
        Err(EnergyError::DeviceNotFound {
            zone: SALON,
            device: DeviceId(99)
        })
    );
    assert!(h.is_decrease_pending());
    assert_eq!(h.battery_level(), 85);
}

#[test]
fn shedding_an_off_device_still_commits_once() {
    let mut h = common::reference_household();
    assert!(h.request_battery_decrease().is_ok());
    assert_eq!(h.choose_device_to_shed(CUISINE, OVEN), Ok(75));
    assert_eq!(h.total_consumption_w(), 370);
    assert!(!h.is_decrease_pending());
}

#[test]
fn battery_changes_only_by_committed_steps() {
    let mut h = common::reference_household();
    let mut expected = 85_u8;
    for _ in 0..3 {
        match h.request_battery_decrease() {
            Ok(DecreaseOutcome::PendingChoice { choices }) => {
                let first = &choices[0];
                assert!(h.choose_device_to_shed(first.zone_id, first.device_id).is_ok());
            }
            Ok(DecreaseOutcome::Committed { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
        expected -= 10;
        assert_eq!(h.battery_level(), expected);
    }
    assert_eq!(h.total_consumption_w(), 0);
    // 55% → three zones admitted
    assert_eq!(h.allowed_zone_count(), 3);
}
