//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use home_grid::devices::{Battery, Device, DeviceId, DeviceKind, Zone, ZoneId, ZoneRatings};
use home_grid::sim::Household;
use home_grid::sim::estimate::EstimatorConfig;

pub const SALON: ZoneId = ZoneId(1);
pub const CUISINE: ZoneId = ZoneId(2);
pub const TV: DeviceId = DeviceId(10);
pub const LAMP: DeviceId = DeviceId(11);
pub const FRIDGE: DeviceId = DeviceId(20);
pub const OVEN: DeviceId = DeviceId(21);

/// Two zones: Salon (TV 150 W on, Lamp 20 W on) and Cuisine
/// (Fridge 200 W on, Oven 2000 W off).
pub fn reference_zones() -> Vec<Zone> {
    vec![
        Zone::new(SALON, "Salon", "🛋️", ZoneRatings::default())
            .with_device(Device::new(TV, "TV", DeviceKind::Tv, 150).with_state(true))
            .with_device(Device::new(LAMP, "Lamp", DeviceKind::Lamp, 20).with_state(true)),
        Zone::new(CUISINE, "Cuisine", "🍽️", ZoneRatings::default())
            .with_device(
                Device::new(FRIDGE, "Fridge", DeviceKind::Refrigerator, 200).with_state(true),
            )
            .with_device(Device::new(OVEN, "Oven", DeviceKind::Oven, 2000)),
    ]
}

/// The reference household at the given battery level.
pub fn household_at(level: i64) -> Household {
    Household::new(
        Battery::new(level),
        reference_zones(),
        EstimatorConfig::default(),
    )
    .expect("reference zones are valid")
}

/// The reference household with the battery at 85%.
pub fn reference_household() -> Household {
    household_at(85)
}
