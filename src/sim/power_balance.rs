//! Household consumption aggregation.
//!
//! Pure functions over the zone list: nothing is cached, every call
//! recomputes from the current device states.

use crate::devices::Zone;

use super::types::{ActiveDevice, ZoneConsumption};

/// Hours in a day, used to turn an instantaneous draw into daily energy.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Days in a year for annual projections.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Total draw of every device that is on, across all zones (W).
///
/// Independent of zone and device order.
pub fn total_consumption_w(zones: &[Zone]) -> u64 {
    zones.iter().map(Zone::active_w).sum()
}

/// Per-zone active draw, in zone order.
///
/// Zones whose devices are all off are left out of the breakdown, so the
/// sum of the reported watts always equals [`total_consumption_w`].
pub fn zone_consumption(zones: &[Zone]) -> Vec<ZoneConsumption> {
    zones
        .iter()
        .filter_map(|z| {
            let watts = z.active_w();
            (watts > 0).then(|| ZoneConsumption {
                zone_id: z.id,
                name: z.name.clone(),
                icon: z.icon.clone(),
                watts,
            })
        })
        .collect()
}

/// Every device that is on, annotated with its zone, in zone then device order.
pub fn active_devices(zones: &[Zone]) -> Vec<ActiveDevice> {
    zones
        .iter()
        .flat_map(|z| {
            z.devices.iter().filter(|d| d.on).map(move |d| ActiveDevice {
                zone_id: z.id,
                zone_name: z.name.clone(),
                device_id: d.id,
                device_name: d.name.clone(),
                kind: d.kind,
                consumption_w: d.consumption_w,
            })
        })
        .collect()
}

/// Daily energy at a constant draw: `watts * 24 / 1000` (kWh).
pub fn daily_energy_kwh(total_w: u64) -> f64 {
    total_w as f64 * HOURS_PER_DAY / 1000.0
}

/// Annual energy at a constant draw: daily × 365 (kWh).
pub fn annual_energy_kwh(total_w: u64) -> f64 {
    daily_energy_kwh(total_w) * DAYS_PER_YEAR
}
