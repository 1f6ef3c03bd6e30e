//! Value types produced by the aggregator and the household session.

use std::fmt;

use serde::Serialize;

use crate::devices::{DeviceId, DeviceKind, Zone, ZoneId};

/// Active consumption of one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneConsumption {
    pub zone_id: ZoneId,
    pub name: String,
    pub icon: String,
    /// Summed draw of the zone's devices that are on.
    pub watts: u64,
}

/// A device that is on, annotated with its owning zone.
///
/// This is the entry type of the deficit-resolution choice menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveDevice {
    pub zone_id: ZoneId,
    pub zone_name: String,
    pub device_id: DeviceId,
    pub device_name: String,
    pub kind: DeviceKind,
    pub consumption_w: u32,
}

impl fmt::Display for ActiveDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} W) in {}",
            self.kind.icon(),
            self.device_name,
            self.consumption_w,
            self.zone_name
        )
    }
}

/// Consistent view of a household at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdSnapshot {
    /// Battery state of charge in percent.
    pub battery_level: u8,
    /// Number of leading zones admitted at this battery level.
    pub allowed_zone_count: usize,
    /// Total draw of all devices that are on.
    pub total_consumption_w: u64,
    /// Per-zone breakdown, zero-draw zones omitted.
    pub zone_consumption: Vec<ZoneConsumption>,
    /// Zones in admission order.
    pub zones: Vec<Zone>,
    /// Choice menu of a pending decrease, `None` when idle.
    pub pending_choices: Option<Vec<ActiveDevice>>,
}

impl HouseholdSnapshot {
    /// Whether the zone at `index` is admitted.
    pub fn is_admitted(&self, index: usize) -> bool {
        index < self.allowed_zone_count
    }
}

impl fmt::Display for HouseholdSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "battery={:>3}% | zones allowed={} | total={} W",
            self.battery_level, self.allowed_zone_count, self.total_consumption_w
        )?;
        for (i, zone) in self.zones.iter().enumerate() {
            let state = if self.is_admitted(i) { "on " } else { "off" };
            writeln!(
                f,
                "  [{state}] {} {} ({} A / {} V) active={} W",
                zone.icon,
                zone.name,
                zone.ratings.max_current_a,
                zone.ratings.max_voltage_v,
                zone.active_w()
            )?;
            for d in &zone.devices {
                writeln!(
                    f,
                    "        {} {:<20} {:>5} W  {}",
                    d.kind.icon(),
                    d.name,
                    d.consumption_w,
                    if d.on { "ON" } else { "off" }
                )?;
            }
        }
        if let Some(choices) = &self.pending_choices {
            writeln!(f, "  pending decrease, shed one of:")?;
            for c in choices {
                writeln!(f, "    - {c}")?;
            }
        }
        Ok(())
    }
}
