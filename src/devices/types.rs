//! Identifiers and the switchable device entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::DeviceKind;

/// Unique zone identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub u64);

/// Unique device identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub u64);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A switchable load with a fixed wattage.
///
/// The wattage is set at creation and never changes; only the power
/// state is mutable. A device contributes its wattage to consumption
/// totals only while it is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    /// Unique identifier.
    pub id: DeviceId,
    /// Display name.
    pub name: String,
    /// Catalog type tag.
    pub kind: DeviceKind,
    /// Power state.
    pub on: bool,
    /// Draw in watts while on (always > 0).
    pub consumption_w: u32,
}

impl Device {
    /// Creates a device in the off state.
    ///
    /// # Panics
    ///
    /// Panics if `consumption_w` is zero.
    pub fn new(id: DeviceId, name: impl Into<String>, kind: DeviceKind, consumption_w: u32) -> Self {
        assert!(consumption_w > 0, "device consumption must be > 0");
        Self {
            id,
            name: name.into(),
            kind,
            on: false,
            consumption_w,
        }
    }

    /// Builder-style variant of [`Device::new`] that sets the power state.
    pub fn with_state(mut self, on: bool) -> Self {
        self.on = on;
        self
    }

    /// Watts this device currently draws (zero when off).
    pub fn active_w(&self) -> u32 {
        if self.on { self.consumption_w } else { 0 }
    }

    /// Flips the power state and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }
}

/// Input for creating a device inside a zone.
///
/// When `consumption_w` is `None` the catalog average for `kind` is used.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDevice {
    pub name: String,
    pub kind: DeviceKind,
    #[serde(default)]
    pub consumption_w: Option<u32>,
    #[serde(default)]
    pub on: bool,
}

impl NewDevice {
    pub fn new(name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            consumption_w: None,
            on: false,
        }
    }

    pub fn consumption_w(mut self, watts: u32) -> Self {
        self.consumption_w = Some(watts);
        self
    }

    pub fn on(mut self, on: bool) -> Self {
        self.on = on;
        self
    }

    /// Wattage the device will be created with.
    pub fn resolved_consumption_w(&self) -> u32 {
        self.consumption_w
            .unwrap_or_else(|| self.kind.average_consumption_w())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_device_starts_off() {
        let d = Device::new(DeviceId(1), "TV", DeviceKind::Tv, 150);
        assert!(!d.on);
        assert_eq!(d.active_w(), 0);
    }

    #[test]
    #[should_panic]
    fn zero_consumption_panics() {
        Device::new(DeviceId(1), "Ghost", DeviceKind::Other, 0);
    }

    #[test]
    fn toggle_flips_state() {
        let mut d = Device::new(DeviceId(1), "Lamp", DeviceKind::Lamp, 20);
        assert!(d.toggle());
        assert_eq!(d.active_w(), 20);
        assert!(!d.toggle());
        assert_eq!(d.active_w(), 0);
    }

    #[test]
    fn new_device_defaults_to_catalog_average() {
        let nd = NewDevice::new("Fridge", DeviceKind::Refrigerator);
        assert_eq!(nd.resolved_consumption_w(), 200);
        let nd = nd.consumption_w(180);
        assert_eq!(nd.resolved_consumption_w(), 180);
    }
}
