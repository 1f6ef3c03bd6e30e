use serde::{Deserialize, Serialize};

use super::types::{Device, DeviceId, ZoneId};

/// Advisory electrical ratings of a zone. Displayed, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRatings {
    /// Maximum current in amperes.
    pub max_current_a: u32,
    /// Maximum voltage in volts.
    pub max_voltage_v: u32,
}

impl Default for ZoneRatings {
    fn default() -> Self {
        Self {
            max_current_a: 10,
            max_voltage_v: 220,
        }
    }
}

/// A named area owning an ordered list of devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub icon: String,
    pub ratings: ZoneRatings,
    /// Devices in display order.
    pub devices: Vec<Device>,
}

impl Zone {
    /// Creates an empty zone.
    pub fn new(id: ZoneId, name: impl Into<String>, icon: impl Into<String>, ratings: ZoneRatings) -> Self {
        Self {
            id,
            name: name.into(),
            icon: icon.into(),
            ratings,
            devices: Vec::new(),
        }
    }

    /// Appends a device, builder style.
    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.id == id)
    }

    /// Removes a device and returns it, if present.
    pub fn remove_device(&mut self, id: DeviceId) -> Option<Device> {
        let idx = self.devices.iter().position(|d| d.id == id)?;
        Some(self.devices.remove(idx))
    }

    /// Sum of the wattage of devices that are on.
    pub fn active_w(&self) -> u64 {
        self.devices.iter().map(|d| u64::from(d.active_w())).sum()
    }

    /// Number of devices currently on.
    pub fn active_count(&self) -> usize {
        self.devices.iter().filter(|d| d.on).count()
    }
}
