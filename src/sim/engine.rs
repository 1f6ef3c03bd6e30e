//! The household session: single owner of battery, zones, and the
//! deficit-resolution machine.

use std::collections::HashSet;

use crate::devices::{
    Battery, Device, DeviceId, DeviceTypeInfo, NewDevice, Zone, ZoneId, ZoneRatings, catalog,
};

use super::admission;
use super::deficit::{DecreaseOutcome, DeficitResolver, DeficitState};
use super::error::EnergyError;
use super::estimate::{EnergyReport, EstimatorConfig};
use super::power_balance;
use super::types::{ActiveDevice, HouseholdSnapshot, ZoneConsumption};

/// Household state and every operation that reads or mutates it.
///
/// All mutation goes through `&mut self`, so a pending decrease and its
/// resolution can never interleave with another writer. Reads take `&self`
/// and see one consistent state.
#[derive(Debug, Clone)]
pub struct Household {
    battery: Battery,
    zones: Vec<Zone>,
    deficit: DeficitResolver,
    estimator: EstimatorConfig,
    next_id: u64,
}

impl Household {
    /// Creates a household from an initial battery and zone list.
    ///
    /// Fresh ids handed out by [`Household::add_zone`] and
    /// [`Household::add_device`] start above every id already present.
    ///
    /// # Errors
    ///
    /// [`EnergyError::ZeroConsumption`] if a device draws 0 W, or
    /// [`EnergyError::DuplicateId`] if a zone or device id repeats.
    pub fn new(
        battery: Battery,
        zones: Vec<Zone>,
        estimator: EstimatorConfig,
    ) -> Result<Self, EnergyError> {
        let mut zone_ids = HashSet::new();
        let mut device_ids = HashSet::new();
        for zone in &zones {
            if !zone_ids.insert(zone.id) {
                return Err(EnergyError::DuplicateId(zone.id.0));
            }
            for device in &zone.devices {
                if device.consumption_w == 0 {
                    return Err(EnergyError::ZeroConsumption);
                }
                if !device_ids.insert(device.id) {
                    return Err(EnergyError::DuplicateId(device.id.0));
                }
            }
        }

        // one counter feeds both zone and device ids
        let max_id = zone_ids
            .iter()
            .map(|id| id.0)
            .chain(device_ids.iter().map(|id| id.0))
            .max()
            .unwrap_or(0);
        Ok(Self {
            battery,
            zones,
            deficit: DeficitResolver::new(),
            estimator,
            next_id: max_id + 1,
        })
    }

    pub fn battery(&self) -> Battery {
        self.battery
    }

    pub fn battery_level(&self) -> u8 {
        self.battery.level()
    }

    /// Zones in admission order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn deficit_state(&self) -> &DeficitState {
        self.deficit.state()
    }

    /// Returns `true` while a decrease awaits a device choice.
    pub fn is_decrease_pending(&self) -> bool {
        self.deficit.is_pending()
    }

    pub fn estimator(&self) -> &EstimatorConfig {
        &self.estimator
    }

    /// Device types that can be added, with their default wattage.
    pub fn device_types(&self) -> Vec<DeviceTypeInfo> {
        catalog()
    }

    // --- Queries -------------------------------------------------------

    /// Number of leading zones admitted at the current battery level.
    pub fn allowed_zone_count(&self) -> usize {
        admission::allowed_zone_count(self.battery.level())
    }

    /// Whether the zone at `index` is admitted at the current battery level.
    pub fn is_zone_admitted(&self, index: usize) -> bool {
        admission::is_zone_admitted(index, self.battery.level())
    }

    pub fn admitted_zones(&self) -> &[Zone] {
        admission::admitted_zones(&self.zones, self.battery.level())
    }

    pub fn total_consumption_w(&self) -> u64 {
        power_balance::total_consumption_w(&self.zones)
    }

    pub fn zone_consumption(&self) -> Vec<ZoneConsumption> {
        power_balance::zone_consumption(&self.zones)
    }

    pub fn active_devices(&self) -> Vec<ActiveDevice> {
        power_balance::active_devices(&self.zones)
    }

    /// Estimates derived from the current draw and battery level.
    pub fn report(&self) -> EnergyReport {
        EnergyReport::new(
            self.total_consumption_w(),
            self.battery.level(),
            &self.estimator,
        )
    }

    /// Copies the full state into a serializable snapshot.
    pub fn snapshot(&self) -> HouseholdSnapshot {
        HouseholdSnapshot {
            battery_level: self.battery.level(),
            allowed_zone_count: self.allowed_zone_count(),
            total_consumption_w: self.total_consumption_w(),
            zone_consumption: self.zone_consumption(),
            zones: self.zones.clone(),
            pending_choices: self.deficit.choices().map(<[ActiveDevice]>::to_vec),
        }
    }

    // --- Battery and deficit resolution ---------------------------------

    /// Requests a one-step battery decrease, gated by deficit resolution.
    ///
    /// # Errors
    ///
    /// [`EnergyError::DecisionPending`] if a decrease is already pending.
    pub fn request_battery_decrease(&mut self) -> Result<DecreaseOutcome, EnergyError> {
        self.deficit
            .request_decrease(&mut self.battery, &self.zones)
    }

    /// Sheds a device and commits the pending decrease. Returns the new level.
    ///
    /// # Errors
    ///
    /// See [`DeficitResolver::choose_device`].
    pub fn choose_device_to_shed(
        &mut self,
        zone_id: ZoneId,
        device_id: DeviceId,
    ) -> Result<u8, EnergyError> {
        self.deficit
            .choose_device(&mut self.battery, &mut self.zones, zone_id, device_id)
    }

    /// Discards a pending decrease. Returns `true` if one was pending.
    pub fn cancel_deficit(&mut self) -> bool {
        self.deficit.cancel()
    }

    /// Raises the battery one step. Never gated by deficit resolution.
    pub fn request_battery_increase(&mut self) -> u8 {
        self.battery.increase()
    }

    /// Writes an absolute battery level coming from outside, clamped.
    ///
    /// Returns `true` when the input had to be clamped.
    ///
    /// # Errors
    ///
    /// [`EnergyError::DecisionPending`] while a decrease is pending.
    pub fn set_battery_level(&mut self, level: i64) -> Result<bool, EnergyError> {
        self.ensure_idle()?;
        Ok(self.battery.set_level(level))
    }

    // --- Devices --------------------------------------------------------

    /// Flips a device's power state and returns the new state.
    ///
    /// Available in either deficit state; never changes the battery.
    ///
    /// # Errors
    ///
    /// Not-found errors for an unknown zone or device.
    pub fn toggle_device(&mut self, zone_id: ZoneId, device_id: DeviceId) -> Result<bool, EnergyError> {
        Ok(self.device_mut(zone_id, device_id)?.toggle())
    }

    /// Sets a device's power state explicitly.
    ///
    /// # Errors
    ///
    /// Not-found errors for an unknown zone or device.
    pub fn set_device_power(
        &mut self,
        zone_id: ZoneId,
        device_id: DeviceId,
        on: bool,
    ) -> Result<&Device, EnergyError> {
        let device = self.device_mut(zone_id, device_id)?;
        device.on = on;
        Ok(device)
    }

    /// Adds a device at the end of a zone's list.
    ///
    /// The wattage defaults to the catalog average for the device kind.
    ///
    /// # Errors
    ///
    /// [`EnergyError::EmptyName`], [`EnergyError::ZeroConsumption`], or
    /// [`EnergyError::ZoneNotFound`].
    pub fn add_device(&mut self, zone_id: ZoneId, new: NewDevice) -> Result<DeviceId, EnergyError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(EnergyError::EmptyName);
        }
        let consumption_w = new.resolved_consumption_w();
        if consumption_w == 0 {
            return Err(EnergyError::ZeroConsumption);
        }
        let id = DeviceId(self.next_id);
        let zone = self.zone_mut(zone_id)?;
        zone.devices
            .push(Device::new(id, name, new.kind, consumption_w).with_state(new.on));
        self.next_id += 1;
        Ok(id)
    }

    /// Removes a device from its zone.
    ///
    /// # Errors
    ///
    /// [`EnergyError::DecisionPending`] while a decrease is pending, or a
    /// not-found error.
    pub fn remove_device(&mut self, zone_id: ZoneId, device_id: DeviceId) -> Result<Device, EnergyError> {
        self.ensure_idle()?;
        self.zone_mut(zone_id)?
            .remove_device(device_id)
            .ok_or(EnergyError::DeviceNotFound {
                zone: zone_id,
                device: device_id,
            })
    }

    // --- Zones ----------------------------------------------------------

    /// Appends an empty zone; it ranks last for admission.
    ///
    /// # Errors
    ///
    /// [`EnergyError::EmptyName`] for a blank name.
    pub fn add_zone(
        &mut self,
        name: &str,
        icon: &str,
        ratings: ZoneRatings,
    ) -> Result<ZoneId, EnergyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EnergyError::EmptyName);
        }
        let id = ZoneId(self.next_id);
        self.next_id += 1;
        self.zones.push(Zone::new(id, name, icon, ratings));
        Ok(id)
    }

    /// Removes a zone and all its devices.
    ///
    /// # Errors
    ///
    /// [`EnergyError::DecisionPending`] while a decrease is pending, or
    /// [`EnergyError::ZoneNotFound`].
    pub fn remove_zone(&mut self, zone_id: ZoneId) -> Result<Zone, EnergyError> {
        self.ensure_idle()?;
        let idx = self
            .zones
            .iter()
            .position(|z| z.id == zone_id)
            .ok_or(EnergyError::ZoneNotFound(zone_id))?;
        Ok(self.zones.remove(idx))
    }

    fn ensure_idle(&self) -> Result<(), EnergyError> {
        if self.deficit.is_pending() {
            Err(EnergyError::DecisionPending)
        } else {
            Ok(())
        }
    }

    fn zone_mut(&mut self, zone_id: ZoneId) -> Result<&mut Zone, EnergyError> {
        self.zones
            .iter_mut()
            .find(|z| z.id == zone_id)
            .ok_or(EnergyError::ZoneNotFound(zone_id))
    }

    fn device_mut(&mut self, zone_id: ZoneId, device_id: DeviceId) -> Result<&mut Device, EnergyError> {
        self.zone_mut(zone_id)?
            .device_mut(device_id)
            .ok_or(EnergyError::DeviceNotFound {
                zone: zone_id,
                device: device_id,
            })
    }
}
