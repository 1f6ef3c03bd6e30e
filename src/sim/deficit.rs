//! Deficit resolution: a battery decrease is held until a load is shed.
//!
//! While any device is on, lowering the battery requires an explicit,
//! attributable choice of which device to switch off. The machine has two
//! states:
//!
//! - [`DeficitState::Idle`]: no decrease pending.
//! - [`DeficitState::AwaitingDeviceChoice`]: a decrease was requested and
//!   the battery is unchanged until [`DeficitResolver::choose_device`] or
//!   [`DeficitResolver::cancel`].
//!
//! Increases never pass through this gate.

use serde::Serialize;

use crate::devices::{Battery, DeviceId, Zone, ZoneId};

use super::error::EnergyError;
use super::power_balance::active_devices;
use super::types::ActiveDevice;

/// State of the deficit-resolution machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DeficitState {
    #[default]
    Idle,
    /// A decrease is pending; `choices` is the menu of sheddable devices
    /// captured when the decrease was requested.
    AwaitingDeviceChoice { choices: Vec<ActiveDevice> },
}

impl DeficitState {
    /// The choice menu, or `None` when idle.
    pub fn choices(&self) -> Option<&[ActiveDevice]> {
        match self {
            Self::Idle => None,
            Self::AwaitingDeviceChoice { choices } => Some(choices),
        }
    }
}

/// Result of a decrease request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecreaseOutcome {
    /// Nothing was on; the battery dropped immediately.
    Committed { battery_level: u8 },
    /// Devices are on; one must be shed before the battery drops.
    PendingChoice { choices: Vec<ActiveDevice> },
}

/// Guarded transitions of the deficit-resolution machine.
///
/// The resolver owns only the machine state. The battery and zones are
/// borrowed per call from the owning session, which keeps every
/// transition a single `&mut` critical section.
#[derive(Debug, Clone, Default)]
pub struct DeficitResolver {
    state: DeficitState,
}

impl DeficitResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeficitState {
        &self.state
    }

    /// Returns `true` while a decrease awaits a device choice.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, DeficitState::AwaitingDeviceChoice { .. })
    }

    /// The pending choice menu, if any.
    pub fn choices(&self) -> Option<&[ActiveDevice]> {
        self.state.choices()
    }

    /// Requests a one-step battery decrease.
    ///
    /// Commits at once when no device is on. Otherwise moves to
    /// `AwaitingDeviceChoice` and leaves the battery untouched.
    ///
    /// # Errors
    ///
    /// [`EnergyError::DecisionPending`] if a decrease is already pending.
    pub fn request_decrease(
        &mut self,
        battery: &mut Battery,
        zones: &[Zone],
    ) -> Result<DecreaseOutcome, EnergyError> {
        if self.is_pending() {
            return Err(EnergyError::DecisionPending);
        }

        let choices = active_devices(zones);
        if choices.is_empty() {
            let battery_level = battery.decrease();
            return Ok(DecreaseOutcome::Committed { battery_level });
        }

        self.state = DeficitState::AwaitingDeviceChoice {
            choices: choices.clone(),
        };
        Ok(DecreaseOutcome::PendingChoice { choices })
    }

    /// Sheds `device_id` in `zone_id` and commits the pending decrease.
    ///
    /// Turning off a device that is already off is not an error. Returns
    /// the new battery level.
    ///
    /// # Errors
    ///
    /// - [`EnergyError::NoPendingDecrease`] when idle.
    /// - [`EnergyError::ZoneNotFound`] / [`EnergyError::DeviceNotFound`]
    ///   for an unknown pair; the decrease stays pending.
    pub fn choose_device(
        &mut self,
        battery: &mut Battery,
        zones: &mut [Zone],
        zone_id: ZoneId,
        device_id: DeviceId,
    ) -> Result<u8, EnergyError> {
        if !self.is_pending() {
            return Err(EnergyError::NoPendingDecrease);
        }

        let zone = zones
            .iter_mut()
            .find(|z| z.id == zone_id)
            .ok_or(EnergyError::ZoneNotFound(zone_id))?;
        let device = zone
            .device_mut(device_id)
            .ok_or(EnergyError::DeviceNotFound {
                zone: zone_id,
                device: device_id,
            })?;

        device.on = false;
        let level = battery.decrease();
        self.state = DeficitState::Idle;
        Ok(level)
    }

    /// Discards a pending decrease without touching battery or devices.
    ///
    /// Returns `true` if a decrease was pending. Cancelling while idle is a no-op.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = DeficitState::Idle;
        was_pending
    }
}
