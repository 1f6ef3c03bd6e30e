//! Errors returned by household operations.

use thiserror::Error;

use crate::devices::{DeviceId, ZoneId};

/// Failure of a household operation. No state is mutated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnergyError {
    /// The referenced zone does not exist.
    #[error("zone {0} not found")]
    ZoneNotFound(ZoneId),
    /// The zone exists but holds no device with this id.
    #[error("device {device} not found in zone {zone}")]
    DeviceNotFound { zone: ZoneId, device: DeviceId },
    /// A battery decrease is waiting for a device to be shed.
    #[error("a battery decrease is awaiting a device choice")]
    DecisionPending,
    /// A device choice was submitted with no decrease pending.
    #[error("no battery decrease is pending")]
    NoPendingDecrease,
    /// Devices must draw a positive number of watts.
    #[error("device consumption must be > 0 W")]
    ZeroConsumption,
    /// Zone and device names must not be blank.
    #[error("name must not be empty")]
    EmptyName,
    /// Two zones or devices share an id.
    #[error("id {0} is used more than once")]
    DuplicateId(u64),
}

impl EnergyError {
    /// Returns `true` for the not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ZoneNotFound(_) | Self::DeviceNotFound { .. })
    }
}
