//! Household entities: devices, zones, the battery, and the device catalog.

/// Battery state of charge.
pub mod battery;
/// Fixed device-type catalog.
pub mod catalog;
pub mod types;
/// Zones and their advisory ratings.
pub mod zone;

// Re-export the main types for convenience
pub use battery::Battery;
pub use catalog::{DeviceKind, DeviceTypeInfo, catalog};
pub use types::{Device, DeviceId, NewDevice, ZoneId};
pub use zone::{Zone, ZoneRatings};
