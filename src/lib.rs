//! Household energy-management engine: battery-gated zones, consumption
//! accounting, and forced load shedding before a battery decrease.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod devices;
/// Report export formats.
pub mod io;
/// Consumption aggregation, admission, deficit resolution, and estimators.
pub mod sim;
#[cfg(feature = "tui")]
pub mod tui;
