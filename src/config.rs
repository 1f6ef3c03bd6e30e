//! TOML-based household configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::devices::{Battery, Device, DeviceId, DeviceKind, Zone, ZoneId, ZoneRatings};
use crate::sim::Household;
use crate::sim::estimate::EstimatorConfig;

/// Top-level household configuration parsed from TOML.
///
/// All sections have defaults. Load from TOML with
/// [`HouseholdConfig::from_toml_file`] or start from a preset with
/// [`HouseholdConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseholdConfig {
    /// Initial battery state.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Electricity tariff.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Solar sizing constants.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Autonomy constants.
    #[serde(default)]
    pub autonomy: AutonomyConfig,
    /// Zones in admission order.
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
}

/// Initial battery state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Starting level in percent. Out-of-range values are clamped into [0, 100].
    pub initial_level: i64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self { initial_level: 100 }
    }
}

/// Electricity tariff.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Price per kWh (must be >= 0).
    pub price_per_kwh: f64,
    /// Days used for monthly projections (must be > 0).
    pub days_per_month: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        let e = EstimatorConfig::default();
        Self {
            price_per_kwh: e.price_per_kwh,
            days_per_month: e.days_per_month,
        }
    }
}

/// Solar sizing constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Production attributed to each battery percentage point (W).
    pub watts_per_point: f64,
    /// Rated power of one panel (W).
    pub panel_rating_w: u32,
    /// Daily yield of one panel (kWh/day, must be > 0).
    pub panel_daily_yield_kwh: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        let e = EstimatorConfig::default();
        Self {
            watts_per_point: e.solar_watts_per_point,
            panel_rating_w: e.panel_rating_w,
            panel_daily_yield_kwh: e.panel_daily_yield_kwh,
        }
    }
}

/// Autonomy constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutonomyConfig {
    /// Stored energy per battery percentage point (Wh, must be >= 0).
    pub wh_per_point: f64,
}

impl Default for AutonomyConfig {
    fn default() -> Self {
        Self {
            wh_per_point: EstimatorConfig::default().autonomy_wh_per_point,
        }
    }
}

/// One zone and its devices.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneConfig {
    pub name: String,
    #[serde(default = "default_zone_icon")]
    pub icon: String,
    #[serde(default = "default_max_current_a")]
    pub max_current_a: u32,
    #[serde(default = "default_max_voltage_v")]
    pub max_voltage_v: u32,
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

/// One device inside a zone.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    pub name: String,
    pub kind: DeviceKind,
    /// Initial power state.
    #[serde(default)]
    pub on: bool,
    /// Draw in watts; defaults to the catalog average for `kind`.
    #[serde(default)]
    pub consumption_w: Option<u32>,
}

fn default_zone_icon() -> String {
    "🏠".to_string()
}

fn default_max_current_a() -> u32 {
    ZoneRatings::default().max_current_a
}

fn default_max_voltage_v() -> u32 {
    ZoneRatings::default().max_voltage_v
}

impl ZoneConfig {
    fn new(name: &str, icon: &str, max_current_a: u32, devices: Vec<DeviceConfig>) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            max_current_a,
            max_voltage_v: 220,
            devices,
        }
    }
}

impl DeviceConfig {
    fn new(name: &str, kind: DeviceKind, on: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            on,
            consumption_w: None,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"zones[1].devices[0].consumption_w"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl HouseholdConfig {
    /// The dashboard's four zones with a few sample devices, battery at 85%.
    pub fn demo() -> Self {
        Self {
            battery: BatteryConfig { initial_level: 85 },
            tariff: TariffConfig::default(),
            solar: SolarConfig::default(),
            autonomy: AutonomyConfig::default(),
            zones: vec![
                ZoneConfig::new(
                    "Salon",
                    "🛋️",
                    10,
                    vec![
                        DeviceConfig::new("TV", DeviceKind::Tv, true),
                        DeviceConfig::new("Lamp", DeviceKind::Lamp, true),
                    ],
                ),
                ZoneConfig::new(
                    "Cuisine",
                    "🍽️",
                    15,
                    vec![
                        DeviceConfig::new("Fridge", DeviceKind::Refrigerator, true),
                        DeviceConfig::new("Oven", DeviceKind::Oven, false),
                    ],
                ),
                ZoneConfig::new(
                    "Chambre",
                    "🛏️",
                    8,
                    vec![
                        DeviceConfig::new("Bedside lamp", DeviceKind::Lamp, false),
                        DeviceConfig::new("Computer", DeviceKind::Computer, false),
                    ],
                ),
                ZoneConfig::new(
                    "Garage",
                    "🚗",
                    12,
                    vec![DeviceConfig::new("Charger", DeviceKind::Charger, false)],
                ),
            ],
        }
    }

    /// The four dashboard zones with no devices and a full battery.
    pub fn empty() -> Self {
        let mut cfg = Self::demo();
        cfg.battery.initial_level = 100;
        for zone in &mut cfg.zones {
            zone.devices.clear();
        }
        cfg
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "empty"];

    /// Loads a household from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "empty" => Ok(Self::empty()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a household from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a household from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid. The initial
    /// battery level is never an error: it is clamped on build.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let t = &self.tariff;
        if !(t.price_per_kwh >= 0.0 && t.price_per_kwh.is_finite()) {
            errors.push(ConfigError::new("tariff.price_per_kwh", "must be a finite value >= 0"));
        }
        if !(t.days_per_month > 0.0 && t.days_per_month.is_finite()) {
            errors.push(ConfigError::new("tariff.days_per_month", "must be > 0"));
        }

        let s = &self.solar;
        if !(s.watts_per_point >= 0.0 && s.watts_per_point.is_finite()) {
            errors.push(ConfigError::new("solar.watts_per_point", "must be a finite value >= 0"));
        }
        if s.panel_rating_w == 0 {
            errors.push(ConfigError::new("solar.panel_rating_w", "must be > 0"));
        }
        if !(s.panel_daily_yield_kwh > 0.0 && s.panel_daily_yield_kwh.is_finite()) {
            errors.push(ConfigError::new("solar.panel_daily_yield_kwh", "must be > 0"));
        }

        let a = &self.autonomy;
        if !(a.wh_per_point >= 0.0 && a.wh_per_point.is_finite()) {
            errors.push(ConfigError::new("autonomy.wh_per_point", "must be a finite value >= 0"));
        }

        for (zi, zone) in self.zones.iter().enumerate() {
            if zone.name.trim().is_empty() {
                errors.push(ConfigError::new(format!("zones[{zi}].name"), "must not be empty"));
            }
            for (di, device) in zone.devices.iter().enumerate() {
                if device.name.trim().is_empty() {
                    errors.push(ConfigError::new(
                        format!("zones[{zi}].devices[{di}].name"),
                        "must not be empty",
                    ));
                }
                if device.consumption_w == Some(0) {
                    errors.push(ConfigError::new(
                        format!("zones[{zi}].devices[{di}].consumption_w"),
                        "must be > 0",
                    ));
                }
            }
        }

        errors
    }

    /// Returns `true` if `battery.initial_level` lies outside [0, 100].
    pub fn battery_out_of_range(&self) -> bool {
        !(0..=100).contains(&self.battery.initial_level)
    }

    /// Estimator constants from the tariff, solar, and autonomy sections.
    pub fn estimator(&self) -> EstimatorConfig {
        EstimatorConfig {
            price_per_kwh: self.tariff.price_per_kwh,
            days_per_month: self.tariff.days_per_month,
            solar_watts_per_point: self.solar.watts_per_point,
            panel_rating_w: self.solar.panel_rating_w,
            panel_daily_yield_kwh: self.solar.panel_daily_yield_kwh,
            autonomy_wh_per_point: self.autonomy.wh_per_point,
        }
    }

    /// Builds a household from the configuration.
    ///
    /// Zones and devices receive sequential ids in declaration order,
    /// starting at 1.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a device has an explicit zero consumption.
    pub fn build(&self) -> Result<Household, ConfigError> {
        let mut next_id = 1_u64;
        let mut take_id = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let mut zones = Vec::with_capacity(self.zones.len());
        for (zi, zc) in self.zones.iter().enumerate() {
            let ratings = ZoneRatings {
                max_current_a: zc.max_current_a,
                max_voltage_v: zc.max_voltage_v,
            };
            let mut zone = Zone::new(ZoneId(take_id()), zc.name.trim(), &zc.icon, ratings);
            for (di, dc) in zc.devices.iter().enumerate() {
                let watts = dc
                    .consumption_w
                    .unwrap_or_else(|| dc.kind.average_consumption_w());
                if watts == 0 {
                    return Err(ConfigError::new(
                        format!("zones[{zi}].devices[{di}].consumption_w"),
                        "must be > 0",
                    ));
                }
                zone.devices.push(
                    Device::new(DeviceId(take_id()), dc.name.trim(), dc.kind, watts)
                        .with_state(dc.on),
                );
            }
            zones.push(zone);
        }

        Household::new(
            Battery::new(self.battery.initial_level),
            zones,
            self.estimator(),
        )
        .map_err(|e| ConfigError::new("zones", e.to_string()))
    }
}
