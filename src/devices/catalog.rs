//! Fixed device-type catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of device types a household can contain.
///
/// Each kind carries a label, an icon, and an average consumption used
/// only to pre-fill the wattage of a newly added device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Tv,
    Refrigerator,
    Oven,
    Lamp,
    AirConditioner,
    WashingMachine,
    Computer,
    Charger,
    /// Fallback for loads outside the catalog.
    Other,
}

/// Catalog entry describing one device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceTypeInfo {
    /// Catalog key.
    pub kind: DeviceKind,
    /// Human-readable label.
    pub label: &'static str,
    /// Display icon.
    pub icon: &'static str,
    /// Typical draw in watts, used as a form default.
    pub average_consumption_w: u32,
}

impl DeviceKind {
    /// Every catalog entry, in display order.
    pub const ALL: [DeviceKind; 9] = [
        DeviceKind::Tv,
        DeviceKind::Refrigerator,
        DeviceKind::Oven,
        DeviceKind::Lamp,
        DeviceKind::AirConditioner,
        DeviceKind::WashingMachine,
        DeviceKind::Computer,
        DeviceKind::Charger,
        DeviceKind::Other,
    ];

    /// Returns the catalog entry for this kind.
    pub const fn info(self) -> DeviceTypeInfo {
        let (label, icon, average_consumption_w) = match self {
            DeviceKind::Tv => ("TV", "📺", 150),
            DeviceKind::Refrigerator => ("Refrigerator", "🧊", 200),
            DeviceKind::Oven => ("Oven", "🔥", 2000),
            DeviceKind::Lamp => ("Lamp", "💡", 20),
            DeviceKind::AirConditioner => ("Air conditioner", "❄️", 1500),
            DeviceKind::WashingMachine => ("Washing machine", "🧺", 500),
            DeviceKind::Computer => ("Computer", "💻", 300),
            DeviceKind::Charger => ("Charger", "🔌", 50),
            DeviceKind::Other => ("Other", "⚙️", 10),
        };
        DeviceTypeInfo {
            kind: self,
            label,
            icon,
            average_consumption_w,
        }
    }

    /// Default wattage for a new device of this kind.
    pub const fn average_consumption_w(self) -> u32 {
        self.info().average_consumption_w
    }

    pub const fn icon(self) -> &'static str {
        self.info().icon
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().label)
    }
}

/// Returns the full catalog in display order.
pub fn catalog() -> Vec<DeviceTypeInfo> {
    DeviceKind::ALL.iter().map(|k| k.info()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_kind_once() {
        let entries = catalog();
        assert_eq!(entries.len(), DeviceKind::ALL.len());
        for (entry, kind) in entries.iter().zip(DeviceKind::ALL) {
            assert_eq!(entry.kind, kind);
        }
    }

    #[test]
    fn averages_are_positive() {
        for kind in DeviceKind::ALL {
            assert!(kind.average_consumption_w() > 0, "{kind} has no default");
        }
    }

    #[test]
    fn known_defaults() {
        assert_eq!(DeviceKind::Tv.average_consumption_w(), 150);
        assert_eq!(DeviceKind::Oven.average_consumption_w(), 2000);
        assert_eq!(DeviceKind::Other.average_consumption_w(), 10);
    }

    #[test]
    fn kind_uses_snake_case_keys() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            kind: DeviceKind,
        }
        let w: Result<Wrapper, _> = toml::from_str("kind = \"washing_machine\"");
        assert_eq!(w.ok().map(|w| w.kind), Some(DeviceKind::WashingMachine));
    }
}
