use std::fmt;

use serde::{Deserialize, Serialize};

/// Percentage points moved by one increase or decrease request.
pub const STEP_PERCENT: u8 = 10;

/// Upper bound of the state of charge, in percent.
pub const MAX_LEVEL: u8 = 100;

/// The household battery, tracked as an integer state of charge in percent.
///
/// The level always stays in `[0, 100]`. Increases and decreases move it by
/// [`STEP_PERCENT`] and saturate at the bounds; absolute values coming from
/// outside (configuration, API) are clamped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Battery {
    level: u8,
}

impl Battery {
    /// Creates a battery at `level` percent, clamped into `[0, 100]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use home_grid::devices::Battery;
    ///
    /// assert_eq!(Battery::new(85).level(), 85);
    /// assert_eq!(Battery::new(140).level(), 100);
    /// assert_eq!(Battery::new(-5).level(), 0);
    /// ```
    pub fn new(level: i64) -> Self {
        Self {
            level: clamp_level(level),
        }
    }

    /// A fully charged battery.
    pub fn full() -> Self {
        Self { level: MAX_LEVEL }
    }

    /// Current state of charge in percent.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Overwrites the level, clamping into `[0, 100]`.
    ///
    /// Returns `true` when the input was out of range and had to be clamped.
    pub fn set_level(&mut self, level: i64) -> bool {
        self.level = clamp_level(level);
        i64::from(self.level) != level
    }

    /// Raises the level by one step, saturating at 100.
    pub fn increase(&mut self) -> u8 {
        self.level = self.level.saturating_add(STEP_PERCENT).min(MAX_LEVEL);
        self.level
    }

    /// Lowers the level by one step, saturating at 0.
    pub fn decrease(&mut self) -> u8 {
        self.level = self.level.saturating_sub(STEP_PERCENT);
        self.level
    }
}

impl Default for Battery {
    fn default() -> Self {
        Self::full()
    }
}

// Deserialized levels clamp like every other external input.
impl From<i64> for Battery {
    fn from(level: i64) -> Self {
        Self::new(level)
    }
}

impl From<Battery> for u8 {
    fn from(battery: Battery) -> Self {
        battery.level
    }
}

impl fmt::Display for Battery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.level)
    }
}

fn clamp_level(level: i64) -> u8 {
    // Clamped into [0, 100], so the narrowing cast is lossless.
    level.clamp(0, i64::from(MAX_LEVEL)) as u8
}
