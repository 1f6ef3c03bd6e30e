//! Energy, cost, solar, and autonomy projections.
//!
//! Every figure is derived from the total active draw and the battery
//! level alone; nothing here mutates household state.

use std::fmt;

use serde::{Serialize, Serializer};

use super::power_balance::{DAYS_PER_YEAR, daily_energy_kwh};

/// Constants feeding the estimators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatorConfig {
    /// Unit price per kWh.
    pub price_per_kwh: f64,
    /// Days used for monthly projections.
    pub days_per_month: f64,
    /// Solar production attributed to each battery percentage point (W).
    pub solar_watts_per_point: f64,
    /// Rated power of one solar panel (W).
    pub panel_rating_w: u32,
    /// Daily yield of one panel (kWh/day).
    pub panel_daily_yield_kwh: f64,
    /// Stored energy per battery percentage point (Wh).
    pub autonomy_wh_per_point: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            price_per_kwh: 0.150,
            days_per_month: 30.0,
            solar_watts_per_point: 50.0,
            panel_rating_w: 400,
            // 400 W panel at 4 effective sun-hours
            panel_daily_yield_kwh: 1.6,
            autonomy_wh_per_point: 50.0,
        }
    }
}

/// Hours of operation a battery charge buys at the current draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Autonomy {
    /// Finite runtime in hours.
    Hours(f64),
    /// Nothing is drawing power, so the charge never runs out.
    Unbounded,
}

impl Autonomy {
    /// Computes `battery_level * wh_per_point / total_w`.
    ///
    /// A zero draw yields [`Autonomy::Unbounded`] instead of a division fault.
    pub fn at(battery_level: u8, wh_per_point: f64, total_w: u64) -> Self {
        if total_w == 0 {
            return Self::Unbounded;
        }
        Self::Hours(f64::from(battery_level) * wh_per_point / total_w as f64)
    }

    /// Finite hours, or `None` when unbounded.
    pub fn hours(self) -> Option<f64> {
        match self {
            Self::Hours(h) => Some(h),
            Self::Unbounded => None,
        }
    }
}

impl fmt::Display for Autonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hours(h) => write!(f, "{h:.1} h"),
            Self::Unbounded => f.write_str("∞"),
        }
    }
}

// Unbounded serializes as JSON null; finite values as a number of hours.
impl Serialize for Autonomy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.hours().serialize(serializer)
    }
}

/// Projections derived from one consumption/battery reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyReport {
    /// Total active draw the report is based on (W).
    pub total_consumption_w: u64,
    /// Battery level the report is based on (%).
    pub battery_level: u8,
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
    pub annual_kwh: f64,
    pub monthly_cost: f64,
    pub annual_cost: f64,
    /// Simplified instantaneous solar production (W).
    pub solar_production_w: f64,
    /// Panels needed to cover daily consumption.
    pub panel_count: u64,
    /// `panel_count * panel_rating_w` (W).
    pub installed_capacity_w: u64,
    /// Runtime at the current battery level.
    pub autonomy: Autonomy,
    /// Runtime on a full battery.
    pub full_autonomy: Autonomy,
}

impl EnergyReport {
    /// Computes every estimate from the total draw and battery level.
    pub fn new(total_consumption_w: u64, battery_level: u8, cfg: &EstimatorConfig) -> Self {
        let daily_kwh = daily_energy_kwh(total_consumption_w);
        let monthly_kwh = daily_kwh * cfg.days_per_month;
        let annual_kwh = daily_kwh * DAYS_PER_YEAR;

        let panel_count = required_panels(daily_kwh, cfg.panel_daily_yield_kwh);

        Self {
            total_consumption_w,
            battery_level,
            daily_kwh,
            monthly_kwh,
            annual_kwh,
            monthly_cost: monthly_kwh * cfg.price_per_kwh,
            annual_cost: annual_kwh * cfg.price_per_kwh,
            solar_production_w: f64::from(battery_level) * cfg.solar_watts_per_point,
            panel_count,
            installed_capacity_w: panel_count * u64::from(cfg.panel_rating_w),
            autonomy: Autonomy::at(battery_level, cfg.autonomy_wh_per_point, total_consumption_w),
            full_autonomy: Autonomy::at(100, cfg.autonomy_wh_per_point, total_consumption_w),
        }
    }
}

/// `ceil(daily_kwh / yield_per_panel)`, zero when nothing is consumed.
fn required_panels(daily_kwh: f64, yield_per_panel: f64) -> u64 {
    if daily_kwh <= 0.0 || yield_per_panel <= 0.0 {
        return 0;
    }
    // Non-negative and finite here, so the cast only drops the (zero) fraction.
    (daily_kwh / yield_per_panel).ceil() as u64
}

impl fmt::Display for EnergyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Energy Report ---")?;
        writeln!(f, "Current draw:          {} W", self.total_consumption_w)?;
        writeln!(f, "Daily energy:          {:.2} kWh", self.daily_kwh)?;
        writeln!(
            f,
            "Monthly energy:        {:.1} kWh ({:.2} cost)",
            self.monthly_kwh, self.monthly_cost
        )?;
        writeln!(
            f,
            "Annual energy:         {:.0} kWh ({:.2} cost)",
            self.annual_kwh, self.annual_cost
        )?;
        writeln!(f, "Solar production:      {:.0} W", self.solar_production_w)?;
        writeln!(
            f,
            "Panels required:       {} ({} W installed)",
            self.panel_count, self.installed_capacity_w
        )?;
        writeln!(
            f,
            "Autonomy at {:>3}%:      {}",
            self.battery_level, self.autonomy
        )?;
        write!(f, "Autonomy at 100%:      {}", self.full_autonomy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_figures() {
        let r = EnergyReport::new(370, 85, &EstimatorConfig::default());
        assert!((r.daily_kwh - 8.88).abs() < 1e-9);
        assert!((r.monthly_kwh - 266.4).abs() < 1e-9);
        assert!((r.annual_kwh - 3241.2).abs() < 1e-6);
        assert!((r.monthly_cost - 39.96).abs() < 1e-9);
        assert_eq!(r.solar_production_w, 4250.0);
        // 8.88 / 1.6 = 5.55 -> 6 panels
        assert_eq!(r.panel_count, 6);
        assert_eq!(r.installed_capacity_w, 2400);
        let hours = r.autonomy.hours().unwrap_or_default();
        assert!((hours - 85.0 * 50.0 / 370.0).abs() < 1e-9);
        let full = r.full_autonomy.hours().unwrap_or_default();
        assert!((full - 5000.0 / 370.0).abs() < 1e-9);
    }

    #[test]
    fn zero_draw_is_unbounded_not_nan() {
        let r = EnergyReport::new(0, 40, &EstimatorConfig::default());
        assert_eq!(r.autonomy, Autonomy::Unbounded);
        assert_eq!(r.full_autonomy, Autonomy::Unbounded);
        assert_eq!(r.panel_count, 0);
        assert_eq!(r.autonomy.to_string(), "∞");
    }

    #[test]
    fn exact_panel_yield_does_not_round_up() {
        // 200 W * 24 h = 4.8 kWh = 3 * 1.6
        assert_eq!(required_panels(4.8, 1.6), 3);
        assert_eq!(required_panels(4.81, 1.6), 4);
    }

    #[test]
    fn empty_battery_has_zero_autonomy() {
        assert_eq!(Autonomy::at(0, 50.0, 100), Autonomy::Hours(0.0));
    }

    #[test]
    fn custom_price_scales_cost() {
        let cfg = EstimatorConfig {
            price_per_kwh: 0.30,
            ..EstimatorConfig::default()
        };
        let cheap = EnergyReport::new(1000, 50, &EstimatorConfig::default());
        let dear = EnergyReport::new(1000, 50, &cfg);
        assert!((dear.annual_cost - 2.0 * cheap.annual_cost).abs() < 1e-6);
    }

    #[test]
    fn report_display_does_not_panic() {
        let s = EnergyReport::new(370, 85, &EstimatorConfig::default()).to_string();
        assert!(s.contains("Energy Report"));
    }
}
