//! Dashboard application state.

use tracing::debug;

use crate::devices::{Device, Zone};
use crate::sim::Household;
use crate::sim::deficit::DecreaseOutcome;
use crate::sim::types::ActiveDevice;

/// Which list the arrow keys move through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Zones,
    Devices,
}

/// TUI application state.
pub struct App {
    household: Household,
    /// Selected zone; always inside the admitted prefix.
    pub zone_idx: usize,
    /// Selected device within the selected zone.
    pub device_idx: usize,
    pub focus: Focus,
    /// Highlighted entry of the deficit modal.
    pub choice_idx: usize,
    /// Last action feedback shown in the footer.
    pub status: String,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    pub fn new(household: Household) -> Self {
        Self {
            household,
            zone_idx: 0,
            device_idx: 0,
            focus: Focus::Zones,
            choice_idx: 0,
            status: String::from("ready"),
            quit: false,
        }
    }

    pub fn household(&self) -> &Household {
        &self.household
    }

    pub fn into_household(self) -> Household {
        self.household
    }

    /// Choice menu while a decrease is pending.
    pub fn choices(&self) -> Option<&[ActiveDevice]> {
        self.household.deficit_state().choices()
    }

    pub fn is_modal_open(&self) -> bool {
        self.household.is_decrease_pending()
    }

    pub fn selected_zone(&self) -> Option<&Zone> {
        self.household.admitted_zones().get(self.zone_idx)
    }

    pub fn selected_device(&self) -> Option<&Device> {
        self.selected_zone()
            .and_then(|z| z.devices.get(self.device_idx))
    }

    // --- Battery ------------------------------------------------------------

    pub fn battery_up(&mut self) {
        let level = self.household.request_battery_increase();
        debug!(level, "battery increased");
        self.status = format!("battery raised to {level}%");
        self.clamp_selection();
    }

    pub fn battery_down(&mut self) {
        match self.household.request_battery_decrease() {
            Ok(DecreaseOutcome::Committed { battery_level }) => {
                debug!(level = battery_level, "battery decreased");
                self.status = format!("battery lowered to {battery_level}%");
                self.clamp_selection();
            }
            Ok(DecreaseOutcome::PendingChoice { choices }) => {
                debug!(choices = choices.len(), "decrease awaiting device choice");
                self.choice_idx = 0;
                self.status = String::from("choose a device to turn off");
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    // --- Navigation ---------------------------------------------------------

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Zones => Focus::Devices,
            Focus::Devices => Focus::Zones,
        };
    }

    pub fn move_up(&mut self) {
        if self.is_modal_open() {
            self.choice_idx = self.choice_idx.saturating_sub(1);
            return;
        }
        match self.focus {
            Focus::Zones => {
                if self.zone_idx > 0 {
                    self.zone_idx -= 1;
                    self.device_idx = 0;
                }
            }
            Focus::Devices => self.device_idx = self.device_idx.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self) {
        if let Some(choices) = self.choices() {
            let last = choices.len().saturating_sub(1);
            self.choice_idx = (self.choice_idx + 1).min(last);
            return;
        }
        match self.focus {
            Focus::Zones => {
                if self.zone_idx + 1 < self.household.admitted_zones().len() {
                    self.zone_idx += 1;
                    self.device_idx = 0;
                }
            }
            Focus::Devices => {
                let count = self.selected_zone().map_or(0, |z| z.devices.len());
                if self.device_idx + 1 < count {
                    self.device_idx += 1;
                }
            }
        }
    }

    /// Toggles the selected device, or confirms the modal choice.
    pub fn activate(&mut self) {
        if self.is_modal_open() {
            self.shed_selected();
            return;
        }
        let Some((zone_id, device_id)) = self
            .selected_zone()
            .and_then(|z| z.devices.get(self.device_idx).map(|d| (z.id, d.id)))
        else {
            self.status = String::from("no device selected");
            return;
        };
        match self.household.toggle_device(zone_id, device_id) {
            Ok(on) => {
                debug!(zone = %zone_id, device = %device_id, on, "device toggled");
                self.status = format!("device {} {}", device_id, if on { "on" } else { "off" });
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    /// Closes the modal without changing the battery.
    pub fn cancel(&mut self) {
        if self.household.cancel_deficit() {
            debug!("pending decrease cancelled");
            self.status = String::from("decrease cancelled");
        }
    }

    fn shed_selected(&mut self) {
        let Some(choice) = self
            .choices()
            .and_then(|c| c.get(self.choice_idx))
            .map(|c| (c.zone_id, c.device_id, c.device_name.clone()))
        else {
            return;
        };
        let (zone_id, device_id, name) = choice;
        match self.household.choose_device_to_shed(zone_id, device_id) {
            Ok(level) => {
                debug!(zone = %zone_id, device = %device_id, level, "device shed");
                self.status = format!("{name} turned off, battery at {level}%");
                self.choice_idx = 0;
                self.clamp_selection();
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    /// Keeps the selection inside the admitted zones after a level change.
    fn clamp_selection(&mut self) {
        let admitted = self.household.admitted_zones().len();
        if self.zone_idx >= admitted {
            self.zone_idx = admitted.saturating_sub(1);
            self.device_idx = 0;
        }
        let count = self.selected_zone().map_or(0, |z| z.devices.len());
        if self.device_idx >= count {
            self.device_idx = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HouseholdConfig;

    fn demo_app() -> App {
        App::new(HouseholdConfig::demo().build().expect("demo preset builds"))
    }

    #[test]
    fn starts_on_first_zone() {
        let app = demo_app();
        assert_eq!(app.selected_zone().map(|z| z.name.as_str()), Some("Salon"));
        assert!(!app.is_modal_open());
    }

    #[test]
    fn toggle_selected_device() {
        let mut app = demo_app();
        let before = app.household().total_consumption_w();
        app.switch_focus();
        app.activate();
        // Salon TV goes off
        assert_eq!(app.household().total_consumption_w(), before - 150);
        assert_eq!(app.household().battery_level(), 85);
    }

    #[test]
    fn decrease_opens_modal_and_shed_commits() {
        let mut app = demo_app();
        app.battery_down();
        assert!(app.is_modal_open());
        assert_eq!(app.choices().map(<[ActiveDevice]>::len), Some(3));
        app.move_down();
        app.activate();
        // second choice is the Salon lamp
        assert!(!app.is_modal_open());
        assert_eq!(app.household().battery_level(), 75);
        assert_eq!(app.household().total_consumption_w(), 350);
    }

    #[test]
    fn cancel_leaves_battery_alone() {
        let mut app = demo_app();
        app.battery_down();
        app.cancel();
        assert!(!app.is_modal_open());
        assert_eq!(app.household().battery_level(), 85);
        assert_eq!(app.household().total_consumption_w(), 370);
    }

    #[test]
    fn modal_selection_stays_in_bounds() {
        let mut app = demo_app();
        app.battery_down();
        for _ in 0..10 {
            app.move_down();
        }
        assert_eq!(app.choice_idx, 2);
        for _ in 0..10 {
            app.move_up();
        }
        assert_eq!(app.choice_idx, 0);
    }

    #[test]
    fn selection_follows_admission() {
        let mut app = demo_app();
        for _ in 0..3 {
            app.move_down();
        }
        assert_eq!(app.zone_idx, 3);
        for z in app.household().zones().to_vec() {
            for d in &z.devices {
                assert!(app.household.set_device_power(z.id, d.id, false).is_ok());
            }
        }
        // nothing active: decreases commit directly
        for _ in 0..6 {
            app.battery_down();
        }
        assert_eq!(app.household().battery_level(), 25);
        assert_eq!(app.zone_idx, 0);
    }

    #[test]
    fn increase_works_with_modal_open() {
        let mut app = demo_app();
        app.battery_down();
        app.battery_up();
        assert!(app.is_modal_open());
        assert_eq!(app.household().battery_level(), 95);
    }
}
