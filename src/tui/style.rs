//! Color constants for the TUI.

use ratatui::style::Color;

/// Battery gauge color when high (>= 60%).
pub const BATTERY_HIGH: Color = Color::Green;
/// Battery gauge color when medium (>= 30%).
pub const BATTERY_MID: Color = Color::Yellow;
/// Battery gauge color when low (< 30%).
pub const BATTERY_LOW: Color = Color::Red;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Zones outside the admitted prefix.
pub const DIMMED: Color = Color::DarkGray;
/// Highlighted list entry.
pub const SELECTED: Color = Color::Cyan;
/// Device that is on.
pub const DEVICE_ON: Color = Color::Green;
/// Deficit modal border.
pub const MODAL_BORDER: Color = Color::Magenta;

/// Returns a color based on the battery level, matching the admission tiers.
pub fn battery_color(level: u8) -> Color {
    if level >= 60 {
        BATTERY_HIGH
    } else if level >= 30 {
        BATTERY_MID
    } else {
        BATTERY_LOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_tiers() {
        assert_eq!(battery_color(100), BATTERY_HIGH);
        assert_eq!(battery_color(60), BATTERY_HIGH);
        assert_eq!(battery_color(45), BATTERY_MID);
        assert_eq!(battery_color(29), BATTERY_LOW);
    }
}
