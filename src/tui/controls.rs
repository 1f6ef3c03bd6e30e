//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Esc => app.cancel(),
        KeyCode::Char('+' | '=') => app.battery_up(),
        KeyCode::Char('-') => app.battery_down(),
        KeyCode::Up => app.move_up(),
        KeyCode::Down => app.move_down(),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
            if !app.is_modal_open() {
                app.switch_focus();
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.activate(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HouseholdConfig;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn minus_then_escape_cancels() {
        let mut app = App::new(HouseholdConfig::demo().build().expect("demo preset builds"));
        press(&mut app, KeyCode::Char('-'));
        assert!(app.is_modal_open());
        press(&mut app, KeyCode::Esc);
        assert!(!app.is_modal_open());
        assert_eq!(app.household().battery_level(), 85);
    }

    #[test]
    fn minus_then_enter_sheds_first_choice() {
        let mut app = App::new(HouseholdConfig::demo().build().expect("demo preset builds"));
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.household().battery_level(), 75);
        assert_eq!(app.household().total_consumption_w(), 220);
    }

    #[test]
    fn q_quits() {
        let mut app = App::new(HouseholdConfig::demo().build().expect("demo preset builds"));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.quit);
    }
}
