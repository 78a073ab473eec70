use crossterm::event::{KeyCode as TermKey, KeyEvent, KeyModifiers};

use crate::game::KeyCode;

/// Raw codes the terminal arrow keys are reported as
pub const ARROW_LEFT: KeyCode = 37;
pub const ARROW_UP: KeyCode = 38;
pub const ARROW_RIGHT: KeyCode = 39;
pub const ARROW_DOWN: KeyCode = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Raw key code for the engine's key table; unmapped codes are dropped there
    Steer(KeyCode),
    Restart,
    Quit,
    None,
}

/// Translates terminal key events into front-end actions.
///
/// Letters are reported by their upper-case ASCII code, so `w` and `W` are both 87.
/// Other characters are not steering keys.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == TermKey::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            TermKey::Up => KeyAction::Steer(ARROW_UP),
            TermKey::Down => KeyAction::Steer(ARROW_DOWN),
            TermKey::Left => KeyAction::Steer(ARROW_LEFT),
            TermKey::Right => KeyAction::Steer(ARROW_RIGHT),

            // Controls
            TermKey::Char('q') | TermKey::Char('Q') | TermKey::Esc => KeyAction::Quit,
            TermKey::Char('r') | TermKey::Char('R') => KeyAction::Restart,

            TermKey::Char(c) if c.is_ascii_alphabetic() => {
                KeyAction::Steer(c.to_ascii_uppercase() as KeyCode)
            }

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig};

    fn press(code: TermKey) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(TermKey::Up)), KeyAction::Steer(38));
        assert_eq!(handler.handle_key_event(press(TermKey::Down)), KeyAction::Steer(40));
        assert_eq!(handler.handle_key_event(press(TermKey::Left)), KeyAction::Steer(37));
        assert_eq!(handler.handle_key_event(press(TermKey::Right)), KeyAction::Steer(39));
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(TermKey::Char('w'))), KeyAction::Steer(87));
        assert_eq!(handler.handle_key_event(press(TermKey::Char('a'))), KeyAction::Steer(65));
        assert_eq!(handler.handle_key_event(press(TermKey::Char('s'))), KeyAction::Steer(83));
        assert_eq!(handler.handle_key_event(press(TermKey::Char('d'))), KeyAction::Steer(68));
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(TermKey::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(w_upper), KeyAction::Steer(87));
    }

    #[test]
    fn test_default_key_map_covers_handler_codes() {
        let handler = InputHandler::new();
        let config = GameConfig::default();

        let steer = |code| match handler.handle_key_event(press(code)) {
            KeyAction::Steer(key) => config.direction_for_key(key),
            _ => None,
        };

        assert_eq!(steer(TermKey::Char('w')), Some(Direction::Up));
        assert_eq!(steer(TermKey::Char('s')), Some(Direction::Down));
        assert_eq!(steer(TermKey::Left), Some(Direction::Left));
        assert_eq!(steer(TermKey::Right), Some(Direction::Right));
        assert_eq!(steer(TermKey::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(TermKey::Char('q'))), KeyAction::Quit);

        let q_upper = KeyEvent::new(TermKey::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(q_upper), KeyAction::Quit);

        assert_eq!(handler.handle_key_event(press(TermKey::Esc)), KeyAction::Quit);
    }

    #[test]
    fn test_restart_key() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(TermKey::Char('r'))), KeyAction::Restart);

        let r_upper = KeyEvent::new(TermKey::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(r_upper), KeyAction::Restart);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(TermKey::Tab)), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(TermKey::Char('x'))), KeyAction::Steer(88));
        assert_eq!(handler.handle_key_event(press(TermKey::Char('5'))), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(TermKey::Char(' '))), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(TermKey::Char('é'))), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(TermKey::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
