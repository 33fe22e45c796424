//! Key mapping from terminal events to engine intents.
//!
//! Down steps, Left/Right move, Up rotates, Escape toggles pause and Space
//! hard-drops. Letter keys are secondary bindings.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to an intent.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Intent::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Intent::MoveDown),

        // Rotation
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') | KeyCode::Char('x') => {
            Some(Intent::RotateCw)
        }
        KeyCode::Char('z') => Some(Intent::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(Intent::Drop),
        KeyCode::Esc | KeyCode::Char('p') => Some(Intent::TogglePause),
        KeyCode::Char('r') => Some(Intent::Restart),

        KeyCode::Char(c) if c.is_ascii_uppercase() => {
            handle_key_event(KeyEvent::new(KeyCode::Char(c.to_ascii_lowercase()), key.modifiers))
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<Intent> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(key(KeyCode::Left), Some(Intent::MoveLeft));
        assert_eq!(key(KeyCode::Right), Some(Intent::MoveRight));
        assert_eq!(key(KeyCode::Down), Some(Intent::MoveDown));
        assert_eq!(key(KeyCode::Up), Some(Intent::RotateCw));
    }

    #[test]
    fn test_pause_and_drop_keys() {
        assert_eq!(key(KeyCode::Esc), Some(Intent::TogglePause));
        assert_eq!(key(KeyCode::Char(' ')), Some(Intent::Drop));
        assert_eq!(key(KeyCode::Char('P')), Some(Intent::TogglePause));
    }

    #[test]
    fn test_letter_bindings_ignore_case() {
        assert_eq!(key(KeyCode::Char('Z')), Some(Intent::RotateCcw));
        assert_eq!(key(KeyCode::Char('H')), Some(Intent::MoveLeft));
        assert_eq!(key(KeyCode::Char('R')), Some(Intent::Restart));
        assert_eq!(key(KeyCode::Char('Q')), None);
    }

    #[test]
    fn test_control_chords_are_not_intents() {
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_d), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Esc)));
    }
}
