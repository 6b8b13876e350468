//! Keyboard input mapping
//!
//! Terminal keys are translated into the same key names a browser reports,
//! then routed through [`Action::from_key`] so both front ends agree on the
//! key map.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{Action, Operation};

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A calculator action
    Calc(Action),
    /// Quit the application
    Quit,
    /// Ignored input
    None,
}

/// Maps crossterm key events to [`KeyAction`]s
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char('x' | 'X') => KeyAction::Calc(Action::Operator(Operation::Multiply)),
            KeyCode::Delete => KeyAction::Calc(Action::Backspace),
            _ => browser_key_name(code)
                .and_then(|name| Action::from_key(&name))
                .map_or(KeyAction::None, KeyAction::Calc),
        }
    }
}

/// Browser `KeyboardEvent.key` name for a terminal key code
#[must_use]
pub fn browser_key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Enter => Some("Enter".to_string()),
        KeyCode::Esc => Some("Escape".to_string()),
        KeyCode::Backspace => Some("Backspace".to_string()),
        _ => None,
    }
}

/// Terminal key event for a browser key name
#[must_use]
pub fn key_event_from_name(name: &str) -> Option<KeyEvent> {
    let code = match name {
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Esc,
        "Backspace" => KeyCode::Backspace,
        "Delete" => KeyCode::Delete,
        _ => {
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };
    Some(KeyEvent::new(code, KeyModifiers::NONE))
}
