//! Terminal application state
//!
//! Wraps a [`CalculatorSession`] with the keypad's visual feedback and the
//! quit flag. Every input path ends in [`CalculatorApp::apply`].

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use super::input::{InputHandler, KeyAction};
use super::keypad::Keypad;
use super::ui::keypad_area;
use crate::config::CalculatorConfig;
use crate::core::{Action, CalcResult, Clock, SystemClock};
use crate::display::DisplaySnapshot;
use crate::session::CalculatorSession;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp<C: Clock = SystemClock> {
    session: CalculatorSession<C>,
    keypad: Keypad,
    input: InputHandler,
    should_quit: bool,
}

impl Default for CalculatorApp<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp<SystemClock> {
    /// Creates an app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates an app with the given config on the system clock
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self::with_session(CalculatorSession::with_config(config))
    }
}

impl<C: Clock> CalculatorApp<C> {
    /// Creates an app around an existing session
    #[must_use]
    pub fn with_session(session: CalculatorSession<C>) -> Self {
        let keypad = Keypad::with_feedback_ms(session.config().press_feedback_ms);
        Self {
            session,
            keypad,
            input: InputHandler::new(),
            should_quit: false,
        }
    }

    /// The underlying session
    #[must_use]
    pub fn session(&self) -> &CalculatorSession<C> {
        &self.session
    }

    /// The keypad with its highlight state
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Current display
    #[must_use]
    pub fn display(&self) -> DisplaySnapshot {
        self.session.display()
    }

    /// Runs an action and lights up its button
    pub fn apply(&mut self, action: Action) -> CalcResult<Option<f64>> {
        let result = self.session.handle(action);
        self.keypad.press_action(action, self.session.now_ms());
        self.sync_keypad();
        result
    }

    /// Handles a key press
    pub fn handle_key_event(&mut self, event: KeyEvent) -> KeyAction {
        let action = self.input.handle_key(event);
        match action {
            KeyAction::Calc(calc) => {
                let _ = self.apply(calc);
            }
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
        action
    }

    /// Handles a mouse event against a terminal of size `screen`
    ///
    /// Returns the action of the clicked button, if any.
    pub fn handle_mouse_event(&mut self, event: MouseEvent, screen: Rect) -> Option<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        self.click(screen, event.column, event.row)
    }

    /// Clicks the keypad at terminal cell (`x`, `y`)
    pub fn click(&mut self, screen: Rect, x: u16, y: u16) -> Option<Action> {
        let action = self.keypad.hit_test(keypad_area(screen), x, y)?;
        debug!(?action, x, y, "keypad click");
        let _ = self.apply(action);
        Some(action)
    }

    /// Advances timers; returns whether anything visible changed
    pub fn tick(&mut self) -> bool {
        let recovered = self.session.tick();
        let released = self.keypad.release_expired(self.session.now_ms());
        if recovered {
            self.sync_keypad();
        }
        recovered || released
    }

    fn sync_keypad(&mut self) {
        self.keypad
            .set_active_operator(self.session.display().active_operator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Digit, ManualClock, Operation};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> (CalculatorApp<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let session = CalculatorSession::with_clock(CalculatorConfig::default(), clock.clone());
        (CalculatorApp::with_session(session), clock)
    }

    fn press(app: &mut CalculatorApp<ManualClock>, c: char) {
        app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert!(!app.should_quit());
        assert_eq!(app.display().current, "0");
    }

    #[test]
    fn test_app_default() {
        let app = CalculatorApp::default();
        assert_eq!(app.keypad().button_count(), 19);
    }

    #[test]
    fn test_keys_drive_session() {
        let (mut app, _) = app();
        for c in "12+3".chars() {
            press(&mut app, c);
        }
        assert_eq!(app.display().previous, "12 + 3 = 15");
        app.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.display().current, "15");
    }

    #[test]
    fn test_quit_key() {
        let (mut app, _) = app();
        let action =
            app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action, KeyAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_ignored_key() {
        let (mut app, _) = app();
        assert_eq!(
            app.handle_key_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            KeyAction::None
        );
        assert_eq!(app.display().current, "0");
    }

    #[test]
    fn test_operator_highlight_follows_state() {
        let (mut app, _) = app();
        press(&mut app, '4');
        press(&mut app, '*');
        assert_eq!(app.keypad().active_operator(), Some(Operation::Multiply));
        press(&mut app, '2');
        press(&mut app, '=');
        assert_eq!(app.keypad().active_operator(), None);
    }

    #[test]
    fn test_press_feedback_released_on_tick() {
        let (mut app, clock) = app();
        press(&mut app, '5');
        let idx = app.keypad().find_action(Action::Digit(Digit::Five)).unwrap();
        assert!(app.keypad().get_button(idx).unwrap().is_pressed());

        clock.advance_ms(100);
        assert!(!app.tick());
        clock.advance_ms(50);
        assert!(app.tick());
        assert!(!app.keypad().get_button(idx).unwrap().is_pressed());
    }

    #[test]
    fn test_error_recovery_on_tick() {
        let (mut app, clock) = app();
        for c in "8/0=".chars() {
            press(&mut app, c);
        }
        assert!(app.display().error);
        assert_eq!(app.keypad().active_operator(), Some(Operation::Divide));

        clock.advance_ms(2000);
        assert!(app.tick());
        assert!(!app.display().error);
        assert_eq!(app.display().current, "0");
        assert_eq!(app.keypad().active_operator(), None);
    }

    #[test]
    fn test_click_keypad() {
        let (mut app, _) = app();
        let screen = Rect::new(0, 0, 80, 24);
        let area = keypad_area(screen);
        // top-left button is C, one cell inside the border
        assert_eq!(app.click(screen, area.x + 1, area.y + 1), Some(Action::Clear));
        assert_eq!(app.click(screen, 0, 0), None);
    }

    #[test]
    fn test_mouse_down_clicks() {
        let (mut app, _) = app();
        let screen = Rect::new(0, 0, 80, 24);
        let area = keypad_area(screen);
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + 1,
            row: area.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(app.handle_mouse_event(event, screen), Some(Action::Clear));

        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            ..event
        };
        assert_eq!(app.handle_mouse_event(moved, screen), None);
    }

    #[test]
    fn test_with_config_feedback() {
        let config = CalculatorConfig {
            press_feedback_ms: 10,
            ..CalculatorConfig::default()
        };
        let clock = ManualClock::new();
        let mut app = CalculatorApp::with_session(CalculatorSession::with_clock(config, clock.clone()));
        press(&mut app, '1');
        clock.advance_ms(10);
        assert!(app.tick());
    }
}
